#![allow(deprecated)]
use cucumber::{given, then, when};

use super::{last_json, run_tipsy};
use crate::TipsyWorld;

fn register(world: &mut TipsyWorld, name: &str, email: &str, password: &str) {
    run_tipsy(
        world,
        &["--json", "register", email, name, "--password", password],
    );
}

fn user_id(world: &TipsyWorld, name: &str) -> i64 {
    *world
        .user_ids
        .get(name)
        .unwrap_or_else(|| panic!("no user registered as '{name}'"))
}

// ---------------------------------------------------------------------------
// Given steps
// ---------------------------------------------------------------------------

#[given(expr = "a user {string} registered with email {string} and password {string}")]
async fn a_registered_user(world: &mut TipsyWorld, name: String, email: String, password: String) {
    register(world, &name, &email, &password);
    let id = last_json(world)["id"]
        .as_i64()
        .expect("register JSON has no 'id' field");
    world.user_ids.insert(name, id);
}

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

#[when(expr = "I register {string} with email {string} and password {string}")]
async fn i_register(world: &mut TipsyWorld, name: String, email: String, password: String) {
    register(world, &name, &email, &password);
}

#[when(expr = "I log in with email {string} and password {string}")]
async fn i_log_in(world: &mut TipsyWorld, email: String, password: String) {
    run_tipsy(world, &["--json", "login", &email, "--password", &password]);
}

#[when(expr = "I look up user {string}")]
async fn i_look_up_user(world: &mut TipsyWorld, name: String) {
    let id = user_id(world, &name).to_string();
    run_tipsy(world, &["--json", "user", &id]);
}

#[when(expr = "I look up user id {int}")]
async fn i_look_up_user_id(world: &mut TipsyWorld, id: i64) {
    run_tipsy(world, &["--json", "user", &id.to_string()]);
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

#[then(expr = "the login succeeds as {string} with email {string}")]
async fn the_login_succeeds(world: &mut TipsyWorld, name: String, email: String) {
    let json = last_json(world);
    assert_eq!(json["name"].as_str(), Some(name.as_str()));
    assert_eq!(json["email"].as_str(), Some(email.as_str()));
    assert_eq!(json["id"].as_i64(), Some(user_id(world, &name)));
}

#[then("the login is rejected")]
async fn the_login_is_rejected(world: &mut TipsyWorld) {
    assert_ne!(world.last_exit_code, 0, "login unexpectedly succeeded");
    assert!(
        world.last_stderr.contains("invalid email or password"),
        "unexpected stderr: {}",
        world.last_stderr
    );
}

#[then(expr = "the user details show name {string}")]
async fn the_user_details_show_name(world: &mut TipsyWorld, name: String) {
    let json = last_json(world);
    assert_eq!(json["name"].as_str(), Some(name.as_str()));
    assert!(
        json.get("password_hash").is_none() && json.get("password").is_none(),
        "user output leaked a password field: {json}"
    );
}
