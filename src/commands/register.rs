use std::path::Path;

use anyhow::anyhow;

use super::{open_db, print_user};

pub fn run(
    db_path: &Path,
    email: &str,
    password: &str,
    name: &str,
    json: bool,
) -> anyhow::Result<()> {
    let db = open_db(db_path)?;
    let id = db.create_user(email, password, name)?;

    if json {
        let user = db
            .get_user(id)?
            .ok_or_else(|| anyhow!("user not found: {id}"))?;
        print_user(&user, true)
    } else {
        println!("Registered user {id}: {name} <{email}>");
        Ok(())
    }
}
