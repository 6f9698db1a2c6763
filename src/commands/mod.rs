pub mod add;
pub mod done;
pub mod init;
pub mod list;
pub mod login;
pub mod register;
pub mod show;
pub mod user;

use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use tipsy::{Database, Task, User};

/// Open the store and bring its schema up to date.
pub fn open_db(db_path: &Path) -> anyhow::Result<Database> {
    let db = Database::open(db_path)
        .with_context(|| format!("failed to open database {}", db_path.display()))?;
    db.migrate().context("migration failed")?;
    Ok(db)
}

/// Print any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let j = serde_json::to_string_pretty(value).context("json error")?;
    println!("{j}");
    Ok(())
}

/// Format a task's completion state as a colored string.
pub fn format_state(task: &Task) -> String {
    if task.is_completed() {
        "done".bright_black().to_string()
    } else {
        "open".green().to_string()
    }
}

fn format_owner(user_id: Option<i64>) -> String {
    user_id.map(|u| u.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Print a list of tasks as a table or JSON.
pub fn print_tasks(tasks: &[Task], json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(tasks);
    }

    if tasks.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }

    println!(
        "{:<6} {:<6} {:<6} {:<17} TITLE",
        "ID", "STATE", "OWNER", "CREATED"
    );
    println!("{}", "-".repeat(80));
    for t in tasks {
        let title = if t.title.chars().count() > 48 {
            format!("{}...", t.title.chars().take(45).collect::<String>())
        } else {
            t.title.clone()
        };
        // Both state words are four chars; width specs would count escape codes.
        println!(
            "{:<6} {}   {:<6} {:<17} {}",
            t.id,
            format_state(t),
            format_owner(t.user_id),
            t.created_at.format("%Y-%m-%d %H:%M"),
            title,
        );
    }
    Ok(())
}

/// Print a single task, human-readable or JSON.
pub fn print_task(task: &Task, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(task);
    }

    println!("ID:        {}", task.id);
    println!("Title:     {}", task.title);
    println!("State:     {}", format_state(task));
    println!("Owner:     {}", format_owner(task.user_id));
    println!("Created:   {}", task.created_at.format("%Y-%m-%d %H:%M"));
    if let Some(done) = task.completed_at {
        println!("Completed: {}", done.format("%Y-%m-%d %H:%M"));
    }
    Ok(())
}

/// Print a single user, human-readable or JSON. The password hash is never shown.
pub fn print_user(user: &User, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(user);
    }

    println!("ID:    {}", user.id);
    println!("Email: {}", user.email);
    println!("Name:  {}", user.name.bold());
    Ok(())
}
