use std::path::Path;

use anyhow::anyhow;

use super::{open_db, print_task};

pub fn run(db_path: &Path, title: &str, user: Option<i64>, json: bool) -> anyhow::Result<()> {
    let db = open_db(db_path)?;
    let id = db.create_task(title, user)?;

    if json {
        let task = db
            .get_task(id)?
            .ok_or_else(|| anyhow!("task not found: {id}"))?;
        return print_task(&task, true);
    }
    println!("Created task {id}: {title}");
    Ok(())
}
