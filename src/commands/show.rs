use std::path::Path;

use anyhow::anyhow;

use super::{open_db, print_task};

pub fn run(db_path: &Path, id: i64, json: bool) -> anyhow::Result<()> {
    let db = open_db(db_path)?;
    let task = db
        .get_task(id)?
        .ok_or_else(|| anyhow!("task not found: {id}"))?;
    print_task(&task, json)
}
