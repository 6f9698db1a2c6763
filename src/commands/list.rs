use std::path::Path;

use super::{open_db, print_tasks};

pub fn run(db_path: &Path, user: Option<i64>, json: bool) -> anyhow::Result<()> {
    let db = open_db(db_path)?;
    let tasks = db.list_tasks(user)?;
    print_tasks(&tasks, json)
}
