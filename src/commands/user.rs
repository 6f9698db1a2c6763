use std::path::Path;

use anyhow::anyhow;

use super::{open_db, print_user};

pub fn run(db_path: &Path, id: i64, json: bool) -> anyhow::Result<()> {
    let db = open_db(db_path)?;
    let user = db
        .get_user(id)?
        .ok_or_else(|| anyhow!("user not found: {id}"))?;
    print_user(&user, json)
}
