use std::path::Path;

use anyhow::Context;

use super::open_db;

pub fn run(db_path: &Path) -> anyhow::Result<()> {
    // Create the parent directory if it doesn't exist
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let db = open_db(db_path)?;
    db.set_config("version", env!("CARGO_PKG_VERSION"))?;

    println!("Initialized tipsy database at {}", db_path.display());
    Ok(())
}
