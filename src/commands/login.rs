use std::path::Path;

use anyhow::bail;

use super::{open_db, print_user};

pub fn run(db_path: &Path, email: &str, password: &str, json: bool) -> anyhow::Result<()> {
    let db = open_db(db_path)?;
    let Some(user) = db.authenticate(email, password)? else {
        bail!("invalid email or password");
    };

    if json {
        return print_user(&user, true);
    }
    println!("Authenticated as {} (id {})", user.name, user.id);
    Ok(())
}
