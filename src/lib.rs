/// Database layer: open, migrate, user and task queries.
pub mod db;
/// Error type shared by every fallible operation.
pub mod error;
/// Logging bootstrap for the command-line front end.
pub mod logging;
/// Data types: User, Task.
pub mod models;
/// Argon2id password hashing and verification.
pub mod password;

pub use db::Database;
pub use error::{Error, Result};
pub use models::{Task, User};
