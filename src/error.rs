use thiserror::Error;

/// Failures surfaced by the data-access layer.
///
/// Lookups that may legitimately find nothing return `Ok(None)` instead of
/// an error; `NotFound` is reserved for mutations aimed at a missing row.
#[derive(Debug, Error)]
pub enum Error {
    /// Connection, statement, or constraint failure reported by SQLite.
    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// Password hashing or verification could not run.
    #[error("credential error: {0}")]
    Credential(String),
}

pub type Result<T> = std::result::Result<T, Error>;
