use chrono::{DateTime, Utc};
use log::{debug, info};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::{Task, User};
use crate::password;

/// Latest schema version understood by this build.
pub const SCHEMA_VERSION: i32 = 1;

const USER_COLUMNS: &str = "id, email, password, name";
const TASK_COLUMNS: &str = "id, title, created_at, completed_at, user_id";

/// A handle to the store. One handle per caller; nothing is cached between calls.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        debug!("opening database at {}", path.display());
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        Ok(Database { conn })
    }

    /// Open a private in-memory store.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Database { conn })
    }

    /// Create the schema tables if they don't exist, then run any pending version-gated migrations.
    pub fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS config (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS users (
                id       INTEGER PRIMARY KEY AUTOINCREMENT,
                email    TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL,
                name     TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS tasks (
                id           INTEGER PRIMARY KEY AUTOINCREMENT,
                title        TEXT NOT NULL,
                created_at   TEXT NOT NULL,
                completed_at TEXT,
                user_id      INTEGER REFERENCES users(id)
            );
            ",
        )?;

        // Fresh databases start at version 0.
        self.conn.execute(
            "INSERT OR IGNORE INTO config (key, value) VALUES ('schema_version', '0')",
            [],
        )?;

        run_migrations(&self.conn)
    }

    // -- Config --

    pub fn set_config(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO config (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn get_config(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM config WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    // -- Users --

    /// Register a user. The password is stored as a salted Argon2id hash.
    ///
    /// Returns the store-generated id. A duplicate email violates the
    /// `UNIQUE` constraint and surfaces as [`Error::Store`].
    pub fn create_user(&self, email: &str, password: &str, name: &str) -> Result<i64> {
        let hash = password::hash(password)?;
        self.conn.execute(
            "INSERT INTO users (email, password, name) VALUES (?1, ?2, ?3)",
            params![email, hash, name],
        )?;
        let id = self.conn.last_insert_rowid();
        info!("created user {id}");
        Ok(id)
    }

    /// Look up the user with `email` and check `password` against the stored hash.
    ///
    /// An unknown email and a wrong password both yield `Ok(None)`.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>> {
        let Some(user) = self.get_user_by_email(email)? else {
            debug!("authentication failed: no such email");
            return Ok(None);
        };
        if password::verify(password, &user.password_hash)? {
            debug!("authenticated user {}", user.id);
            Ok(Some(user))
        } else {
            debug!("authentication failed for user {}", user.id);
            Ok(None)
        }
    }

    pub fn get_user(&self, id: i64) -> Result<Option<User>> {
        debug!("get_user {id}");
        let user = self
            .conn
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                params![id],
                row_to_user,
            )
            .optional()?;
        Ok(user)
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = self
            .conn
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
                params![email],
                row_to_user,
            )
            .optional()?;
        Ok(user)
    }

    // -- Tasks --

    /// Insert an incomplete task stamped with the current time; returns its id.
    ///
    /// `user_id` must name an existing user when present (foreign key).
    pub fn create_task(&self, title: &str, user_id: Option<i64>) -> Result<i64> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO tasks (title, created_at, completed_at, user_id) VALUES (?1, ?2, NULL, ?3)",
            params![title, now, user_id],
        )?;
        let id = self.conn.last_insert_rowid();
        info!("created task {id}");
        Ok(id)
    }

    /// Mark a task complete. Repeat calls keep the first completion time.
    pub fn complete_task(&self, task_id: i64) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        // COALESCE keeps an existing timestamp, so the row still matches and
        // zero changed rows means the id does not exist.
        let rows_changed = self.conn.execute(
            "UPDATE tasks SET completed_at = COALESCE(completed_at, ?1) WHERE id = ?2",
            params![now, task_id],
        )?;

        if rows_changed == 0 {
            return Err(Error::NotFound {
                entity: "task",
                id: task_id,
            });
        }
        info!("completed task {task_id}");
        Ok(())
    }

    /// List tasks in insertion order, optionally restricted to one owner.
    pub fn list_tasks(&self, user_id: Option<i64>) -> Result<Vec<Task>> {
        debug!("list_tasks user_id={user_id:?}");
        let tasks = match user_id {
            Some(uid) => {
                let mut stmt = self.conn.prepare(&format!(
                    "SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = ?1 ORDER BY id ASC"
                ))?;
                let rows = stmt
                    .query_map(params![uid], row_to_task)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            }
            None => {
                let mut stmt = self
                    .conn
                    .prepare(&format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY id ASC"))?;
                let rows = stmt
                    .query_map([], row_to_task)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            }
        };
        Ok(tasks)
    }

    pub fn get_task(&self, task_id: i64) -> Result<Option<Task>> {
        debug!("get_task {task_id}");
        let task = self
            .conn
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
                params![task_id],
                row_to_task,
            )
            .optional()?;
        Ok(task)
    }
}

/// Read the current schema version from the config table.
fn get_schema_version(conn: &Connection) -> Result<i32> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM config WHERE key = 'schema_version'",
            [],
            |row| row.get(0),
        )
        .optional()?;
    match value {
        Some(v) => v.parse::<i32>().map_err(|e| {
            Error::Store(rusqlite::Error::FromSqlConversionFailure(
                0,
                Type::Text,
                Box::new(e),
            ))
        }),
        None => Ok(0),
    }
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO config (key, value) VALUES ('schema_version', ?1)",
        params![version.to_string()],
    )?;
    Ok(())
}

/// Run all pending schema migrations in order.
///
/// Version 0 is the baseline created by `migrate()`. Each later step runs in
/// its own transaction together with the version bump.
fn run_migrations(conn: &Connection) -> Result<()> {
    let version = get_schema_version(conn)?;

    if version < 1 {
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch("CREATE INDEX IF NOT EXISTS idx_tasks_user ON tasks(user_id);")?;
        set_schema_version(&tx, 1)?;
        tx.commit()?;
        info!("migrated schema to v1");
    }

    Ok(())
}

fn parse_timestamp(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        password_hash: row.get(2)?,
        name: row.get(3)?,
    })
}

fn row_to_task(row: &Row) -> rusqlite::Result<Task> {
    let created: String = row.get(2)?;
    let completed: Option<String> = row.get(3)?;

    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        created_at: parse_timestamp(2, &created)?,
        completed_at: completed
            .as_deref()
            .map(|raw| parse_timestamp(3, raw))
            .transpose()?,
        user_id: row.get(4)?,
    })
}
