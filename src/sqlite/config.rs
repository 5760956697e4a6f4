use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SqlFacadeError;
use crate::sqlite::connection::SqliteConnection;

/// Options for opening a `SQLite` connection.
///
/// Connection parameters are owned by external configuration, so the options
/// deserialize from JSON as-is:
/// ```rust
/// use sql_facade::sqlite::SqliteOptions;
///
/// let opts = SqliteOptions::from_json(
///     r#"{ "db_path": ":memory:", "busy_timeout_ms": 5000 }"#,
/// ).unwrap();
/// # let _ = opts;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqliteOptions {
    /// Path to the database file, or `:memory:` for an in-memory database.
    pub db_path: String,
    /// PRAGMA busy_timeout, in milliseconds. Zero disables the busy handler.
    #[serde(default)]
    pub busy_timeout_ms: u64,
    /// Whether to switch the journal to WAL mode on open.
    #[serde(default)]
    pub journal_wal: bool,
}

impl SqliteOptions {
    #[must_use]
    pub fn new(db_path: String) -> Self {
        Self {
            db_path,
            busy_timeout_ms: 0,
            journal_wal: false,
        }
    }

    /// Parse options from a JSON document.
    ///
    /// # Errors
    /// Returns `SqlFacadeError::ConfigError` if the document does not parse.
    pub fn from_json(json: &str) -> Result<Self, SqlFacadeError> {
        serde_json::from_str(json)
            .map_err(|e| SqlFacadeError::ConfigError(format!("invalid options JSON: {e}")))
    }
}

/// Fluent builder for `SQLite` options.
#[derive(Debug, Clone)]
pub struct SqliteOptionsBuilder {
    opts: SqliteOptions,
}

impl SqliteOptionsBuilder {
    #[must_use]
    pub fn new(db_path: String) -> Self {
        Self {
            opts: SqliteOptions::new(db_path),
        }
    }

    #[must_use]
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.opts.busy_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn journal_wal(mut self, journal_wal: bool) -> Self {
        self.opts.journal_wal = journal_wal;
        self
    }

    #[must_use]
    pub fn finish(self) -> SqliteOptions {
        self.opts
    }

    /// Open a connection with these options.
    ///
    /// # Errors
    /// Returns `SqlFacadeError::ConnectionError` if the database cannot be
    /// opened or the open-time pragmas fail.
    pub async fn open(self) -> Result<SqliteConnection, SqlFacadeError> {
        SqliteConnection::open(self.finish()).await
    }
}

impl SqliteConnection {
    #[must_use]
    pub fn builder(db_path: String) -> SqliteOptionsBuilder {
        SqliteOptionsBuilder::new(db_path)
    }
}
