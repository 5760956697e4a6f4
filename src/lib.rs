//! Async, connection-scoped SQL facade over `rusqlite`.
//!
//! One [`SqliteConnection`] per logical session: execute DML with bound
//! parameters, run queries through a single-pass [`RowCursor`], reuse
//! [`PreparedStatement`]s across parameter sets, and scope work in a [`Tx`]
//! that must commit or roll back exactly once. Every operation takes an
//! [`OpContext`] carrying an optional deadline or cancellation token that
//! aborts the in-flight statement.
//!
//! ```no_run
//! use sql_facade::prelude::*;
//!
//! # async fn demo() -> Result<(), SqlFacadeError> {
//! let ctx = OpContext::background();
//! let conn = SqliteConnection::builder(":memory:".into()).open().await?;
//!
//! conn.execute_batch(&ctx, "CREATE TABLE comments (id INTEGER PRIMARY KEY, email TEXT, comment TEXT);")
//!     .await?;
//! let outcome = conn
//!     .execute(
//!         &ctx,
//!         "INSERT INTO comments (email, comment) VALUES (?1, ?2)",
//!         &[RowValues::Text("a@b.com".into()), RowValues::Text("hi".into())],
//!     )
//!     .await?;
//! assert!(outcome.last_insert_id > 0);
//! conn.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod error;
pub mod executor;
pub mod query;
pub mod results;
pub mod sqlite;
pub mod types;

pub mod prelude;

pub use context::OpContext;
pub use error::SqlFacadeError;
pub use executor::SqlExecutor;
pub use query::QueryAndParams;
pub use results::{ExecOutcome, ResultSet, Row, RowCursor};
pub use sqlite::{PreparedStatement, SqliteConnection, SqliteOptions, Tx};
pub use types::RowValues;
