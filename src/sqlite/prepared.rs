use std::sync::Arc;

use crate::context::OpContext;
use crate::error::SqlFacadeError;
use crate::results::{ExecOutcome, RowCursor};
use crate::types::RowValues;

use super::connection::SqliteConnection;

/// Handle to a prepared statement on a live connection.
///
/// The template is compiled once; each [`execute`]/[`query`] call binds a
/// fresh parameter set and is independently fallible. The handle borrows the
/// connection, so the connection cannot be closed or moved into a transaction
/// while a statement is outstanding.
///
/// [`execute`]: PreparedStatement::execute
/// [`query`]: PreparedStatement::query
#[derive(Debug, Clone)]
pub struct PreparedStatement<'conn> {
    connection: &'conn SqliteConnection,
    sql: Arc<String>,
}

impl<'conn> PreparedStatement<'conn> {
    pub(crate) fn new(connection: &'conn SqliteConnection, sql: Arc<String>) -> Self {
        Self { connection, sql }
    }

    /// Execute as DML with this parameter set.
    ///
    /// # Errors
    /// Returns `SqlFacadeError::ExecutionError` if the statement fails, or
    /// `Cancelled` if the context signal fired mid-call.
    pub async fn execute(
        &self,
        ctx: &OpContext,
        params: &[RowValues],
    ) -> Result<ExecOutcome, SqlFacadeError> {
        self.connection.execute_inner(ctx, &self.sql, params).await
    }

    /// Execute as a query with this parameter set.
    ///
    /// # Errors
    /// Returns `SqlFacadeError::QueryError` if the query fails, or
    /// `Cancelled` if the context signal fired mid-call.
    pub async fn query(
        &self,
        ctx: &OpContext,
        params: &[RowValues],
    ) -> Result<RowCursor, SqlFacadeError> {
        self.connection.query(ctx, &self.sql, params).await
    }

    /// The raw SQL template of this statement.
    #[must_use]
    pub fn sql(&self) -> &str {
        self.sql.as_str()
    }

    /// Release the handle. The compiled statement stays in the driver's LRU
    /// cache until evicted; dropping the handle is equivalent.
    pub fn close(self) {
        drop(self);
    }
}
