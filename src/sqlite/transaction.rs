use std::sync::Arc;

use crate::context::OpContext;
use crate::error::{OpKind, SqlFacadeError};
use crate::results::{ExecOutcome, RowCursor};
use crate::types::RowValues;

use super::connection::SqliteConnection;

/// Transaction handle that owns the connection until completion.
///
/// Exactly one of [`commit`] or [`rollback`] terminates a transaction; both
/// consume the handle and hand the connection back, so a statement after
/// termination does not compile. Statements executed here are invisible to
/// other sessions until commit and discarded entirely on rollback.
///
/// Dropping an open transaction rolls it back best-effort on the current
/// runtime.
///
/// [`commit`]: Tx::commit
/// [`rollback`]: Tx::rollback
pub struct Tx {
    conn: Option<SqliteConnection>,
}

/// Prepared statement scoped to a transaction.
pub struct Prepared {
    sql: Arc<String>,
}

/// Begin a transaction, consuming the connection until commit or rollback.
///
/// # Errors
/// Returns `SqlFacadeError::ExecutionError` if the transaction cannot be
/// started (the connection is dropped in that case).
pub async fn begin_transaction(
    conn: SqliteConnection,
    ctx: &OpContext,
) -> Result<Tx, SqlFacadeError> {
    conn.begin_tx(ctx).await?;
    tracing::debug!("transaction started");
    Ok(Tx { conn: Some(conn) })
}

impl SqliteConnection {
    /// Begin a transaction; see [`begin_transaction`].
    ///
    /// # Errors
    /// Returns `SqlFacadeError::ExecutionError` if the transaction cannot be
    /// started.
    pub async fn begin(self, ctx: &OpContext) -> Result<Tx, SqlFacadeError> {
        begin_transaction(self, ctx).await
    }
}

impl Tx {
    fn conn_ref(&self) -> Result<&SqliteConnection, SqlFacadeError> {
        self.conn.as_ref().ok_or_else(|| {
            SqlFacadeError::ExecutionError("transaction already completed".into())
        })
    }

    /// Execute a DML statement inside this transaction.
    ///
    /// # Errors
    /// Returns `SqlFacadeError::ExecutionError` on statement failure or
    /// `Cancelled` on a fired context signal.
    pub async fn execute(
        &mut self,
        ctx: &OpContext,
        sql: &str,
        params: &[RowValues],
    ) -> Result<ExecOutcome, SqlFacadeError> {
        self.conn_ref()?.execute_inner(ctx, sql, params).await
    }

    /// Run a query inside this transaction, observing its uncommitted writes.
    ///
    /// # Errors
    /// Returns `SqlFacadeError::QueryError` on query failure or `Cancelled`
    /// on a fired context signal.
    pub async fn query(
        &mut self,
        ctx: &OpContext,
        sql: &str,
        params: &[RowValues],
    ) -> Result<RowCursor, SqlFacadeError> {
        let rs = self.conn_ref()?.query_result_set(ctx, sql, params).await?;
        Ok(RowCursor::new(rs))
    }

    /// Execute a multi-statement script inside this transaction, without an
    /// implicit commit.
    ///
    /// # Errors
    /// Returns `SqlFacadeError::ExecutionError` if any statement fails.
    pub async fn execute_batch(
        &mut self,
        ctx: &OpContext,
        sql: &str,
    ) -> Result<(), SqlFacadeError> {
        self.conn_ref()?.execute_batch(ctx, sql).await
    }

    /// Prepare a statement scoped to this transaction.
    ///
    /// Compiles the template up front, same as the connection-level
    /// `prepare`: bad SQL fails here, not at first execute.
    ///
    /// # Errors
    /// Returns `SqlFacadeError::ExecutionError` if the SQL does not compile
    /// or the transaction has already completed, or `Cancelled` if the
    /// context signal fired mid-call.
    pub async fn prepare(&self, ctx: &OpContext, sql: &str) -> Result<Prepared, SqlFacadeError> {
        let conn = self.conn_ref()?;
        let sql_arc = Arc::new(sql.to_owned());
        let warm = Arc::clone(&sql_arc);
        conn.run_blocking(ctx, OpKind::Execute, move |guard| {
            let _ = guard.prepare_cached(warm.as_ref())?;
            Ok(())
        })
        .await?;
        Ok(Prepared { sql: sql_arc })
    }

    /// Execute a prepared statement as DML within this transaction.
    ///
    /// # Errors
    /// Returns `SqlFacadeError::ExecutionError` on failure or `Cancelled` on
    /// a fired context signal.
    pub async fn execute_prepared(
        &mut self,
        ctx: &OpContext,
        prepared: &Prepared,
        params: &[RowValues],
    ) -> Result<ExecOutcome, SqlFacadeError> {
        self.conn_ref()?
            .execute_inner(ctx, prepared.sql.as_ref(), params)
            .await
    }

    /// Execute a prepared statement as a query within this transaction.
    ///
    /// # Errors
    /// Returns `SqlFacadeError::QueryError` on failure or `Cancelled` on a
    /// fired context signal.
    pub async fn query_prepared(
        &mut self,
        ctx: &OpContext,
        prepared: &Prepared,
        params: &[RowValues],
    ) -> Result<RowCursor, SqlFacadeError> {
        let rs = self
            .conn_ref()?
            .query_result_set(ctx, prepared.sql.as_ref(), params)
            .await?;
        Ok(RowCursor::new(rs))
    }

    /// Commit and hand the connection back.
    ///
    /// # Errors
    /// Returns `SqlFacadeError::ExecutionError` if committing fails; the
    /// connection is dropped in that case.
    pub async fn commit(mut self, ctx: &OpContext) -> Result<SqliteConnection, SqlFacadeError> {
        let conn = self.conn.take().ok_or_else(|| {
            SqlFacadeError::ExecutionError("transaction already completed".into())
        })?;
        conn.commit_tx(ctx).await?;
        tracing::debug!("transaction committed");
        Ok(conn)
    }

    /// Roll back, discarding every statement executed under the transaction,
    /// and hand the connection back.
    ///
    /// # Errors
    /// Returns `SqlFacadeError::ExecutionError` if rolling back fails; the
    /// connection is dropped in that case.
    pub async fn rollback(mut self, ctx: &OpContext) -> Result<SqliteConnection, SqlFacadeError> {
        let conn = self.conn.take().ok_or_else(|| {
            SqlFacadeError::ExecutionError("transaction already completed".into())
        })?;
        conn.rollback_tx(ctx).await?;
        tracing::debug!("transaction rolled back");
        Ok(conn)
    }
}

impl Drop for Tx {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take()
            && let Ok(handle) = tokio::runtime::Handle::try_current()
        {
            handle.spawn(async move {
                if let Err(e) = conn.rollback_tx(&OpContext::background()).await {
                    tracing::warn!("rollback on drop failed: {e}");
                }
            });
        }
    }
}
