use async_trait::async_trait;

use crate::context::OpContext;
use crate::error::SqlFacadeError;
use crate::results::{ExecOutcome, RowCursor};
use crate::sqlite::{SqliteConnection, Tx};
use crate::types::RowValues;

/// Common statement surface shared by a bare connection and an open
/// transaction, so the same caller code runs in either mode.
#[async_trait]
pub trait SqlExecutor {
    /// Execute a DML/DDL statement with bound parameters.
    async fn execute(
        &mut self,
        ctx: &OpContext,
        sql: &str,
        params: &[RowValues],
    ) -> Result<ExecOutcome, SqlFacadeError>;

    /// Run a query with bound parameters.
    async fn query(
        &mut self,
        ctx: &OpContext,
        sql: &str,
        params: &[RowValues],
    ) -> Result<RowCursor, SqlFacadeError>;

    /// Execute a multi-statement script.
    async fn execute_batch(&mut self, ctx: &OpContext, sql: &str)
    -> Result<(), SqlFacadeError>;
}

#[async_trait]
impl SqlExecutor for SqliteConnection {
    async fn execute(
        &mut self,
        ctx: &OpContext,
        sql: &str,
        params: &[RowValues],
    ) -> Result<ExecOutcome, SqlFacadeError> {
        SqliteConnection::execute(self, ctx, sql, params).await
    }

    async fn query(
        &mut self,
        ctx: &OpContext,
        sql: &str,
        params: &[RowValues],
    ) -> Result<RowCursor, SqlFacadeError> {
        SqliteConnection::query(self, ctx, sql, params).await
    }

    async fn execute_batch(
        &mut self,
        ctx: &OpContext,
        sql: &str,
    ) -> Result<(), SqlFacadeError> {
        SqliteConnection::execute_batch(self, ctx, sql).await
    }
}

#[async_trait]
impl SqlExecutor for Tx {
    async fn execute(
        &mut self,
        ctx: &OpContext,
        sql: &str,
        params: &[RowValues],
    ) -> Result<ExecOutcome, SqlFacadeError> {
        Tx::execute(self, ctx, sql, params).await
    }

    async fn query(
        &mut self,
        ctx: &OpContext,
        sql: &str,
        params: &[RowValues],
    ) -> Result<RowCursor, SqlFacadeError> {
        Tx::query(self, ctx, sql, params).await
    }

    async fn execute_batch(
        &mut self,
        ctx: &OpContext,
        sql: &str,
    ) -> Result<(), SqlFacadeError> {
        Tx::execute_batch(self, ctx, sql).await
    }
}
