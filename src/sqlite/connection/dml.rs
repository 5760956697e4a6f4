use crate::context::OpContext;
use crate::error::{OpKind, SqlFacadeError};
use crate::query::QueryAndParams;
use crate::results::ExecOutcome;
use crate::sqlite::params::Params;
use crate::types::RowValues;

use super::SqliteConnection;

impl SqliteConnection {
    /// Execute a single DML or DDL statement with bound parameters.
    ///
    /// User values never reach the SQL text; they travel separately and the
    /// driver binds them after parsing.
    ///
    /// # Errors
    /// Returns `SqlFacadeError::ExecutionError` if the statement fails
    /// server-side, or `Cancelled` if the context signal fired mid-call.
    pub async fn execute(
        &self,
        ctx: &OpContext,
        sql: &str,
        params: &[RowValues],
    ) -> Result<ExecOutcome, SqlFacadeError> {
        self.execute_inner(ctx, sql, params).await
    }

    pub(crate) async fn execute_inner(
        &self,
        ctx: &OpContext,
        sql: &str,
        params: &[RowValues],
    ) -> Result<ExecOutcome, SqlFacadeError> {
        let converted = Params::convert(params)?;
        let sql_owned = sql.to_owned();
        self.run_blocking(ctx, OpKind::Execute, move |guard| {
            let mut stmt = guard.prepare_cached(&sql_owned)?;
            let refs = converted.as_refs();
            let affected = stmt.execute(&refs[..])?;
            drop(stmt);
            Ok(ExecOutcome::new(affected, guard.last_insert_rowid()))
        })
        .await
    }

    /// Execute a multi-statement script; wraps it in a transaction when the
    /// connection is in auto-commit mode.
    ///
    /// # Errors
    /// Returns `SqlFacadeError::ExecutionError` if any statement fails, or
    /// `Cancelled` if the context signal fired mid-call.
    pub async fn execute_batch(&self, ctx: &OpContext, sql: &str) -> Result<(), SqlFacadeError> {
        let sql_owned = sql.to_owned();
        self.run_blocking(ctx, OpKind::Execute, move |guard| {
            if guard.is_autocommit() {
                let tx = guard.transaction()?;
                tx.execute_batch(&sql_owned)?;
                tx.commit()
            } else {
                guard.execute_batch(&sql_owned)
            }
        })
        .await
    }

    /// Execute an ordered batch of DML inside one implicit transaction.
    ///
    /// Either every statement commits or none does. Parameters are converted
    /// up front so a bad value fails before anything touches the database.
    ///
    /// # Errors
    /// Returns `SqlFacadeError::ParameterError` on a bad parameter,
    /// `ExecutionError` if any statement fails (the whole batch rolls back),
    /// or `Cancelled` if the context signal fired mid-call.
    pub async fn execute_many(
        &self,
        ctx: &OpContext,
        queries: &[QueryAndParams],
    ) -> Result<Vec<ExecOutcome>, SqlFacadeError> {
        let mut converted = Vec::with_capacity(queries.len());
        for qp in queries {
            converted.push((qp.query.clone(), Params::convert(&qp.params)?));
        }
        self.run_blocking(ctx, OpKind::Execute, move |guard| {
            let tx = guard.transaction()?;
            let mut outcomes = Vec::with_capacity(converted.len());
            for (sql, params) in &converted {
                let mut stmt = tx.prepare_cached(sql)?;
                let refs = params.as_refs();
                let affected = stmt.execute(&refs[..])?;
                drop(stmt);
                outcomes.push(ExecOutcome::new(affected, tx.last_insert_rowid()));
            }
            tx.commit()?;
            Ok(outcomes)
        })
        .await
    }
}
