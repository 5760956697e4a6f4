use crate::context::OpContext;
use crate::error::{OpKind, SqlFacadeError};
use crate::results::{ResultSet, RowCursor};
use crate::sqlite::params::Params;
use crate::sqlite::query::build_result_set;
use crate::types::RowValues;

use super::SqliteConnection;

impl SqliteConnection {
    /// Run a SELECT with bound parameters and return a single-pass cursor
    /// over its rows.
    ///
    /// # Errors
    /// Returns `SqlFacadeError::QueryError` if the query fails or a row
    /// cannot be decoded, or `Cancelled` if the context signal fired
    /// mid-call.
    pub async fn query(
        &self,
        ctx: &OpContext,
        sql: &str,
        params: &[RowValues],
    ) -> Result<RowCursor, SqlFacadeError> {
        Ok(RowCursor::new(self.query_result_set(ctx, sql, params).await?))
    }

    pub(crate) async fn query_result_set(
        &self,
        ctx: &OpContext,
        sql: &str,
        params: &[RowValues],
    ) -> Result<ResultSet, SqlFacadeError> {
        let converted = Params::convert(params)?;
        let sql_owned = sql.to_owned();
        self.run_blocking(ctx, OpKind::Query, move |guard| {
            let mut stmt = guard.prepare(&sql_owned)?;
            build_result_set(&mut stmt, converted.as_values())
        })
        .await
    }
}
