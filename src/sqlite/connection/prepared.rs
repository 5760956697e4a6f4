use std::sync::Arc;

use crate::context::OpContext;
use crate::error::{OpKind, SqlFacadeError};
use crate::sqlite::prepared::PreparedStatement;

use super::SqliteConnection;

impl SqliteConnection {
    /// Compile a parameterized template once for repeated execution.
    ///
    /// The statement is warmed into the driver's cache, so each later
    /// execution binds a fresh parameter set against the already-compiled
    /// statement. The handle borrows this connection; it is released when
    /// dropped (or via [`PreparedStatement::close`]).
    ///
    /// # Errors
    /// Returns `SqlFacadeError::ExecutionError` if the SQL does not compile,
    /// or `Cancelled` if the context signal fired mid-call.
    pub async fn prepare(
        &self,
        ctx: &OpContext,
        sql: &str,
    ) -> Result<PreparedStatement<'_>, SqlFacadeError> {
        let sql_arc = Arc::new(sql.to_owned());
        let warm = Arc::clone(&sql_arc);
        self.run_blocking(ctx, OpKind::Execute, move |guard| {
            // Compile now so bad SQL fails at prepare time, not first execute.
            let _ = guard.prepare_cached(warm.as_ref())?;
            Ok(())
        })
        .await?;
        Ok(PreparedStatement::new(self, sql_arc))
    }
}
