use crate::context::OpContext;
use crate::error::{OpKind, SqlFacadeError};

use super::SqliteConnection;

// Raw BEGIN/COMMIT/ROLLBACK, driven only by `crate::sqlite::transaction::Tx`.
// The public transaction type owns the connection for its whole lifetime, so
// these never race a competing statement from the same caller.
impl SqliteConnection {
    pub(crate) async fn begin_tx(&self, ctx: &OpContext) -> Result<(), SqlFacadeError> {
        let began = self
            .run_blocking(ctx, OpKind::Execute, |guard| {
                if !guard.is_autocommit() {
                    return Ok(false);
                }
                guard.execute_batch("BEGIN")?;
                Ok(true)
            })
            .await?;
        if began {
            Ok(())
        } else {
            Err(SqlFacadeError::ExecutionError(
                "cannot begin: transaction already in progress".into(),
            ))
        }
    }

    pub(crate) async fn commit_tx(&self, ctx: &OpContext) -> Result<(), SqlFacadeError> {
        self.run_blocking(ctx, OpKind::Execute, |guard| guard.execute_batch("COMMIT"))
            .await
    }

    pub(crate) async fn rollback_tx(&self, ctx: &OpContext) -> Result<(), SqlFacadeError> {
        self.run_blocking(ctx, OpKind::Execute, |guard| guard.execute_batch("ROLLBACK"))
            .await
    }
}
