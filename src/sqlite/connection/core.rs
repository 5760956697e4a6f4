use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::context::OpContext;
use crate::error::{OpKind, SqlFacadeError, classify_driver_error};
use crate::sqlite::config::SqliteOptions;

pub(crate) type SharedSqliteConnection = Arc<Mutex<rusqlite::Connection>>;

/// One logical `SQLite` session, exclusively owned by the caller.
///
/// Every operation runs its driver call on `spawn_blocking` behind the
/// connection mutex, so a shared reference is safe to use from async code; the
/// mutex serializes statements. The connection is created by [`open`] and
/// destroyed by [`close`] — both consume or produce the handle, so
/// use-after-close does not compile.
///
/// [`open`]: SqliteConnection::open
/// [`close`]: SqliteConnection::close
pub struct SqliteConnection {
    pub(crate) conn: SharedSqliteConnection,
    interrupt: rusqlite::InterruptHandle,
}

impl SqliteConnection {
    /// Open a connection and apply the open-time pragmas.
    ///
    /// # Errors
    /// Returns `SqlFacadeError::ConnectionError` if the database cannot be
    /// opened or a pragma fails.
    pub async fn open(opts: SqliteOptions) -> Result<Self, SqlFacadeError> {
        let db_path = opts.db_path.clone();
        let conn = tokio::task::spawn_blocking(move || {
            let conn = rusqlite::Connection::open(&opts.db_path)?;
            if opts.busy_timeout_ms > 0 {
                conn.busy_timeout(Duration::from_millis(opts.busy_timeout_ms))?;
            }
            if opts.journal_wal {
                conn.execute_batch("PRAGMA journal_mode = WAL;")?;
            }
            Ok::<_, rusqlite::Error>(conn)
        })
        .await
        .map_err(|e| SqlFacadeError::ConnectionError(format!("open task failed: {e}")))?
        .map_err(|e| classify_driver_error(OpKind::Connect, &e))?;

        tracing::debug!(%db_path, "sqlite connection opened");
        let interrupt = conn.get_interrupt_handle();
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            interrupt,
        })
    }

    /// Close the connection, releasing the driver handle.
    ///
    /// # Errors
    /// Returns `SqlFacadeError::ConnectionError` if the driver reports a
    /// failure while closing, or if an in-flight operation still holds the
    /// handle.
    pub async fn close(self) -> Result<(), SqlFacadeError> {
        let Self { conn, .. } = self;
        tokio::task::spawn_blocking(move || match Arc::try_unwrap(conn) {
            Ok(mutex) => mutex
                .into_inner()
                .close()
                .map_err(|(_conn, e)| {
                    SqlFacadeError::ConnectionError(format!("close failed: {e}"))
                }),
            Err(_) => Err(SqlFacadeError::ConnectionError(
                "connection still in use; close aborted".into(),
            )),
        })
        .await
        .map_err(|e| SqlFacadeError::ConnectionError(format!("close task failed: {e}")))??;
        tracing::debug!("sqlite connection closed");
        Ok(())
    }

    /// Run a driver call on the blocking pool under the connection mutex,
    /// racing it against the context's cancellation signal.
    ///
    /// Two phases, so concurrent operations on the same connection cannot
    /// cancel each other: first the mutex is acquired asynchronously, racing
    /// the context signal — a signal that wins here returns `Cancelled`
    /// without touching the driver (some other operation's statement may be
    /// running). Only once this operation's statement owns the guard does the
    /// interrupt handle come into play; a signal that fires then aborts the
    /// statement inside the driver. A call that completed before the signal
    /// was observed returns its result unchanged.
    pub(crate) async fn run_blocking<F, R>(
        &self,
        ctx: &OpContext,
        kind: OpKind,
        func: F,
    ) -> Result<R, SqlFacadeError>
    where
        F: FnOnce(&mut rusqlite::Connection) -> Result<R, rusqlite::Error> + Send + 'static,
        R: Send + 'static,
    {
        ctx.check()?;
        let guard = tokio::select! {
            guard = Arc::clone(&self.conn).lock_owned() => guard,
            () = ctx.cancelled() => {
                return Err(SqlFacadeError::Cancelled(
                    "context cancelled while waiting for connection".into(),
                ));
            }
        };
        let mut join = tokio::task::spawn_blocking(move || {
            let mut guard = guard;
            func(&mut guard)
        });

        let result = tokio::select! {
            // Prefer a finished statement over a racing signal, so the
            // interrupt only ever targets this operation's statement.
            biased;
            res = &mut join => res,
            () = ctx.cancelled() => {
                tracing::debug!("cancellation signal fired; interrupting statement");
                self.interrupt.interrupt();
                // The interrupted task still has to unwind out of the driver.
                join.await
            }
        };

        match result {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(driver_err)) => Err(classify_driver_error(kind, &driver_err)),
            Err(join_err) => Err(SqlFacadeError::ExecutionError(format!(
                "blocking task failed: {join_err}"
            ))),
        }
    }
}

impl fmt::Debug for SqliteConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteConnection")
            .field("conn", &Arc::strong_count(&self.conn))
            .finish_non_exhaustive()
    }
}
