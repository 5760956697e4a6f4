use thiserror::Error;

/// Unified error type for every facade operation.
#[derive(Debug, Error)]
pub enum SqlFacadeError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Parameter conversion error: {0}")]
    ParameterError(String),

    #[error("Operation cancelled: {0}")]
    Cancelled(String),
}

/// How a driver error should be surfaced when it is not an interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OpKind {
    Execute,
    Query,
    Connect,
}

/// Map a raw driver error onto the facade's error kinds.
///
/// SQLITE_INTERRUPT only shows up here when the cancellation path fired the
/// interrupt handle mid-statement, so it is reported as `Cancelled` no matter
/// which operation was in flight.
pub(crate) fn classify_driver_error(kind: OpKind, err: &rusqlite::Error) -> SqlFacadeError {
    if is_interrupt(err) {
        return SqlFacadeError::Cancelled("statement interrupted by deadline or cancel".into());
    }
    match kind {
        OpKind::Execute => SqlFacadeError::ExecutionError(err.to_string()),
        OpKind::Query => SqlFacadeError::QueryError(err.to_string()),
        OpKind::Connect => SqlFacadeError::ConnectionError(err.to_string()),
    }
}

pub(crate) fn is_interrupt(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::OperationInterrupted
    )
}
