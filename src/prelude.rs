//! Convenient imports for common functionality.

pub use crate::context::OpContext;
pub use crate::error::SqlFacadeError;
pub use crate::executor::SqlExecutor;
pub use crate::query::QueryAndParams;
pub use crate::results::{ExecOutcome, ResultSet, Row, RowCursor};
pub use crate::sqlite::{
    PreparedStatement, SqliteConnection, SqliteOptions, SqliteOptionsBuilder, Tx,
    begin_transaction,
};
pub use crate::types::RowValues;
