// Query result types: materialized rows, the single-pass cursor handed to
// callers, and DML outcomes.

mod cursor;
mod outcome;
mod result_set;
mod row;

pub use cursor::RowCursor;
pub use outcome::ExecOutcome;
pub use result_set::ResultSet;
pub use row::Row;
