// SQLite backend, split the same way the operations group:
// - config: open-time options and the fluent builder
// - connection: the facade itself (lifecycle, DML, SELECT, prepare, raw tx)
// - params: RowValues-to-driver parameter conversion
// - query: result extraction into a ResultSet
// - prepared: the reusable statement handle
// - transaction: the owning Tx handle

pub mod config;
pub mod connection;
pub mod params;
pub mod prepared;
pub mod query;
pub mod transaction;

pub use config::{SqliteOptions, SqliteOptionsBuilder};
pub use connection::SqliteConnection;
pub use params::Params;
pub use prepared::PreparedStatement;
pub use query::build_result_set;
pub use transaction::{Prepared, Tx, begin_transaction};
