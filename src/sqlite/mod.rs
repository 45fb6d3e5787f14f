// SQLite backend
//
// - config: pool setup
// - params: binding `RowValues` as rusqlite values
// - query: turning rusqlite rows into a `ResultSet`
// - executor: running statements on a pooled connection's worker thread

pub mod config;
pub mod executor;
pub mod params;
pub mod query;

pub use config::SqliteOptions;
pub use executor::{execute_batch, execute_select};
pub use params::Params;
pub use query::build_result_set;
