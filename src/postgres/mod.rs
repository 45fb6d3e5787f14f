// PostgreSQL backend
//
// - config: pool setup and the development defaults
// - params: binding `RowValues` as tokio-postgres parameters
// - query: turning tokio-postgres rows into a `ResultSet`
// - executor: running statements on a pooled client

pub mod config;
pub mod executor;
pub mod params;
pub mod query;

pub use config::lightbnb_pg_config;
pub use executor::{execute_batch, execute_select};
pub use params::Params;
pub use query::{build_result_set, postgres_extract_value};
