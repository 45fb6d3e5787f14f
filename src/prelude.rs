//! Convenient imports for common functionality.

pub use crate::error::StoreError;
pub use crate::executor::QueryExecutor;
pub use crate::models::{GuestReservation, NewProperty, NewUser, Property, Reservation, User};
pub use crate::pool::{ConfigAndPool, StorePool};
pub use crate::results::{CustomDbRow, ResultSet};
pub use crate::search::{DEFAULT_SEARCH_LIMIT, PropertySearch, build_property_search};
pub use crate::statement::{BuiltStatement, StatementBuilder};
pub use crate::store::LightBnbStore;
pub use crate::translation::to_sqlite_placeholders;
pub use crate::types::{DatabaseType, RowValues};

#[cfg(feature = "postgres")]
pub use crate::postgres::lightbnb_pg_config;
#[cfg(feature = "sqlite")]
pub use crate::sqlite::SqliteOptions;
