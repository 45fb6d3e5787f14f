//! Async data-access layer for the LightBnB property-rental listings.
//!
//! The centre of the crate is [`search::build_property_search`], which turns an optional set
//! of filters into one parameterized statement whose `$N` placeholders line up with its
//! parameter list by construction. [`store::LightBnbStore`] runs that statement, plus the
//! fixed-shape user, property and reservation statements, through an injected
//! [`executor::QueryExecutor`]: a Postgres or SQLite [`pool::ConfigAndPool`] in production, or
//! anything else that implements the trait.

pub mod error;
pub mod executor;
pub mod models;
pub mod pool;
pub mod prelude;
pub mod results;
pub mod search;
pub mod statement;
pub mod store;
pub mod translation;
pub mod types;

#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use error::StoreError;
