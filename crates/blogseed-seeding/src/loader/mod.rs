//! Loading generated SQL into a database.
//!
//! [`split_statements`] is always available. The PostgreSQL
//! [`DatabasePopulator`] requires the `postgres` feature.

mod splitter;

#[cfg(feature = "postgres")]
mod populator;

pub use splitter::split_statements;

#[cfg(feature = "postgres")]
pub use populator::{
	ConnectionConfig, DEFAULT_CONNECT_TIMEOUT, DatabasePopulator, ExecutionReport, TABLES,
	is_tolerable,
};
