//! Commands behind the `blogseed` binary.
//!
//! - [`GenerateCommand`] renders synthetic data as a SQL script
//! - [`VerifyCommand`] checks a script's foreign keys
//! - [`PopulateCommand`] loads a script into PostgreSQL (feature `postgres`)

mod generate;
#[cfg(feature = "postgres")]
mod populate;
mod verify;

pub use generate::{GenerateCommand, GenerateOptions, GenerateResult};
#[cfg(feature = "postgres")]
pub use populate::{PopulateCommand, PopulateOptions, PopulateResult};
pub use verify::{VerifyArgs, VerifyCommand};
