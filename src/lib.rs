//! # blogseed
//!
//! Synthetic blog data for PostgreSQL test databases.
//!
//! blogseed generates authors, articles and comments with realistic fake
//! content, renders them as a single SQL script of multi-row `INSERT`
//! statements, checks such scripts for dangling references, and loads them
//! into a running database.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - the database populator and populate command
//!
//! ## Quick Start
//!
//! ```
//! use blogseed::prelude::*;
//! use chrono::NaiveDate;
//!
//! let now = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let config = GenerationConfig::new()
//!     .with_authors(2)
//!     .with_articles(4)
//!     .with_comments(8)
//!     .with_seed(7)
//!     .with_reference_time(now);
//!
//! let result = GenerateCommand::new().execute(GenerateOptions::new().with_config(config))?;
//! let report = ReferenceVerifier::new().verify_str(&result.sql)?;
//! assert!(report.is_valid());
//! # Ok::<(), SeedingError>(())
//! ```
//!
//! The `blogseed` binary in the `blogseed-cli` crate exposes the same
//! operations as `generate`, `verify` and `populate` subcommands.

pub use blogseed_seeding::{
	Article, Author, BlogData, BlogDataGenerator, Comment, Factory, FakerType, GenerationConfig,
	ReferenceVerifier, SeedingError, SeedingResult, SqlSerializer, UniqueAllocator,
	VerificationReport,
};
pub use blogseed_seeding::{commands, config, factory, generator, loader, models, sql, verify};

/// Convenience re-exports for common usage.
pub mod prelude {
	pub use blogseed_seeding::prelude::*;
}
