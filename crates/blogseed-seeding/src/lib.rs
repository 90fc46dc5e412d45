//! Synthetic blog data generation for PostgreSQL test databases.
//!
//! This crate produces authors, articles and comments with realistic fake
//! content, renders them as one SQL script, and checks or loads such scripts:
//!
//! - **Generation**: reproducible factories driven by one seeded RNG
//! - **Serialization**: multi-row `INSERT` statements in dependency order
//! - **Verification**: foreign key checks over a rendered script
//! - **Loading**: statement-by-statement execution against PostgreSQL
//!
//! # Features
//!
//! - `postgres` - [`loader::DatabasePopulator`] and the populate command
//!   (enabled by default)
//!
//! # Quick Start
//!
//! ```
//! use blogseed_seeding::prelude::*;
//!
//! let config = GenerationConfig::new()
//!     .with_authors(3)
//!     .with_articles(5)
//!     .with_comments(10)
//!     .with_seed(42)
//!     .with_published_ratio(1.0);
//!
//! let mut generator = BlogDataGenerator::from_config(&config);
//! let data = generator.generate(&config)?;
//! let sql = SqlSerializer::new(generator.now()).serialize(&data)?;
//!
//! let report = ReferenceVerifier::new().verify_str(&sql)?;
//! assert!(report.is_valid());
//! assert_eq!(report.article_count, 5);
//! # Ok::<(), SeedingError>(())
//! ```
//!
//! # Architecture
//!
//! - [`factory`] - per-entity factories and the unique value allocator
//! - [`generator`] - [`BlogDataGenerator`], which runs the factories in order
//! - [`sql`] - [`SqlSerializer`] and literal rendering
//! - [`verify`] - [`ReferenceVerifier`] and the `INSERT` block scanner
//! - [`loader`] - statement splitting and the PostgreSQL populator
//! - [`commands`] - the operations behind the `blogseed` binary

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod commands;
pub mod config;
pub mod error;
pub mod factory;
pub mod generator;
pub mod loader;
pub mod models;
pub mod prelude;
pub mod sql;
pub mod verify;

// Re-export commonly used types at crate root
pub use config::GenerationConfig;
pub use error::{SeedingError, SeedingResult};
pub use factory::{Factory, FakerType, UniqueAllocator};
pub use generator::BlogDataGenerator;
pub use models::{Article, Author, BlogData, Comment};
pub use sql::SqlSerializer;
pub use verify::{ReferenceVerifier, VerificationReport};
