//! Convenience re-exports for common usage.
//!
//! ```
//! use blogseed_seeding::prelude::*;
//! ```

// Error types
pub use crate::error::{SeedingError, SeedingResult};

// Data model
pub use crate::models::{Article, Author, BlogData, Comment};

// Generation
pub use crate::config::GenerationConfig;
pub use crate::factory::{
	ArticleFactory, AuthorFactory, CommentFactory, Factory, FakerType, UniqueAllocator,
};
pub use crate::generator::BlogDataGenerator;

// SQL rendering and checking
pub use crate::loader::split_statements;
pub use crate::sql::SqlSerializer;
pub use crate::verify::{ReferenceVerifier, VerificationReport, Violation};

// Command types
pub use crate::commands::{
	GenerateCommand, GenerateOptions, GenerateResult, VerifyArgs, VerifyCommand,
};

#[cfg(feature = "postgres")]
pub use crate::commands::{PopulateCommand, PopulateOptions, PopulateResult};
#[cfg(feature = "postgres")]
pub use crate::loader::{ConnectionConfig, DatabasePopulator, ExecutionReport};
