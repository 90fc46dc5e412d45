//! Factories for the blog entities.
//!
//! Each factory builds one record per call from an explicitly passed RNG.
//! Child factories are constructed from the id pool of their parent entity,
//! which is what keeps references valid by construction:
//!
//! ```
//! use blogseed_seeding::factory::{ArticleFactory, AuthorFactory, CommentFactory, Factory};
//! use chrono::NaiveDate;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let now = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let authors = AuthorFactory::new(now).build_batch(&mut rng, 3);
//! let author_ids: Vec<_> = authors.iter().map(|a| a.id).collect();
//!
//! let articles = ArticleFactory::new(&author_ids, 0.7, now)?.build_batch(&mut rng, 5);
//! let article_ids: Vec<_> = articles.iter().map(|a| a.id).collect();
//!
//! let comments = CommentFactory::new(&article_ids, now)?.build_batch(&mut rng, 10);
//! assert_eq!(comments.len(), 10);
//! # Ok::<(), blogseed_seeding::SeedingError>(())
//! ```

mod article;
mod author;
mod comment;
pub mod faker;
mod unique;

use rand::Rng;

pub use article::{ArticleFactory, TITLE_PATTERNS, TOPICS};
pub use author::AuthorFactory;
pub use comment::{COMMENT_TEMPLATES, CommentFactory};
pub use faker::FakerType;
pub use unique::UniqueAllocator;

/// Core factory interface.
pub trait Factory {
	/// The record type this factory produces.
	type Model;

	/// Builds a single record.
	fn build<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Self::Model;

	/// Builds `count` records in generation order.
	fn build_batch<R: Rng + ?Sized>(&mut self, rng: &mut R, count: usize) -> Vec<Self::Model> {
		let mut records = Vec::with_capacity(count);
		for _ in 0..count {
			records.push(self.build(rng));
		}
		records
	}
}
