//! The end-to-end generation pipeline.

use chrono::NaiveDateTime;
use rand::SeedableRng;
use rand::rngs::StdRng;
use uuid::Uuid;

use crate::config::GenerationConfig;
use crate::error::SeedingResult;
use crate::factory::{ArticleFactory, AuthorFactory, CommentFactory, Factory};
use crate::models::{Article, Author, BlogData, Comment};

/// Runs the author, article and comment factories against one RNG.
///
/// The generator owns the run's RNG and reference time. Stages must be run in
/// order because each child stage samples from the ids produced by its
/// parent; [`BlogDataGenerator::generate`] does exactly that.
///
/// # Example
///
/// ```
/// use blogseed_seeding::{BlogDataGenerator, GenerationConfig};
/// use chrono::NaiveDate;
///
/// let now = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let config = GenerationConfig::new()
///     .with_authors(2)
///     .with_articles(3)
///     .with_comments(4)
///     .with_seed(42)
///     .with_reference_time(now);
///
/// let data = BlogDataGenerator::from_config(&config).generate(&config)?;
/// assert_eq!(data.comments.len(), 4);
/// # Ok::<(), blogseed_seeding::SeedingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BlogDataGenerator {
	rng: StdRng,
	now: NaiveDateTime,
}

impl BlogDataGenerator {
	/// Creates a generator. Without a seed the RNG is seeded from OS entropy.
	pub fn new(seed: Option<u64>, now: NaiveDateTime) -> Self {
		let rng = match seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_entropy(),
		};
		Self { rng, now }
	}

	/// Creates a generator from the seed and reference time of `config`.
	pub fn from_config(config: &GenerationConfig) -> Self {
		Self::new(config.seed, config.resolve_reference_time())
	}

	/// The reference time of this run.
	pub fn now(&self) -> NaiveDateTime {
		self.now
	}

	/// Generates `count` authors.
	pub fn generate_authors(&mut self, count: usize) -> Vec<Author> {
		let mut factory = AuthorFactory::new(self.now);
		let authors = factory.build_batch(&mut self.rng, count);
		if factory.username_fallbacks() > 0 || factory.email_fallbacks() > 0 {
			tracing::info!(
				usernames = factory.username_fallbacks(),
				emails = factory.email_fallbacks(),
				"synthesized fallback identities after repeated collisions"
			);
		}
		authors
	}

	/// Generates `count` articles owned by authors from `author_ids`.
	pub fn generate_articles(
		&mut self,
		count: usize,
		author_ids: &[Uuid],
		published_ratio: f64,
	) -> SeedingResult<Vec<Article>> {
		let mut factory = ArticleFactory::new(author_ids, published_ratio, self.now)?;
		Ok(factory.build_batch(&mut self.rng, count))
	}

	/// Generates `count` comments attached to articles from `article_ids`.
	pub fn generate_comments(
		&mut self,
		count: usize,
		article_ids: &[Uuid],
	) -> SeedingResult<Vec<Comment>> {
		let mut factory = CommentFactory::new(article_ids, self.now)?;
		Ok(factory.build_batch(&mut self.rng, count))
	}

	/// Validates `config` and runs all three stages in order.
	///
	/// # Errors
	///
	/// Returns a validation error before any record is generated if `config`
	/// is invalid.
	pub fn generate(&mut self, config: &GenerationConfig) -> SeedingResult<BlogData> {
		config.validate()?;

		tracing::info!(count = config.authors, "generating authors");
		let authors = self.generate_authors(config.authors);
		let author_ids: Vec<Uuid> = authors.iter().map(|a| a.id).collect();

		tracing::info!(count = config.articles, "generating articles");
		let articles =
			self.generate_articles(config.articles, &author_ids, config.published_ratio)?;
		let article_ids: Vec<Uuid> = articles.iter().map(|a| a.id).collect();

		tracing::info!(count = config.comments, "generating comments");
		let comments = self.generate_comments(config.comments, &article_ids)?;

		Ok(BlogData {
			authors,
			articles,
			comments,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::SeedingError;
	use chrono::NaiveDate;
	use rstest::{fixture, rstest};
	use std::collections::HashSet;

	#[fixture]
	fn now() -> NaiveDateTime {
		NaiveDate::from_ymd_opt(2024, 6, 1)
			.unwrap()
			.and_hms_opt(12, 0, 0)
			.unwrap()
	}

	fn config(now: NaiveDateTime) -> GenerationConfig {
		GenerationConfig::new()
			.with_authors(10)
			.with_articles(40)
			.with_comments(120)
			.with_seed(7)
			.with_reference_time(now)
	}

	#[rstest]
	fn test_generate_counts(now: NaiveDateTime) {
		let config = config(now);
		let data = BlogDataGenerator::from_config(&config)
			.generate(&config)
			.unwrap();

		assert_eq!(data.authors.len(), 10);
		assert_eq!(data.articles.len(), 40);
		assert_eq!(data.comments.len(), 120);
	}

	#[rstest]
	fn test_generate_references(now: NaiveDateTime) {
		let config = config(now);
		let data = BlogDataGenerator::from_config(&config)
			.generate(&config)
			.unwrap();

		let author_ids: HashSet<_> = data.author_ids().into_iter().collect();
		let article_ids: HashSet<_> = data.article_ids().into_iter().collect();
		assert!(data.articles.iter().all(|a| author_ids.contains(&a.author_id)));
		assert!(data.comments.iter().all(|c| article_ids.contains(&c.article_id)));
	}

	#[rstest]
	fn test_generate_is_deterministic(now: NaiveDateTime) {
		let config = config(now);
		let first = BlogDataGenerator::from_config(&config)
			.generate(&config)
			.unwrap();
		let second = BlogDataGenerator::from_config(&config)
			.generate(&config)
			.unwrap();
		assert_eq!(first, second);
	}

	#[rstest]
	fn test_different_seeds_differ(now: NaiveDateTime) {
		let a = config(now);
		let b = config(now).with_seed(8);
		let first = BlogDataGenerator::from_config(&a).generate(&a).unwrap();
		let second = BlogDataGenerator::from_config(&b).generate(&b).unwrap();
		assert_ne!(first.author_ids(), second.author_ids());
	}

	#[rstest]
	fn test_invalid_config_generates_nothing(now: NaiveDateTime) {
		let config = config(now).with_comments(0);
		let mut generator = BlogDataGenerator::from_config(&config);
		let result = generator.generate(&config);
		assert!(matches!(result, Err(SeedingError::ValidationError { .. })));
	}

	#[rstest]
	fn test_empty_pools_fail_loudly(now: NaiveDateTime) {
		let mut generator = BlogDataGenerator::new(Some(1), now);
		assert!(matches!(
			generator.generate_articles(3, &[], 0.5),
			Err(SeedingError::EmptyPool("author"))
		));
		assert!(matches!(
			generator.generate_comments(3, &[]),
			Err(SeedingError::EmptyPool("article"))
		));
	}

	#[rstest]
	fn test_unseeded_generators_use_entropy(now: NaiveDateTime) {
		let first = BlogDataGenerator::new(None, now).generate_authors(5);
		let second = BlogDataGenerator::new(None, now).generate_authors(5);
		assert_ne!(first, second);
	}
}
