use chrono::{NaiveDateTime, TimeDelta};
use rand::Rng;
use rand::seq::SliceRandom;
use uuid::Uuid;

use super::Factory;
use super::faker::{paragraphs, random_uuid};
use crate::error::{SeedingError, SeedingResult};
use crate::models::Article;

/// Subjects combined with [`TITLE_PATTERNS`] to build article titles.
pub const TOPICS: [&str; 20] = [
	"Technology",
	"Programming",
	"Web Development",
	"Data Science",
	"Machine Learning",
	"DevOps",
	"Cloud Computing",
	"Security",
	"Mobile Development",
	"Database Design",
	"API Development",
	"Frontend",
	"Backend",
	"Full Stack",
	"Software Architecture",
	"Testing",
	"Agile",
	"Open Source",
	"Career",
	"Tutorial",
];

/// Title templates; `{topic}` is replaced by one of [`TOPICS`].
pub const TITLE_PATTERNS: [&str; 10] = [
	"Getting Started with {topic}",
	"Advanced {topic} Techniques",
	"{topic} Best Practices",
	"Introduction to {topic}",
	"{topic} Tutorial: A Complete Guide",
	"Understanding {topic}",
	"{topic} Tips and Tricks",
	"Mastering {topic}",
	"{topic} Fundamentals",
	"Exploring {topic}",
];

const MAX_AGE_DAYS: i64 = 365;
const MIN_PARAGRAPHS: usize = 3;
const MAX_PARAGRAPHS: usize = 8;

/// Builds [`Article`] records owned by authors from a fixed id pool.
#[derive(Debug, Clone)]
pub struct ArticleFactory<'a> {
	author_ids: &'a [Uuid],
	published_ratio: f64,
	now: NaiveDateTime,
}

impl<'a> ArticleFactory<'a> {
	/// Creates a factory drawing owners from `author_ids`.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::EmptyPool`] if `author_ids` is empty and
	/// [`SeedingError::ValidationError`] if `published_ratio` is outside `[0.0, 1.0]`.
	pub fn new(
		author_ids: &'a [Uuid],
		published_ratio: f64,
		now: NaiveDateTime,
	) -> SeedingResult<Self> {
		if author_ids.is_empty() {
			return Err(SeedingError::EmptyPool("author"));
		}
		if !(0.0..=1.0).contains(&published_ratio) {
			return Err(SeedingError::validation(
				"published_ratio",
				"must be between 0.0 and 1.0",
			));
		}
		Ok(Self {
			author_ids,
			published_ratio,
			now,
		})
	}

	/// Probability that a built article is published.
	pub fn published_ratio(&self) -> f64 {
		self.published_ratio
	}
}

impl Factory for ArticleFactory<'_> {
	type Model = Article;

	fn build<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Article {
		let id = random_uuid(rng);
		// Pools are checked non-empty on construction.
		let author_id = self.author_ids[rng.gen_range(0..self.author_ids.len())];

		let topic = TOPICS.choose(rng).copied().unwrap_or(TOPICS[0]);
		let pattern = TITLE_PATTERNS
			.choose(rng)
			.copied()
			.unwrap_or(TITLE_PATTERNS[0]);
		let title = pattern.replace("{topic}", topic);

		let paragraph_count = rng.gen_range(MIN_PARAGRAPHS..=MAX_PARAGRAPHS);
		let content = paragraphs(rng, paragraph_count).join("\n\n");

		let is_published = rng.gen_bool(self.published_ratio);

		let days_ago = rng.gen_range(0..=MAX_AGE_DAYS);
		let created_at = self.now - TimeDelta::days(days_ago);
		let publish_date = if is_published {
			let publish_days_ago = rng.gen_range(0..=days_ago);
			Some(self.now - TimeDelta::days(publish_days_ago))
		} else {
			None
		};

		Article {
			id,
			title,
			content,
			author_id,
			is_published,
			publish_date,
			created_at,
			updated_at: created_at,
		}
	}
}
