//! Generation run configuration.

use chrono::{Local, NaiveDateTime, NaiveTime, Timelike};

use crate::error::{SeedingError, SeedingResult};

/// Timestamp layout used for parsing and rendering.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Options for one generation run.
///
/// # Example
///
/// ```
/// use blogseed_seeding::GenerationConfig;
///
/// let config = GenerationConfig::new()
///     .with_authors(3)
///     .with_articles(5)
///     .with_comments(10)
///     .with_seed(42)
///     .with_published_ratio(1.0);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
	/// Number of authors to generate.
	pub authors: usize,

	/// Number of articles to generate.
	pub articles: usize,

	/// Number of comments to generate.
	pub comments: usize,

	/// RNG seed. `None` seeds from OS entropy.
	pub seed: Option<u64>,

	/// Probability that an article is published.
	pub published_ratio: f64,

	/// The "now" every generated timestamp is measured back from.
	pub reference_time: Option<NaiveDateTime>,
}

impl Default for GenerationConfig {
	fn default() -> Self {
		Self {
			authors: 100,
			articles: 500,
			comments: 2000,
			seed: None,
			published_ratio: 0.7,
			reference_time: None,
		}
	}
}

impl GenerationConfig {
	/// Creates the default configuration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the author count.
	pub fn with_authors(mut self, count: usize) -> Self {
		self.authors = count;
		self
	}

	/// Sets the article count.
	pub fn with_articles(mut self, count: usize) -> Self {
		self.articles = count;
		self
	}

	/// Sets the comment count.
	pub fn with_comments(mut self, count: usize) -> Self {
		self.comments = count;
		self
	}

	/// Sets the RNG seed.
	pub fn with_seed(mut self, seed: u64) -> Self {
		self.seed = Some(seed);
		self
	}

	/// Sets the published ratio.
	pub fn with_published_ratio(mut self, ratio: f64) -> Self {
		self.published_ratio = ratio;
		self
	}

	/// Pins the reference time.
	pub fn with_reference_time(mut self, now: NaiveDateTime) -> Self {
		self.reference_time = Some(now);
		self
	}

	/// Checks counts and ratio.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::ValidationError`] naming the first invalid field.
	pub fn validate(&self) -> SeedingResult<()> {
		for (field, count) in [
			("authors", self.authors),
			("articles", self.articles),
			("comments", self.comments),
		] {
			if count < 1 {
				return Err(SeedingError::validation(field, "must be at least 1"));
			}
		}
		if !(0.0..=1.0).contains(&self.published_ratio) {
			return Err(SeedingError::validation(
				"published_ratio",
				"must be between 0.0 and 1.0",
			));
		}
		Ok(())
	}

	/// Resolves the reference time for this run.
	///
	/// An explicit reference time wins. A seeded run without one is pinned to
	/// the start of the current local day so that repeated runs on the same
	/// day render identical SQL. Otherwise the current local time is used.
	pub fn resolve_reference_time(&self) -> NaiveDateTime {
		if let Some(now) = self.reference_time {
			return truncate_to_second(now);
		}
		let now = Local::now().naive_local();
		if self.seed.is_some() {
			now.date().and_time(NaiveTime::MIN)
		} else {
			truncate_to_second(now)
		}
	}
}

/// Parses a `YYYY-MM-DD HH:MM:SS` timestamp.
///
/// # Errors
///
/// Returns [`SeedingError::ValidationError`] for `field` if `value` does not parse.
pub fn parse_timestamp(field: &str, value: &str) -> SeedingResult<NaiveDateTime> {
	NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).map_err(|e| {
		SeedingError::validation(field, format!("expected YYYY-MM-DD HH:MM:SS ({})", e))
	})
}

fn truncate_to_second(value: NaiveDateTime) -> NaiveDateTime {
	value.with_nanosecond(0).unwrap_or(value)
}
