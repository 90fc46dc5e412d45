use chrono::{NaiveDateTime, TimeDelta};
use rand::Rng;
use rand::seq::SliceRandom;
use uuid::Uuid;

use super::Factory;
use super::faker::{FakerType, random_uuid, sentence};
use crate::error::{SeedingError, SeedingResult};
use crate::models::Comment;

/// Canned remarks picked for a share of generated comments.
pub const COMMENT_TEMPLATES: [&str; 15] = [
	"Great article! Very helpful.",
	"Thanks for sharing this.",
	"I found this really useful.",
	"Excellent explanation!",
	"This helped me understand the concept better.",
	"Nice write-up!",
	"I have a question about...",
	"Could you elaborate on...?",
	"I disagree with...",
	"This is exactly what I was looking for!",
	"Well written and informative.",
	"I'll definitely try this approach.",
	"Thanks for the detailed explanation.",
	"This cleared up my confusion.",
	"Great examples in this article.",
];

const TEMPLATE_PROBABILITY: f64 = 0.3;
const MIN_WORDS: usize = 5;
const MAX_WORDS: usize = 20;
const MAX_AGE_DAYS: i64 = 180;

/// Builds [`Comment`] records attached to articles from a fixed id pool.
#[derive(Debug, Clone)]
pub struct CommentFactory<'a> {
	article_ids: &'a [Uuid],
	now: NaiveDateTime,
}

impl<'a> CommentFactory<'a> {
	/// Creates a factory attaching comments to `article_ids`.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::EmptyPool`] if `article_ids` is empty.
	pub fn new(article_ids: &'a [Uuid], now: NaiveDateTime) -> SeedingResult<Self> {
		if article_ids.is_empty() {
			return Err(SeedingError::EmptyPool("article"));
		}
		Ok(Self { article_ids, now })
	}
}

impl Factory for CommentFactory<'_> {
	type Model = Comment;

	fn build<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Comment {
		let id = random_uuid(rng);
		let article_id = self.article_ids[rng.gen_range(0..self.article_ids.len())];

		let author_name = FakerType::Name.generate_with_rng(rng);
		let author_email = FakerType::FreeEmail.generate_with_rng(rng);

		let content = if rng.gen_bool(TEMPLATE_PROBABILITY) {
			COMMENT_TEMPLATES
				.choose(rng)
				.copied()
				.unwrap_or(COMMENT_TEMPLATES[0])
				.to_string()
		} else {
			let words = rng.gen_range(MIN_WORDS..=MAX_WORDS);
			sentence(rng, words)
		};

		let days_ago = rng.gen_range(0..=MAX_AGE_DAYS);
		let created_at = self.now - TimeDelta::days(days_ago);

		Comment {
			id,
			article_id,
			author_name,
			author_email,
			content,
			comment_date: created_at,
			created_at,
		}
	}
}
