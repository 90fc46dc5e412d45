use chrono::{NaiveDateTime, TimeDelta};
use rand::Rng;

use super::Factory;
use super::faker::{FakerType, random_token, random_uuid};
use super::unique::UniqueAllocator;
use crate::models::Author;

/// Authors are created at most this many days before the reference time.
const CREATED_WINDOW_DAYS: i64 = 730;

/// Builds [`Author`] records with run-wide unique usernames and emails.
#[derive(Debug, Clone)]
pub struct AuthorFactory {
	now: NaiveDateTime,
	usernames: UniqueAllocator,
	emails: UniqueAllocator,
}

impl AuthorFactory {
	/// Creates a factory whose timestamps never exceed `now`.
	pub fn new(now: NaiveDateTime) -> Self {
		Self {
			now,
			usernames: UniqueAllocator::new(),
			emails: UniqueAllocator::new(),
		}
	}

	/// Number of usernames that had to be synthesized after repeated collisions.
	pub fn username_fallbacks(&self) -> usize {
		self.usernames.fallback_count()
	}

	/// Number of emails that had to be synthesized after repeated collisions.
	pub fn email_fallbacks(&self) -> usize {
		self.emails.fallback_count()
	}
}

impl Factory for AuthorFactory {
	type Model = Author;

	fn build<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Author {
		let username = self.usernames.allocate(
			rng,
			|r| {
				FakerType::Username
					.generate_with_rng(r)
					.to_lowercase()
					.replace(' ', "_")
			},
			|r| format!("user_{}", random_token(r)),
		);
		let email = self.emails.allocate(
			rng,
			|r| FakerType::FreeEmail.generate_with_rng(r),
			|r| format!("user_{}@example.org", random_token(r)),
		);
		let id = random_uuid(rng);

		let window = TimeDelta::days(CREATED_WINDOW_DAYS).num_seconds();
		let created_at = self.now - TimeDelta::seconds(rng.gen_range(0..=window));

		Author {
			id,
			username,
			email,
			created_at,
		}
	}
}
