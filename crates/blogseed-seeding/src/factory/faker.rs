//! Fake text generation backed by the `fake` crate.
//!
//! Every generator takes the caller's RNG so that a seeded run stays
//! reproducible end to end.

use fake::Fake;
use fake::faker::internet::en::{FreeEmail, Username};
use fake::faker::lorem::en::{Paragraphs, Sentence, Word};
use fake::faker::name::en::Name;
use rand::Rng;
use uuid::Uuid;

/// Kinds of single-value fake data used by the blog factories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FakerType {
	/// Internet user name, e.g. `lonnie_jast`.
	Username,
	/// Email address on a free mail domain.
	FreeEmail,
	/// Full personal name.
	Name,
	/// Single lorem word.
	Word,
}

impl FakerType {
	/// Generates a value of this kind using `rng`.
	pub fn generate_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
		match self {
			Self::Username => Username().fake_with_rng(rng),
			Self::FreeEmail => FreeEmail().fake_with_rng(rng),
			Self::Name => Name().fake_with_rng(rng),
			Self::Word => Word().fake_with_rng(rng),
		}
	}

	/// Returns the faker name used in diagnostics.
	pub fn name(&self) -> &'static str {
		match self {
			Self::Username => "username",
			Self::FreeEmail => "free_email",
			Self::Name => "name",
			Self::Word => "word",
		}
	}
}

/// Generates exactly `count` lorem paragraphs.
pub fn paragraphs<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<String> {
	Paragraphs(count..count + 1).fake_with_rng(rng)
}

/// Generates a capitalized lorem sentence of exactly `words` words.
pub fn sentence<R: Rng + ?Sized>(rng: &mut R, words: usize) -> String {
	Sentence(words..words + 1).fake_with_rng(rng)
}

/// Builds a version 4 UUID from bytes drawn from `rng`.
pub fn random_uuid<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
	let mut bytes = [0u8; 16];
	rng.fill_bytes(&mut bytes);
	uuid::Builder::from_random_bytes(bytes).into_uuid()
}

/// Eight lowercase hex characters drawn from `rng`.
pub fn random_token<R: Rng + ?Sized>(rng: &mut R) -> String {
	format!("{:08x}", rng.gen_range(0..=u32::MAX))
}
