//! Unique value allocation with bounded retry and synthetic fallback.

use std::collections::HashSet;

use rand::Rng;

/// Issues string values that are unique within one allocator.
///
/// Candidate values come from a sampler that may repeat itself (a faker, for
/// instance). A candidate that collides with an already issued value is
/// discarded and the sampler is asked again, up to `max_attempts` times. Once
/// the budget is spent, values are taken from the fallback source instead,
/// which is expected to draw from a space large enough to be practically
/// collision free.
///
/// # Example
///
/// ```
/// use blogseed_seeding::factory::UniqueAllocator;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let mut allocator = UniqueAllocator::new();
///
/// let first = allocator.allocate(&mut rng, |_| "admin".to_string(), |_| "fallback".to_string());
/// let second = allocator.allocate(&mut rng, |_| "admin".to_string(), |_| "fallback".to_string());
///
/// assert_eq!(first, "admin");
/// assert_eq!(second, "fallback");
/// assert_eq!(allocator.fallback_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct UniqueAllocator {
	issued: HashSet<String>,
	max_attempts: usize,
	fallbacks: usize,
}

impl UniqueAllocator {
	/// Sampler attempts before falling back.
	pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

	/// Creates an allocator with the default attempt budget.
	pub fn new() -> Self {
		Self::with_max_attempts(Self::DEFAULT_MAX_ATTEMPTS)
	}

	/// Creates an allocator with a custom attempt budget.
	pub fn with_max_attempts(max_attempts: usize) -> Self {
		Self {
			issued: HashSet::new(),
			max_attempts,
			fallbacks: 0,
		}
	}

	/// Returns a value that has not been issued by this allocator before.
	pub fn allocate<R, S, F>(&mut self, rng: &mut R, mut sample: S, mut fallback: F) -> String
	where
		R: Rng + ?Sized,
		S: FnMut(&mut R) -> String,
		F: FnMut(&mut R) -> String,
	{
		for _ in 0..self.max_attempts {
			let candidate = sample(rng);
			if self.issued.insert(candidate.clone()) {
				return candidate;
			}
		}

		self.fallbacks += 1;
		loop {
			let candidate = fallback(rng);
			if self.issued.insert(candidate.clone()) {
				tracing::debug!(value = %candidate, "unique sampler exhausted, using fallback");
				return candidate;
			}
		}
	}

	/// Returns true if `value` has already been issued.
	pub fn contains(&self, value: &str) -> bool {
		self.issued.contains(value)
	}

	/// Number of values issued so far.
	pub fn len(&self) -> usize {
		self.issued.len()
	}

	/// Returns true if nothing has been issued yet.
	pub fn is_empty(&self) -> bool {
		self.issued.is_empty()
	}

	/// Number of values that came from the fallback source.
	pub fn fallback_count(&self) -> usize {
		self.fallbacks
	}

	/// The sampler attempt budget.
	pub fn max_attempts(&self) -> usize {
		self.max_attempts
	}
}

impl Default for UniqueAllocator {
	fn default() -> Self {
		Self::new()
	}
}
