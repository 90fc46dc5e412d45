//! generate command implementation.

use std::path::PathBuf;

use crate::config::GenerationConfig;
use crate::error::{SeedingError, SeedingResult};
use crate::generator::BlogDataGenerator;
use crate::sql::SqlSerializer;

/// Options for the generate command.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
	/// Counts, seed, ratio and reference time.
	pub config: GenerationConfig,

	/// File to write. `None` leaves the script in [`GenerateResult::sql`].
	pub output: Option<PathBuf>,
}

impl GenerateOptions {
	/// Creates default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the generation config.
	pub fn with_config(mut self, config: GenerationConfig) -> Self {
		self.config = config;
		self
	}

	/// Sets the output file.
	pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
		self.output = Some(path.into());
		self
	}
}

/// Outcome of a generate run.
#[derive(Debug, Clone)]
pub struct GenerateResult {
	/// The rendered script.
	pub sql: String,
	/// Where the script was written, if anywhere.
	pub output: Option<PathBuf>,
	/// Authors generated.
	pub authors: usize,
	/// Articles generated.
	pub articles: usize,
	/// Of which published.
	pub published: usize,
	/// Comments generated.
	pub comments: usize,
}

/// Generates blog data and renders it as SQL.
///
/// # Example
///
/// ```
/// use blogseed_seeding::GenerationConfig;
/// use blogseed_seeding::commands::{GenerateCommand, GenerateOptions};
///
/// let config = GenerationConfig::new()
///     .with_authors(3)
///     .with_articles(5)
///     .with_comments(10)
///     .with_seed(42);
/// let result = GenerateCommand::new().execute(GenerateOptions::new().with_config(config))?;
/// assert!(result.sql.starts_with("-- Generated SQL INSERT statements"));
/// # Ok::<(), blogseed_seeding::SeedingError>(())
/// ```
#[derive(Debug, Default)]
pub struct GenerateCommand;

impl GenerateCommand {
	/// Creates a new generate command.
	pub fn new() -> Self {
		Self
	}

	/// Returns the command name.
	pub fn name(&self) -> &str {
		"generate"
	}

	/// Returns the command description.
	pub fn description(&self) -> &str {
		"Generates authors, articles and comments as SQL INSERT statements"
	}

	/// Executes the generate command.
	///
	/// The configuration is validated before anything is generated. The
	/// header timestamp is the run's reference time, so seeded runs are
	/// byte-identical.
	///
	/// # Errors
	///
	/// Returns a validation error for an invalid configuration, or an I/O
	/// error if the output file cannot be written.
	pub fn execute(&self, options: GenerateOptions) -> SeedingResult<GenerateResult> {
		let config = options.config;
		config.validate()?;

		let mut generator = BlogDataGenerator::from_config(&config);
		let data = generator.generate(&config)?;

		tracing::info!("rendering SQL");
		let sql = SqlSerializer::new(generator.now()).serialize(&data)?;

		if let Some(path) = &options.output {
			std::fs::write(path, &sql).map_err(|e| {
				if e.kind() == std::io::ErrorKind::NotFound {
					SeedingError::FileNotFound(path.display().to_string())
				} else {
					SeedingError::IoError(e)
				}
			})?;
			tracing::info!(path = %path.display(), bytes = sql.len(), "SQL written");
		}

		tracing::info!(
			authors = data.authors.len(),
			articles = data.articles.len(),
			published = data.published_count(),
			comments = data.comments.len(),
			"generation complete"
		);

		Ok(GenerateResult {
			authors: data.authors.len(),
			articles: data.articles.len(),
			published: data.published_count(),
			comments: data.comments.len(),
			sql,
			output: options.output,
		})
	}
}
