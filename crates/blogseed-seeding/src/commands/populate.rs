//! populate command implementation.

use std::path::PathBuf;
use std::time::Duration;

use super::generate::{GenerateCommand, GenerateOptions};
use crate::config::GenerationConfig;
use crate::error::{SeedingError, SeedingResult};
use crate::loader::{ConnectionConfig, DatabasePopulator, ExecutionReport};

/// Options for the populate command.
#[derive(Debug, Clone)]
pub struct PopulateOptions {
	/// Database to load into.
	pub connection: ConnectionConfig,

	/// Script to execute.
	pub sql_file: PathBuf,

	/// When set, the script is generated into `sql_file` first.
	pub generate: Option<GenerationConfig>,

	/// Connection attempts before giving up.
	pub retries: u32,

	/// Pause between connection attempts.
	pub retry_delay: Duration,
}

impl Default for PopulateOptions {
	fn default() -> Self {
		Self {
			connection: ConnectionConfig::default(),
			sql_file: PathBuf::from("data.sql"),
			generate: None,
			retries: 5,
			retry_delay: Duration::from_secs(2),
		}
	}
}

impl PopulateOptions {
	/// Creates default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the connection parameters.
	pub fn with_connection(mut self, connection: ConnectionConfig) -> Self {
		self.connection = connection;
		self
	}

	/// Sets the script path.
	pub fn with_sql_file(mut self, path: impl Into<PathBuf>) -> Self {
		self.sql_file = path.into();
		self
	}

	/// Generates the script with `config` before loading it.
	pub fn with_generate(mut self, config: GenerationConfig) -> Self {
		self.generate = Some(config);
		self
	}

	/// Sets the connection retry policy.
	pub fn with_retries(mut self, retries: u32, delay: Duration) -> Self {
		self.retries = retries;
		self.retry_delay = delay;
		self
	}
}

/// Outcome of a populate run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopulateResult {
	/// Whether the script was generated in this run.
	pub generated: bool,
	/// Row counts before loading.
	pub initial_counts: Vec<(String, i64)>,
	/// Row counts after loading.
	pub final_counts: Vec<(String, i64)>,
	/// Statement tallies.
	pub execution: ExecutionReport,
}

impl PopulateResult {
	/// `true` when no statement failed.
	pub fn is_success(&self) -> bool {
		self.execution.is_success()
	}

	/// Rows added per table, for tables present in both snapshots.
	pub fn added(&self) -> Vec<(String, i64)> {
		self.final_counts
			.iter()
			.map(|(table, count)| {
				let initial = self
					.initial_counts
					.iter()
					.find(|(t, _)| t == table)
					.map_or(0, |(_, c)| *c);
				(table.clone(), count - initial)
			})
			.collect()
	}
}

/// Loads a SQL script into PostgreSQL, optionally generating it first.
#[derive(Debug, Default)]
pub struct PopulateCommand;

impl PopulateCommand {
	/// Creates a new populate command.
	pub fn new() -> Self {
		Self
	}

	/// Returns the command name.
	pub fn name(&self) -> &str {
		"populate"
	}

	/// Returns the command description.
	pub fn description(&self) -> &str {
		"Loads a generated SQL file into PostgreSQL"
	}

	/// Executes the populate command.
	///
	/// Statement failures do not abort the load; check
	/// [`PopulateResult::is_success`]. The connection is closed on every
	/// path once opened.
	///
	/// # Errors
	///
	/// Returns an error if generation fails, the script is missing, or no
	/// connection could be established.
	pub async fn execute(&self, options: PopulateOptions) -> SeedingResult<PopulateResult> {
		let mut result = PopulateResult::default();

		if let Some(config) = options.generate.clone() {
			tracing::info!(path = %options.sql_file.display(), "generating SQL data");
			GenerateCommand::new().execute(
				GenerateOptions::new()
					.with_config(config)
					.with_output(&options.sql_file),
			)?;
			result.generated = true;
		}

		if !options.sql_file.exists() {
			return Err(SeedingError::FileNotFound(
				options.sql_file.display().to_string(),
			));
		}

		let mut populator = DatabasePopulator::new(options.connection.clone());
		populator
			.connect(options.retries, options.retry_delay)
			.await?;

		let outcome = self.load(&mut populator, &options, &mut result).await;
		let closed = populator.close().await;
		outcome?;
		closed?;

		Ok(result)
	}

	async fn load(
		&self,
		populator: &mut DatabasePopulator,
		options: &PopulateOptions,
		result: &mut PopulateResult,
	) -> SeedingResult<()> {
		result.initial_counts = populator.table_counts().await;
		for (table, count) in &result.initial_counts {
			tracing::info!(table = %table, rows = count, "current database state");
		}

		result.execution = populator.execute_file(&options.sql_file).await?;

		result.final_counts = populator.table_counts().await;
		for (table, added) in result.added() {
			tracing::info!(table = %table, added, "final database state");
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use tempfile::TempDir;

	#[rstest]
	fn test_command_metadata() {
		let cmd = PopulateCommand::new();
		assert_eq!(cmd.name(), "populate");
		assert!(!cmd.description().is_empty());
	}

	#[rstest]
	fn test_options_defaults_and_builder() {
		let options = PopulateOptions::new();
		assert_eq!(options.sql_file, PathBuf::from("data.sql"));
		assert_eq!(options.retries, 5);
		assert_eq!(options.retry_delay, Duration::from_secs(2));
		assert!(options.generate.is_none());

		let options = options
			.with_sql_file("seed.sql")
			.with_generate(GenerationConfig::new().with_seed(1))
			.with_retries(1, Duration::ZERO)
			.with_connection(ConnectionConfig::new().with_port(6000));
		assert_eq!(options.sql_file, PathBuf::from("seed.sql"));
		assert_eq!(options.retries, 1);
		assert_eq!(options.connection.port, 6000);
		assert!(options.generate.is_some());
	}

	#[rstest]
	fn test_added_rows() {
		let result = PopulateResult {
			initial_counts: vec![("Authors".to_string(), 2)],
			final_counts: vec![("Authors".to_string(), 5), ("Articles".to_string(), 7)],
			..Default::default()
		};
		assert_eq!(
			result.added(),
			vec![("Authors".to_string(), 3), ("Articles".to_string(), 7)]
		);
	}

	#[rstest]
	#[tokio::test]
	async fn test_execute_nonexistent_file() {
		let options = PopulateOptions::new().with_sql_file("/nonexistent/blogseed/data.sql");
		let result = PopulateCommand::new().execute(options).await;
		assert!(matches!(result, Err(SeedingError::FileNotFound(_))));
	}

	#[rstest]
	#[tokio::test]
	async fn test_generates_before_connecting() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().join("data.sql");
		let options = PopulateOptions::new()
			.with_sql_file(&path)
			.with_generate(
				GenerationConfig::new()
					.with_authors(2)
					.with_articles(2)
					.with_comments(2)
					.with_seed(3),
			)
			.with_retries(1, Duration::ZERO)
			.with_connection(
				ConnectionConfig::new()
					.with_host("127.0.0.1")
					.with_port(1)
					.with_connect_timeout(Duration::from_secs(2)),
			);

		let result = PopulateCommand::new().execute(options).await;
		assert!(matches!(result, Err(SeedingError::ConnectionError(_))));
		assert!(path.exists());
	}
}
