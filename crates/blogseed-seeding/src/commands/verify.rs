//! verify command implementation.

use std::path::PathBuf;

use crate::error::{SeedingError, SeedingResult};
use crate::verify::{ReferenceVerifier, VerificationReport};

/// Arguments for the verify command.
#[derive(Debug, Clone, Default)]
pub struct VerifyArgs {
	/// Script to check.
	pub sql_file: PathBuf,
}

/// Checks that a generated script's foreign keys resolve.
#[derive(Debug, Default)]
pub struct VerifyCommand;

impl VerifyCommand {
	/// Creates a new verify command.
	pub fn new() -> Self {
		Self
	}

	/// Returns the command name.
	pub fn name(&self) -> &str {
		"verify"
	}

	/// Returns the command description.
	pub fn description(&self) -> &str {
		"Checks that every article and comment in a SQL file references an existing parent"
	}

	/// Executes the verify command.
	///
	/// Dangling references are reported in the returned
	/// [`VerificationReport`], not as an error.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::FileNotFound`] for a missing file, or a parse
	/// error for malformed `VALUES` lists.
	pub fn execute(&self, args: VerifyArgs) -> SeedingResult<VerificationReport> {
		if args.sql_file.as_os_str().is_empty() {
			return Err(SeedingError::validation(
				"sql_file",
				"A SQL file must be specified",
			));
		}
		ReferenceVerifier::new().verify_file(&args.sql_file)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::io::Write;
	use tempfile::NamedTempFile;

	#[rstest]
	fn test_command_metadata() {
		let cmd = VerifyCommand::new();
		assert_eq!(cmd.name(), "verify");
		assert!(!cmd.description().is_empty());
	}

	#[rstest]
	fn test_execute_empty_path() {
		let result = VerifyCommand::new().execute(VerifyArgs::default());
		assert!(matches!(result, Err(SeedingError::ValidationError { .. })));
	}

	#[rstest]
	fn test_execute_nonexistent_file() {
		let result = VerifyCommand::new().execute(VerifyArgs {
			sql_file: PathBuf::from("/nonexistent/data.sql"),
		});
		assert!(matches!(result, Err(SeedingError::FileNotFound(_))));
	}

	#[rstest]
	fn test_execute_dangling_reference() {
		let mut file = NamedTempFile::with_suffix(".sql").unwrap();
		writeln!(
			file,
			"INSERT INTO Authors (id) VALUES ('a1');\n\
			INSERT INTO Articles (id, author_id) VALUES ('p1', 'a1'), ('p2', 'a9');"
		)
		.unwrap();

		let report = VerifyCommand::new()
			.execute(VerifyArgs {
				sql_file: file.path().to_path_buf(),
			})
			.unwrap();
		assert!(!report.is_valid());
		assert_eq!(report.orphan_articles.len(), 1);
	}
}
