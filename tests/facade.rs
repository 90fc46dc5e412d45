//! Tests for the `blogseed` facade crate.

use blogseed::prelude::*;
use chrono::NaiveDate;
use rstest::rstest;

#[rstest]
fn test_prelude_pipeline() {
	let now = NaiveDate::from_ymd_opt(2024, 6, 1)
		.unwrap()
		.and_hms_opt(0, 0, 0)
		.unwrap();
	let config = GenerationConfig::new()
		.with_authors(3)
		.with_articles(5)
		.with_comments(10)
		.with_seed(42)
		.with_published_ratio(1.0)
		.with_reference_time(now);

	let result = GenerateCommand::new()
		.execute(GenerateOptions::new().with_config(config))
		.unwrap();
	assert_eq!(result.published, 5);

	let report = ReferenceVerifier::new().verify_str(&result.sql).unwrap();
	assert!(report.is_valid());
	assert_eq!(split_statements(&result.sql).len(), 4);
}

#[rstest]
fn test_root_reexports() {
	let error: blogseed::SeedingError = blogseed::SeedingError::EmptyPool("author");
	assert!(error.to_string().contains("author"));
	assert_eq!(blogseed::sql::escape("O'Hara"), "O''Hara");
	assert!(blogseed::config::parse_timestamp("reference_time", "2024-01-01 00:00:00").is_ok());
}
