//! End-to-end generation, rendering and verification tests.

use std::collections::HashSet;

use blogseed_seeding::commands::{GenerateCommand, GenerateOptions, VerifyArgs, VerifyCommand};
use blogseed_seeding::loader::split_statements;
use blogseed_seeding::prelude::*;
use chrono::{NaiveDate, NaiveDateTime};
use rstest::*;
use tempfile::TempDir;
use uuid::Uuid;

#[fixture]
fn now() -> NaiveDateTime {
	NaiveDate::from_ymd_opt(2024, 6, 1)
		.unwrap()
		.and_hms_opt(12, 0, 0)
		.unwrap()
}

#[fixture]
fn small_config(now: NaiveDateTime) -> GenerationConfig {
	GenerationConfig::new()
		.with_authors(3)
		.with_articles(5)
		.with_comments(10)
		.with_seed(42)
		.with_published_ratio(1.0)
		.with_reference_time(now)
}

fn render(config: &GenerationConfig) -> (BlogData, String) {
	let mut generator = BlogDataGenerator::from_config(config);
	let data = generator.generate(config).unwrap();
	let sql = SqlSerializer::new(generator.now()).serialize(&data).unwrap();
	(data, sql)
}

#[rstest]
fn test_small_seeded_run(small_config: GenerationConfig) {
	let (data, sql) = render(&small_config);

	assert_eq!(data.authors.len(), 3);
	assert_eq!(data.articles.len(), 5);
	assert_eq!(data.comments.len(), 10);
	assert_eq!(data.published_count(), 5);
	assert!(data.articles.iter().all(|a| a.publish_date.is_some()));

	let report = ReferenceVerifier::new().verify_str(&sql).unwrap();
	let lines = report.lines();
	assert!(lines.contains(&"Found 3 authors".to_string()));
	assert!(lines.contains(&"✓ All 5 articles reference valid authors".to_string()));
	assert!(lines.contains(&"✓ All 10 comments reference valid articles".to_string()));
	assert_eq!(
		lines.last().map(String::as_str),
		Some("✅ All referential integrity checks passed!")
	);
}

#[rstest]
fn test_seeded_runs_are_byte_identical(small_config: GenerationConfig) {
	let (_, first) = render(&small_config);
	let (_, second) = render(&small_config);
	assert_eq!(first, second);
}

#[rstest]
fn test_seeded_runs_without_reference_time_match() {
	let config = GenerationConfig::new()
		.with_authors(4)
		.with_articles(6)
		.with_comments(8)
		.with_seed(5);
	let (_, first) = render(&config);
	let (_, second) = render(&config);
	assert_eq!(first, second);
}

#[rstest]
#[case::all_drafts(0.0, 0)]
#[case::all_published(1.0, 40)]
fn test_ratio_boundaries(now: NaiveDateTime, #[case] ratio: f64, #[case] published: usize) {
	let config = GenerationConfig::new()
		.with_authors(5)
		.with_articles(40)
		.with_comments(5)
		.with_seed(11)
		.with_published_ratio(ratio)
		.with_reference_time(now);
	let (data, sql) = render(&config);

	assert_eq!(data.published_count(), published);
	if published == 0 {
		assert!(data.articles.iter().all(|a| a.publish_date.is_none()));
		assert!(!sql.contains(", TRUE, "));
	} else {
		for article in &data.articles {
			let publish_date = article.publish_date.unwrap();
			assert!(article.created_at <= publish_date);
			assert!(publish_date <= now);
		}
		assert!(!sql.contains(", FALSE, "));
	}
}

#[rstest]
fn test_identities_unique(now: NaiveDateTime) {
	let config = GenerationConfig::new()
		.with_authors(300)
		.with_articles(1)
		.with_comments(1)
		.with_seed(99)
		.with_reference_time(now);
	let (data, _) = render(&config);

	let usernames: HashSet<_> = data.authors.iter().map(|a| a.username.as_str()).collect();
	let emails: HashSet<_> = data.authors.iter().map(|a| a.email.as_str()).collect();
	assert_eq!(usernames.len(), 300);
	assert_eq!(emails.len(), 300);
}

#[rstest]
fn test_verifier_detects_tampering(small_config: GenerationConfig, now: NaiveDateTime) {
	let mut generator = BlogDataGenerator::from_config(&small_config);
	let mut data = generator.generate(&small_config).unwrap();
	data.articles[0].author_id = Uuid::nil();
	data.comments[0].article_id = Uuid::nil();
	let sql = SqlSerializer::new(now).serialize(&data).unwrap();

	let report = ReferenceVerifier::new().verify_str(&sql).unwrap();
	assert!(!report.is_valid());
	assert_eq!(report.orphan_articles.len(), 1);
	assert_eq!(report.orphan_comments.len(), 1);
	assert_eq!(report.orphan_articles[0].missing_parent_id, Uuid::nil().to_string());
}

#[rstest]
fn test_generated_script_splits_into_statements(small_config: GenerationConfig) {
	let (_, sql) = render(&small_config);
	let statements = split_statements(&sql);

	assert_eq!(statements.len(), 4);
	assert!(statements[0].starts_with("INSERT INTO Authors"));
	assert!(statements[1].starts_with("INSERT INTO Articles"));
	assert!(statements[2].starts_with("INSERT INTO Comments"));
	assert!(statements[3].starts_with("SELECT"));
}

#[rstest]
fn test_generate_then_verify_commands(small_config: GenerationConfig) {
	let dir = TempDir::new().unwrap();
	let path = dir.path().join("data.sql");

	GenerateCommand::new()
		.execute(
			GenerateOptions::new()
				.with_config(small_config)
				.with_output(&path),
		)
		.unwrap();
	let report = VerifyCommand::new()
		.execute(VerifyArgs { sql_file: path })
		.unwrap();

	assert!(report.is_valid());
	assert_eq!(report.author_count, 3);
	assert_eq!(report.article_count, 5);
	assert_eq!(report.comment_count, 10);
}
