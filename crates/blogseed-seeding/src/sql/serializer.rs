//! Rendering of [`BlogData`] as a SQL script.

use chrono::NaiveDateTime;

use super::{boolean, nullable_timestamp, quote, timestamp};
use crate::config::TIMESTAMP_FORMAT;
use crate::error::{SeedingError, SeedingResult};
use crate::models::{Article, Author, BlogData, Comment};

/// Column order of the `Authors` insert.
pub const AUTHOR_COLUMNS: [&str; 4] = ["id", "username", "email", "created_at"];

/// Column order of the `Articles` insert.
pub const ARTICLE_COLUMNS: [&str; 8] = [
	"id",
	"title",
	"content",
	"publish_date",
	"is_published",
	"author_id",
	"created_at",
	"updated_at",
];

/// Column order of the `Comments` insert.
pub const COMMENT_COLUMNS: [&str; 7] = [
	"id",
	"article_id",
	"author_name",
	"author_email",
	"content",
	"comment_date",
	"created_at",
];

/// Renders generated data as one SQL script.
///
/// The script holds a header comment, one multi-row `INSERT` per table in
/// dependency order, and a summary `SELECT`. Lines are joined with `\n`
/// without a trailing newline.
#[derive(Debug, Clone)]
pub struct SqlSerializer {
	generated_at: NaiveDateTime,
}

impl SqlSerializer {
	/// Creates a serializer stamping `generated_at` into the header.
	pub fn new(generated_at: NaiveDateTime) -> Self {
		Self { generated_at }
	}

	/// Renders `data`.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::EmptyCollection`] if any collection is empty,
	/// since an empty `VALUES` list is not valid SQL.
	pub fn serialize(&self, data: &BlogData) -> SeedingResult<String> {
		if data.authors.is_empty() {
			return Err(SeedingError::EmptyCollection("author"));
		}
		if data.articles.is_empty() {
			return Err(SeedingError::EmptyCollection("article"));
		}
		if data.comments.is_empty() {
			return Err(SeedingError::EmptyCollection("comment"));
		}

		let (authors, articles, comments) =
			(data.authors.len(), data.articles.len(), data.comments.len());

		let mut lines = vec![
			"-- Generated SQL INSERT statements".to_string(),
			format!(
				"-- Generated at: {}",
				self.generated_at.format(TIMESTAMP_FORMAT)
			),
			format!(
				"-- Authors: {}, Articles: {}, Comments: {}",
				authors, articles, comments
			),
			String::new(),
		];

		lines.push("-- Insert Authors".to_string());
		lines.push(insert_header("Authors", &AUTHOR_COLUMNS));
		lines.push(values(data.authors.iter().map(author_tuple)));
		lines.push(String::new());

		lines.push("-- Insert Articles".to_string());
		lines.push(insert_header("Articles", &ARTICLE_COLUMNS));
		lines.push(values(data.articles.iter().map(article_tuple)));
		lines.push(String::new());

		lines.push("-- Insert Comments".to_string());
		lines.push(insert_header("Comments", &COMMENT_COLUMNS));
		lines.push(values(data.comments.iter().map(comment_tuple)));
		lines.push(String::new());

		lines.push("-- Summary".to_string());
		lines.push("SELECT".to_string());
		lines.push("    'Data Generation Complete' AS message,".to_string());
		lines.push(format!("    {} AS total_authors,", authors));
		lines.push(format!("    {} AS total_articles,", articles));
		lines.push(format!("    {} AS total_comments;", comments));

		Ok(lines.join("\n"))
	}
}

fn insert_header(table: &str, columns: &[&str]) -> String {
	format!("INSERT INTO {} ({}) VALUES", table, columns.join(", "))
}

fn values(tuples: impl Iterator<Item = String>) -> String {
	let mut rendered = tuples.collect::<Vec<_>>().join(",\n");
	rendered.push(';');
	rendered
}

fn author_tuple(author: &Author) -> String {
	format!(
		"('{}', {}, {}, {})",
		author.id,
		quote(&author.username),
		quote(&author.email),
		timestamp(&author.created_at)
	)
}

fn article_tuple(article: &Article) -> String {
	format!(
		"('{}', {}, {}, {}, {}, '{}', {}, {})",
		article.id,
		quote(&article.title),
		quote(&article.content),
		nullable_timestamp(article.publish_date.as_ref()),
		boolean(article.is_published),
		article.author_id,
		timestamp(&article.created_at),
		timestamp(&article.updated_at)
	)
}

fn comment_tuple(comment: &Comment) -> String {
	format!(
		"('{}', '{}', {}, {}, {}, {}, {})",
		comment.id,
		comment.article_id,
		quote(&comment.author_name),
		quote(&comment.author_email),
		quote(&comment.content),
		timestamp(&comment.comment_date),
		timestamp(&comment.created_at)
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::NaiveDate;
	use rstest::{fixture, rstest};
	use uuid::Uuid;

	fn at(day: u32) -> NaiveDateTime {
		NaiveDate::from_ymd_opt(2024, 5, day)
			.unwrap()
			.and_hms_opt(10, 0, 0)
			.unwrap()
	}

	#[fixture]
	fn data() -> BlogData {
		let author_id = Uuid::parse_str("11111111-1111-4111-8111-111111111111").unwrap();
		let published_id = Uuid::parse_str("22222222-2222-4222-8222-222222222222").unwrap();
		let draft_id = Uuid::parse_str("33333333-3333-4333-8333-333333333333").unwrap();
		let comment_id = Uuid::parse_str("44444444-4444-4444-8444-444444444444").unwrap();

		BlogData {
			authors: vec![Author {
				id: author_id,
				username: "jane_doe".to_string(),
				email: "jane@example.com".to_string(),
				created_at: at(1),
			}],
			articles: vec![
				Article {
					id: published_id,
					title: "Mastering Rust".to_string(),
					content: "It's fast.\n\nIt's safe.".to_string(),
					author_id,
					is_published: true,
					publish_date: Some(at(3)),
					created_at: at(2),
					updated_at: at(2),
				},
				Article {
					id: draft_id,
					title: "Exploring Testing".to_string(),
					content: "Draft".to_string(),
					author_id,
					is_published: false,
					publish_date: None,
					created_at: at(4),
					updated_at: at(4),
				},
			],
			comments: vec![Comment {
				id: comment_id,
				article_id: published_id,
				author_name: "Miles O'Keefe".to_string(),
				author_email: "miles@example.net".to_string(),
				content: "I'll definitely try this approach.".to_string(),
				comment_date: at(5),
				created_at: at(5),
			}],
		}
	}

	#[rstest]
	fn test_full_document(data: BlogData) {
		let sql = SqlSerializer::new(at(6)).serialize(&data).unwrap();
		let expected = "\
-- Generated SQL INSERT statements
-- Generated at: 2024-05-06 10:00:00
-- Authors: 1, Articles: 2, Comments: 1

-- Insert Authors
INSERT INTO Authors (id, username, email, created_at) VALUES
('11111111-1111-4111-8111-111111111111', 'jane_doe', 'jane@example.com', '2024-05-01 10:00:00');

-- Insert Articles
INSERT INTO Articles (id, title, content, publish_date, is_published, author_id, created_at, updated_at) VALUES
('22222222-2222-4222-8222-222222222222', 'Mastering Rust', 'It''s fast.

It''s safe.', '2024-05-03 10:00:00', TRUE, '11111111-1111-4111-8111-111111111111', '2024-05-02 10:00:00', '2024-05-02 10:00:00'),
('33333333-3333-4333-8333-333333333333', 'Exploring Testing', 'Draft', NULL, FALSE, '11111111-1111-4111-8111-111111111111', '2024-05-04 10:00:00', '2024-05-04 10:00:00');

-- Insert Comments
INSERT INTO Comments (id, article_id, author_name, author_email, content, comment_date, created_at) VALUES
('44444444-4444-4444-8444-444444444444', '22222222-2222-4222-8222-222222222222', 'Miles O''Keefe', 'miles@example.net', 'I''ll definitely try this approach.', '2024-05-05 10:00:00', '2024-05-05 10:00:00');

-- Summary
SELECT
    'Data Generation Complete' AS message,
    1 AS total_authors,
    2 AS total_articles,
    1 AS total_comments;";
		assert_eq!(sql, expected);
	}

	#[rstest]
	#[case::authors(|d: &mut BlogData| d.authors.clear(), "author")]
	#[case::articles(|d: &mut BlogData| d.articles.clear(), "article")]
	#[case::comments(|d: &mut BlogData| d.comments.clear(), "comment")]
	fn test_empty_collection_rejected(
		mut data: BlogData,
		#[case] clear: fn(&mut BlogData),
		#[case] expected: &str,
	) {
		clear(&mut data);
		match SqlSerializer::new(at(6)).serialize(&data) {
			Err(SeedingError::EmptyCollection(kind)) => assert_eq!(kind, expected),
			other => panic!("expected empty collection error, got {:?}", other),
		}
	}
}
