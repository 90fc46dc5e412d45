//! Referential integrity checking of generated SQL scripts.
//!
//! The verifier reads the `Authors`, `Articles` and `Comments` insert blocks
//! of a script and confirms that every `Articles.author_id` names an author
//! and every `Comments.article_id` names an article in the same script.

mod scanner;

pub use scanner::{InsertBlock, SqlLiteral, parse_insert_blocks};

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::error::{SeedingError, SeedingResult};

/// Diagnostics listed per failed check.
pub const MAX_REPORTED_VIOLATIONS: usize = 5;

/// A child row whose foreign key names a missing parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
	/// Id of the offending child row.
	pub child_id: String,
	/// The foreign key value that did not resolve.
	pub missing_parent_id: String,
}

/// Outcome of verifying one script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationReport {
	/// Distinct author ids found.
	pub author_count: usize,
	/// Distinct article ids found.
	pub article_count: usize,
	/// Comment rows found.
	pub comment_count: usize,
	/// Article rows carrying an `author_id`.
	pub article_references: usize,
	/// Comment rows carrying an `article_id`.
	pub comment_references: usize,
	/// Articles whose author is missing.
	pub orphan_articles: Vec<Violation>,
	/// Comments whose article is missing.
	pub orphan_comments: Vec<Violation>,
}

impl VerificationReport {
	/// `true` when every reference resolved.
	pub fn is_valid(&self) -> bool {
		self.orphan_articles.is_empty() && self.orphan_comments.is_empty()
	}

	/// The report as printed by `blogseed verify`, one entry per line.
	pub fn lines(&self) -> Vec<String> {
		let mut lines = vec![
			format!("Found {} authors", self.author_count),
			format!("Found {} articles", self.article_count),
		];

		if self.orphan_articles.is_empty() {
			lines.push(format!(
				"✓ All {} articles reference valid authors",
				self.article_references
			));
		} else {
			lines.push(String::new());
			lines.push(format!(
				"❌ ERROR: Found {} articles referencing non-existent authors!",
				self.orphan_articles.len()
			));
			lines.extend(
				self.orphan_articles
					.iter()
					.take(MAX_REPORTED_VIOLATIONS)
					.map(|v| {
						format!(
							"   Article {}... references author {}... (NOT FOUND)",
							short_id(&v.child_id),
							short_id(&v.missing_parent_id)
						)
					}),
			);
		}

		lines.push(format!("Found {} comments", self.comment_count));

		if self.orphan_comments.is_empty() {
			lines.push(format!(
				"✓ All {} comments reference valid articles",
				self.comment_references
			));
		} else {
			lines.push(String::new());
			lines.push(format!(
				"❌ ERROR: Found {} comments referencing non-existent articles!",
				self.orphan_comments.len()
			));
			lines.extend(
				self.orphan_comments
					.iter()
					.take(MAX_REPORTED_VIOLATIONS)
					.map(|v| {
						format!(
							"   Comment {}... references article {}... (NOT FOUND)",
							short_id(&v.child_id),
							short_id(&v.missing_parent_id)
						)
					}),
			);
		}

		if self.is_valid() {
			lines.push(String::new());
			lines.push("✅ All referential integrity checks passed!".to_string());
		}
		lines
	}
}

impl fmt::Display for VerificationReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.lines().join("\n"))
	}
}

fn short_id(id: &str) -> &str {
	id.char_indices().nth(8).map_or(id, |(end, _)| &id[..end])
}

/// Checks article and comment foreign keys against the ids defined in a
/// script.
#[derive(Debug, Default)]
pub struct ReferenceVerifier;

impl ReferenceVerifier {
	/// Creates a verifier.
	pub fn new() -> Self {
		Self
	}

	/// Verifies the script at `path`.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::FileNotFound`] if `path` does not exist, or any
	/// error from [`ReferenceVerifier::verify_str`].
	pub fn verify_file(&self, path: &Path) -> SeedingResult<VerificationReport> {
		let content = std::fs::read_to_string(path).map_err(|e| {
			if e.kind() == std::io::ErrorKind::NotFound {
				SeedingError::FileNotFound(path.display().to_string())
			} else {
				SeedingError::IoError(e)
			}
		})?;
		tracing::debug!(path = %path.display(), bytes = content.len(), "verifying SQL file");
		self.verify_str(&content)
	}

	/// Verifies a script held in memory.
	///
	/// A missing table block counts as an empty table.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::ParseError`] if a `VALUES` list is malformed.
	pub fn verify_str(&self, sql: &str) -> SeedingResult<VerificationReport> {
		let blocks = parse_insert_blocks(sql)?;
		let authors = table(&blocks, "Authors");
		let articles = table(&blocks, "Articles");
		let comments = table(&blocks, "Comments");

		let author_ids: HashSet<&str> = authors.iter().flat_map(|b| b.strings("id")).collect();
		let article_ids: HashSet<&str> = articles.iter().flat_map(|b| b.strings("id")).collect();

		let article_refs = references(&articles, "author_id");
		let comment_refs = references(&comments, "article_id");

		let report = VerificationReport {
			author_count: author_ids.len(),
			article_count: article_ids.len(),
			comment_count: comments.iter().map(|b| b.rows.len()).sum(),
			article_references: article_refs.len(),
			comment_references: comment_refs.len(),
			orphan_articles: orphans(article_refs, &author_ids),
			orphan_comments: orphans(comment_refs, &article_ids),
		};

		if report.is_valid() {
			tracing::debug!("all references resolved");
		} else {
			tracing::warn!(
				articles = report.orphan_articles.len(),
				comments = report.orphan_comments.len(),
				"dangling references found"
			);
		}
		Ok(report)
	}
}

fn table<'a>(blocks: &'a [InsertBlock], name: &str) -> Vec<&'a InsertBlock> {
	blocks
		.iter()
		.filter(|b| b.table.eq_ignore_ascii_case(name))
		.collect()
}

/// `(id, fk)` pairs of every row in `blocks` carrying both as strings.
fn references<'a>(blocks: &[&'a InsertBlock], fk: &str) -> Vec<(&'a str, &'a str)> {
	let mut pairs = Vec::new();
	for block in blocks {
		let (Some(id), Some(parent)) = (block.column_index("id"), block.column_index(fk)) else {
			continue;
		};
		for row in &block.rows {
			if let (Some(id), Some(parent)) = (
				row.get(id).and_then(SqlLiteral::as_str),
				row.get(parent).and_then(SqlLiteral::as_str),
			) {
				pairs.push((id, parent));
			}
		}
	}
	pairs
}

fn orphans(pairs: Vec<(&str, &str)>, parents: &HashSet<&str>) -> Vec<Violation> {
	pairs
		.into_iter()
		.filter(|(_, parent)| !parents.contains(parent))
		.map(|(child, parent)| Violation {
			child_id: child.to_string(),
			missing_parent_id: parent.to_string(),
		})
		.collect()
}
