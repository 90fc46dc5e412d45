//! In-memory records produced by the factories.
//!
//! Text fields hold raw, unescaped values. Escaping for SQL literals happens
//! once, in [`crate::sql`].

use chrono::NaiveDateTime;
use uuid::Uuid;

/// A registered blog author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
	/// Primary key.
	pub id: Uuid,
	/// Login name, unique within a generation run.
	pub username: String,
	/// Contact address, unique within a generation run.
	pub email: String,
	/// Account creation time.
	pub created_at: NaiveDateTime,
}

/// A blog article owned by exactly one [`Author`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
	/// Primary key.
	pub id: Uuid,
	/// Headline built from a topic and a title pattern.
	pub title: String,
	/// Body text, paragraphs separated by blank lines.
	pub content: String,
	/// Owning author.
	pub author_id: Uuid,
	/// Whether the article is visible to readers.
	pub is_published: bool,
	/// Present if and only if `is_published` is true.
	pub publish_date: Option<NaiveDateTime>,
	/// Creation time.
	pub created_at: NaiveDateTime,
	/// Always equal to `created_at`; kept for schema compatibility.
	pub updated_at: NaiveDateTime,
}

/// A reader comment attached to exactly one [`Article`].
///
/// Commenters are free-text identities and do not reference [`Author`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
	/// Primary key.
	pub id: Uuid,
	/// Article the comment belongs to.
	pub article_id: Uuid,
	/// Display name of the commenter.
	pub author_name: String,
	/// Email of the commenter.
	pub author_email: String,
	/// Comment body.
	pub content: String,
	/// Always equal to `created_at`; kept for schema compatibility.
	pub comment_date: NaiveDateTime,
	/// Creation time.
	pub created_at: NaiveDateTime,
}

/// The three collections produced by one generation run, in generation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogData {
	/// Generated authors.
	pub authors: Vec<Author>,
	/// Generated articles.
	pub articles: Vec<Article>,
	/// Generated comments.
	pub comments: Vec<Comment>,
}

impl BlogData {
	/// Ids of all authors, in generation order.
	pub fn author_ids(&self) -> Vec<Uuid> {
		self.authors.iter().map(|a| a.id).collect()
	}

	/// Ids of all articles, in generation order.
	pub fn article_ids(&self) -> Vec<Uuid> {
		self.articles.iter().map(|a| a.id).collect()
	}

	/// Number of articles with a publish date.
	pub fn published_count(&self) -> usize {
		self.articles.iter().filter(|a| a.is_published).count()
	}
}
