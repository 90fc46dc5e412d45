//! SQL text rendering for generated blog data.

mod serializer;

pub use serializer::{ARTICLE_COLUMNS, AUTHOR_COLUMNS, COMMENT_COLUMNS, SqlSerializer};

use chrono::NaiveDateTime;

use crate::config::TIMESTAMP_FORMAT;

/// Doubles embedded single quotes for use inside a SQL string literal.
///
/// # Example
///
/// ```
/// use blogseed_seeding::sql::escape;
///
/// assert_eq!(escape("I'll try"), "I''ll try");
/// ```
pub fn escape(value: &str) -> String {
	value.replace('\'', "''")
}

/// Renders `value` as a single-quoted SQL string literal.
pub fn quote(value: &str) -> String {
	format!("'{}'", escape(value))
}

/// Renders a timestamp literal.
pub fn timestamp(value: &NaiveDateTime) -> String {
	format!("'{}'", value.format(TIMESTAMP_FORMAT))
}

/// Renders an optional timestamp, `NULL` when absent.
pub fn nullable_timestamp(value: Option<&NaiveDateTime>) -> String {
	value.map_or_else(|| "NULL".to_string(), timestamp)
}

/// Renders a boolean as `TRUE` or `FALSE`.
pub fn boolean(value: bool) -> &'static str {
	if value { "TRUE" } else { "FALSE" }
}
