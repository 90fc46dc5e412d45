//! Error types for the seeding module.
//!
//! This module defines the error types used throughout the blogseed-seeding crate.

use thiserror::Error;

/// Errors that can occur during seeding operations.
#[derive(Debug, Error)]
pub enum SeedingError {
	/// Validation failed for a specific configuration field.
	#[error("Validation error: {field}: {message}")]
	ValidationError {
		/// Field that failed validation.
		field: String,
		/// Validation error message.
		message: String,
	},

	/// A factory was handed an empty pool of parent ids.
	#[error("Empty {0} id pool: at least one {0} must exist before generating children")]
	EmptyPool(&'static str),

	/// The serializer was handed an empty collection.
	#[error("Cannot render an empty {0} collection as an INSERT statement")]
	EmptyCollection(&'static str),

	/// Error parsing SQL text.
	#[error("Parse error: {0}")]
	ParseError(String),

	/// I/O operation failed.
	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),

	/// SQL file not found.
	#[error("SQL file not found: {0}")]
	FileNotFound(String),

	/// Could not establish a database connection.
	#[error("Connection error: {0}")]
	ConnectionError(String),

	/// Database operation failed.
	#[cfg(feature = "postgres")]
	#[error("Database error: {0}")]
	DatabaseError(#[from] sqlx::Error),
}

impl SeedingError {
	/// Creates a validation error for `field`.
	pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self::ValidationError {
			field: field.into(),
			message: message.into(),
		}
	}
}

/// Result type alias for seeding operations.
pub type SeedingResult<T> = Result<T, SeedingError>;
