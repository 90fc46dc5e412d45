//! Extraction of multi-row `INSERT` blocks from SQL text.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{SeedingError, SeedingResult};

static INSERT_HEADER: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?is)INSERT\s+INTO\s+(\w+)\s*\(([^)]*)\)\s*VALUES")
		.expect("Invalid INSERT header pattern")
});

/// One literal inside a `VALUES` tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlLiteral {
	/// A single-quoted string, with `''` already unescaped.
	Str(String),
	/// `NULL`.
	Null,
	/// Any other bare token, such as `TRUE` or `42`.
	Bare(String),
}

impl SqlLiteral {
	/// The string content, if this is a quoted string.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Str(value) => Some(value),
			_ => None,
		}
	}
}

/// A parsed `INSERT INTO <table> (<columns>) VALUES ...;` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertBlock {
	/// Table name as written.
	pub table: String,
	/// Column names in declaration order.
	pub columns: Vec<String>,
	/// One entry per tuple, each as long as `columns`.
	pub rows: Vec<Vec<SqlLiteral>>,
}

impl InsertBlock {
	/// Position of `column`, compared case-insensitively.
	pub fn column_index(&self, column: &str) -> Option<usize> {
		self.columns
			.iter()
			.position(|c| c.eq_ignore_ascii_case(column))
	}

	/// String values of `column`, one per row. Non-string literals are skipped.
	pub fn strings<'a>(&'a self, column: &str) -> impl Iterator<Item = &'a str> + use<'a> {
		let index = self.column_index(column);
		self.rows
			.iter()
			.filter_map(move |row| index.and_then(|i| row.get(i)).and_then(SqlLiteral::as_str))
	}
}

/// Finds every `INSERT ... VALUES` block in `sql`.
///
/// Header text inside string literals of an earlier block is never matched,
/// because scanning resumes after the previous block's terminator.
///
/// # Errors
///
/// Returns [`SeedingError::ParseError`] for an unterminated literal or tuple,
/// or a tuple whose arity does not match the column list.
pub fn parse_insert_blocks(sql: &str) -> SeedingResult<Vec<InsertBlock>> {
	let mut blocks = Vec::new();
	let mut position = 0;

	while let Some(captures) = INSERT_HEADER.captures_at(sql, position) {
		let (Some(whole), Some(table), Some(columns)) =
			(captures.get(0), captures.get(1), captures.get(2))
		else {
			break;
		};

		let columns: Vec<String> = columns
			.as_str()
			.split(',')
			.map(|c| c.trim().to_string())
			.filter(|c| !c.is_empty())
			.collect();

		let mut scanner = TupleScanner::new(sql, whole.end());
		let rows = scanner.rows(table.as_str(), columns.len())?;
		position = scanner.offset;

		blocks.push(InsertBlock {
			table: table.as_str().to_string(),
			columns,
			rows,
		});
	}

	Ok(blocks)
}

struct TupleScanner<'a> {
	source: &'a str,
	offset: usize,
}

impl<'a> TupleScanner<'a> {
	fn new(source: &'a str, offset: usize) -> Self {
		Self { source, offset }
	}

	fn peek(&self) -> Option<char> {
		self.source[self.offset..].chars().next()
	}

	fn bump(&mut self) -> Option<char> {
		let c = self.peek()?;
		self.offset += c.len_utf8();
		Some(c)
	}

	fn skip_whitespace(&mut self) {
		while self.peek().is_some_and(char::is_whitespace) {
			self.bump();
		}
	}

	fn error(&self, table: &str, message: &str) -> SeedingError {
		SeedingError::ParseError(format!(
			"{} in VALUES list of {} at byte {}",
			message, table, self.offset
		))
	}

	/// Reads tuples up to the `;` closing the statement, or the end of input.
	fn rows(&mut self, table: &str, arity: usize) -> SeedingResult<Vec<Vec<SqlLiteral>>> {
		let mut rows = Vec::new();
		loop {
			self.skip_whitespace();
			match self.peek() {
				Some('(') => {
					self.bump();
					let row = self.tuple(table)?;
					if row.len() != arity {
						return Err(self.error(
							table,
							&format!("tuple has {} values but {} columns", row.len(), arity),
						));
					}
					rows.push(row);
				}
				Some(',') => {
					self.bump();
				}
				Some(';') => {
					self.bump();
					return Ok(rows);
				}
				None => return Ok(rows),
				Some(other) => {
					return Err(self.error(table, &format!("unexpected character {:?}", other)));
				}
			}
		}
	}

	fn tuple(&mut self, table: &str) -> SeedingResult<Vec<SqlLiteral>> {
		let mut values = Vec::new();
		loop {
			self.skip_whitespace();
			let value = match self.peek() {
				Some('\'') => {
					self.bump();
					SqlLiteral::Str(self.string(table)?)
				}
				Some(_) => self.bare(),
				None => return Err(self.error(table, "unterminated tuple")),
			};
			values.push(value);

			self.skip_whitespace();
			match self.bump() {
				Some(',') => continue,
				Some(')') => return Ok(values),
				Some(other) => {
					return Err(self.error(table, &format!("unexpected character {:?}", other)));
				}
				None => return Err(self.error(table, "unterminated tuple")),
			}
		}
	}

	fn string(&mut self, table: &str) -> SeedingResult<String> {
		let mut value = String::new();
		loop {
			match self.bump() {
				Some('\'') if self.peek() == Some('\'') => {
					self.bump();
					value.push('\'');
				}
				Some('\'') => return Ok(value),
				Some(c) => value.push(c),
				None => return Err(self.error(table, "unterminated string literal")),
			}
		}
	}

	fn bare(&mut self) -> SqlLiteral {
		let start = self.offset;
		while self
			.peek()
			.is_some_and(|c| c != ',' && c != ')' && !c.is_whitespace())
		{
			self.bump();
		}
		let token = &self.source[start..self.offset];
		if token.eq_ignore_ascii_case("NULL") {
			SqlLiteral::Null
		} else {
			SqlLiteral::Bare(token.to_string())
		}
	}
}
