//! Splitting of SQL scripts into individual statements.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
	Code,
	SingleQuoted,
	DoubleQuoted,
	LineComment,
	BlockComment,
}

/// Splits `sql` into statements.
///
/// `--` line comments and `/* */` block comments are removed, a `;` outside
/// quotes ends a statement, and each statement is trimmed with its terminator
/// dropped. Empty statements are skipped. Text after the last `;` is kept as a
/// final statement.
///
/// # Example
///
/// ```
/// use blogseed_seeding::loader::split_statements;
///
/// let statements = split_statements("-- seed\nINSERT INTO t VALUES ('a;b');\nSELECT 1;");
/// assert_eq!(statements, vec!["INSERT INTO t VALUES ('a;b')", "SELECT 1"]);
/// ```
pub fn split_statements(sql: &str) -> Vec<String> {
	let mut statements = Vec::new();
	let mut current = String::new();
	let mut state = State::Code;
	let mut chars = sql.chars().peekable();

	while let Some(c) = chars.next() {
		match state {
			State::Code => match c {
				'\'' => {
					state = State::SingleQuoted;
					current.push(c);
				}
				'"' => {
					state = State::DoubleQuoted;
					current.push(c);
				}
				'-' if chars.peek() == Some(&'-') => {
					chars.next();
					state = State::LineComment;
				}
				'/' if chars.peek() == Some(&'*') => {
					chars.next();
					state = State::BlockComment;
				}
				';' => flush(&mut current, &mut statements),
				_ => current.push(c),
			},
			State::SingleQuoted => {
				current.push(c);
				if c == '\'' {
					// A doubled quote stays inside the literal.
					if chars.peek() == Some(&'\'') {
						chars.next();
						current.push('\'');
					} else {
						state = State::Code;
					}
				}
			}
			State::DoubleQuoted => {
				current.push(c);
				if c == '"' {
					state = State::Code;
				}
			}
			State::LineComment => {
				if c == '\n' {
					current.push(c);
					state = State::Code;
				}
			}
			State::BlockComment => {
				if c == '*' && chars.peek() == Some(&'/') {
					chars.next();
					current.push(' ');
					state = State::Code;
				}
			}
		}
	}

	flush(&mut current, &mut statements);
	statements
}

fn flush(current: &mut String, statements: &mut Vec<String>) {
	let statement = current.trim();
	if !statement.is_empty() {
		statements.push(statement.to_string());
	}
	current.clear();
}
