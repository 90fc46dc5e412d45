//! Executing SQL scripts against PostgreSQL.

use std::path::Path;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{ConnectOptions, Connection};

use super::split_statements;
use crate::error::{SeedingError, SeedingResult};

/// Tables reported by [`DatabasePopulator::table_counts`], in load order.
pub const TABLES: [&str; 3] = ["Authors", "Articles", "Comments"];

/// Per-attempt connection timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

const PREVIEW_CHARS: usize = 200;

/// SQLSTATE codes meaning the data or object is already present.
const TOLERATED_CODES: [&str; 3] = [
	"23505", // unique_violation
	"42P07", // duplicate_table
	"42710", // duplicate_object
];

/// PostgreSQL connection parameters.
///
/// # Example
///
/// ```
/// use blogseed_seeding::loader::ConnectionConfig;
///
/// let config = ConnectionConfig::new()
///     .with_host("db.internal")
///     .with_port(6543);
///
/// assert_eq!(config.target(), "db.internal:6543/blog_db");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
	/// Server host name.
	pub host: String,
	/// Server port.
	pub port: u16,
	/// Database name.
	pub database: String,
	/// Login role.
	pub user: String,
	/// Login password.
	pub password: String,
	/// Timeout applied to each connection attempt.
	pub connect_timeout: Duration,
}

impl Default for ConnectionConfig {
	fn default() -> Self {
		Self {
			host: "localhost".to_string(),
			port: 5432,
			database: "blog_db".to_string(),
			user: "blog_user".to_string(),
			password: "blog_password".to_string(),
			connect_timeout: DEFAULT_CONNECT_TIMEOUT,
		}
	}
}

impl ConnectionConfig {
	/// Creates the default configuration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the host.
	pub fn with_host(mut self, host: impl Into<String>) -> Self {
		self.host = host.into();
		self
	}

	/// Sets the port.
	pub fn with_port(mut self, port: u16) -> Self {
		self.port = port;
		self
	}

	/// Sets the database name.
	pub fn with_database(mut self, database: impl Into<String>) -> Self {
		self.database = database.into();
		self
	}

	/// Sets the login role.
	pub fn with_user(mut self, user: impl Into<String>) -> Self {
		self.user = user.into();
		self
	}

	/// Sets the password.
	pub fn with_password(mut self, password: impl Into<String>) -> Self {
		self.password = password.into();
		self
	}

	/// Sets the per-attempt timeout.
	pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
		self.connect_timeout = timeout;
		self
	}

	/// `host:port/database`, for log lines. Never includes credentials.
	pub fn target(&self) -> String {
		format!("{}:{}/{}", self.host, self.port, self.database)
	}

	fn connect_options(&self) -> PgConnectOptions {
		PgConnectOptions::new()
			.host(&self.host)
			.port(self.port)
			.database(&self.database)
			.username(&self.user)
			.password(&self.password)
			.disable_statement_logging()
	}
}

/// Statement tallies from one [`DatabasePopulator::execute_sql`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionReport {
	/// Statements found in the script.
	pub total: usize,
	/// Statements that ran successfully.
	pub executed: usize,
	/// Statements rejected because their data or object already existed.
	pub skipped: usize,
	/// Statements that failed for any other reason.
	pub failed: usize,
}

impl ExecutionReport {
	/// `true` when no statement failed. Skipped statements do not count.
	pub fn is_success(&self) -> bool {
		self.failed == 0
	}
}

/// Returns `true` if a database error means the data is already present.
///
/// Matches the duplicate SQLSTATE codes, or messages containing
/// "duplicate key" or "already exists" for drivers that report no code.
pub fn is_tolerable(code: Option<&str>, message: &str) -> bool {
	if code.is_some_and(|c| TOLERATED_CODES.contains(&c)) {
		return true;
	}
	let message = message.to_lowercase();
	message.contains("duplicate key") || message.contains("already exists")
}

fn preview(statement: &str) -> String {
	statement
		.chars()
		.take(PREVIEW_CHARS)
		.map(|c| if c == '\n' { ' ' } else { c })
		.collect()
}

/// Statement interval between progress lines, or `None` for short scripts.
fn progress_interval(total: usize) -> Option<usize> {
	(total > 10).then(|| (total / 10).max(1))
}

/// Runs SQL scripts over a single PostgreSQL connection.
///
/// Statements run one at a time in autocommit mode, so a failing statement
/// does not roll back earlier ones.
#[derive(Debug)]
pub struct DatabasePopulator {
	config: ConnectionConfig,
	connection: Option<PgConnection>,
}

impl DatabasePopulator {
	/// Creates an unconnected populator.
	pub fn new(config: ConnectionConfig) -> Self {
		Self {
			config,
			connection: None,
		}
	}

	/// The connection parameters.
	pub fn config(&self) -> &ConnectionConfig {
		&self.config
	}

	/// Whether [`DatabasePopulator::connect`] has succeeded and the connection
	/// has not been closed.
	pub fn is_connected(&self) -> bool {
		self.connection.is_some()
	}

	/// Connects, making up to `retries` attempts `delay` apart.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::ConnectionError`] once every attempt has failed.
	pub async fn connect(&mut self, retries: u32, delay: Duration) -> SeedingResult<()> {
		let retries = retries.max(1);
		let options = self.config.connect_options();
		let target = self.config.target();
		let mut last_error = String::new();

		for attempt in 1..=retries {
			tracing::info!(attempt, retries, database = %target, "connecting to database");

			let result =
				tokio::time::timeout(self.config.connect_timeout, PgConnection::connect_with(&options))
					.await;
			match result {
				Ok(Ok(connection)) => {
					tracing::info!(database = %target, "connected to database");
					self.connection = Some(connection);
					return Ok(());
				}
				Ok(Err(e)) => last_error = e.to_string(),
				Err(_) => {
					last_error = format!("timed out after {:?}", self.config.connect_timeout);
				}
			}

			if attempt < retries {
				tracing::warn!(
					attempt,
					retries,
					error = %last_error,
					"connection failed, retrying in {:?}",
					delay
				);
				tokio::time::sleep(delay).await;
			}
		}

		Err(SeedingError::ConnectionError(format!(
			"failed to connect to {} after {} attempts: {}",
			target, retries, last_error
		)))
	}

	fn connection(&mut self) -> SeedingResult<&mut PgConnection> {
		self.connection
			.as_mut()
			.ok_or_else(|| SeedingError::ConnectionError("not connected".to_string()))
	}

	/// Row counts of [`TABLES`].
	///
	/// Any failure is logged and yields an empty list.
	pub async fn table_counts(&mut self) -> Vec<(String, i64)> {
		let connection = match self.connection() {
			Ok(connection) => connection,
			Err(e) => {
				tracing::warn!(error = %e, "could not get table counts");
				return Vec::new();
			}
		};

		let mut counts = Vec::with_capacity(TABLES.len());
		for table in TABLES {
			let sql = format!("SELECT COUNT(*) FROM {}", table);
			match sqlx::query_scalar::<_, i64>(&sql)
				.fetch_one(&mut *connection)
				.await
			{
				Ok(count) => counts.push((table.to_string(), count)),
				Err(e) => {
					tracing::warn!(table, error = %e, "could not get table counts");
					return Vec::new();
				}
			}
		}
		counts
	}

	/// Splits `sql` and executes each statement in order.
	///
	/// Statement failures never abort the run; they are tallied in the
	/// returned report.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::ConnectionError`] if not connected.
	pub async fn execute_sql(&mut self, sql: &str) -> SeedingResult<ExecutionReport> {
		let statements = split_statements(sql);
		let connection = self.connection()?;

		let mut report = ExecutionReport {
			total: statements.len(),
			..Default::default()
		};
		tracing::info!(statements = report.total, "executing SQL statements");
		let interval = progress_interval(report.total);

		for (index, statement) in statements.iter().enumerate() {
			let number = index + 1;
			match sqlx::raw_sql(statement).execute(&mut *connection).await {
				Ok(_) => report.executed += 1,
				Err(e) => {
					let (code, message) = match &e {
						sqlx::Error::Database(db) => {
							(db.code().map(|c| c.into_owned()), db.message().to_string())
						}
						other => (None, other.to_string()),
					};
					if is_tolerable(code.as_deref(), &message) {
						report.skipped += 1;
						tracing::warn!(
							statement = number,
							code = code.as_deref().unwrap_or("-"),
							"{}",
							message
						);
					} else {
						report.failed += 1;
						tracing::error!(
							statement = number,
							code = code.as_deref().unwrap_or("-"),
							preview = %preview(statement),
							"{}",
							message
						);
					}
				}
			}

			if interval.is_some_and(|step| number % step == 0 || number == report.total) {
				tracing::info!(
					"progress: {}/{} statements executed ({} successful, {} skipped, {} failed)",
					number,
					report.total,
					report.executed,
					report.skipped,
					report.failed
				);
			}
		}

		tracing::info!(
			executed = report.executed,
			skipped = report.skipped,
			failed = report.failed,
			"execution complete"
		);
		Ok(report)
	}

	/// Reads the script at `path` and runs it with
	/// [`DatabasePopulator::execute_sql`].
	///
	/// # Errors
	///
	/// Returns [`SeedingError::FileNotFound`] if `path` does not exist.
	pub async fn execute_file(&mut self, path: &Path) -> SeedingResult<ExecutionReport> {
		let content = tokio::fs::read_to_string(path).await.map_err(|e| {
			if e.kind() == std::io::ErrorKind::NotFound {
				SeedingError::FileNotFound(path.display().to_string())
			} else {
				SeedingError::IoError(e)
			}
		})?;
		tracing::info!(
			path = %path.display(),
			"reading SQL file ({:.1} KB)",
			content.len() as f64 / 1024.0
		);
		self.execute_sql(&content).await
	}

	/// Closes the connection, if open.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::DatabaseError`] if the graceful shutdown fails.
	pub async fn close(&mut self) -> SeedingResult<()> {
		if let Some(connection) = self.connection.take() {
			connection.close().await?;
			tracing::info!("database connection closed");
		}
		Ok(())
	}
}
