//! Log subscriber setup.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive that overrides `-v`.
pub const LOG_ENV: &str = "BLOGSEED_LOG";

/// Default filter for a `-v` count.
pub fn default_directive(verbosity: u8) -> &'static str {
	match verbosity {
		0 => "info",
		1 => "debug",
		_ => "trace",
	}
}

/// Installs a formatter writing to stderr, leaving stdout for SQL and reports.
pub fn init(verbosity: u8) {
	let filter = EnvFilter::try_from_env(LOG_ENV)
		.unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

	tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_env_filter(filter)
		.with_target(false)
		.init();
}
