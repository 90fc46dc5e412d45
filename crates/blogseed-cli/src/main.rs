//! blogseed
//!
//! Generates synthetic blog data (authors, articles, comments) as PostgreSQL
//! `INSERT` statements, verifies the references in a generated file, and loads
//! it into a running database.
//!
//! ## Usage
//!
//! ```bash
//! blogseed generate --authors 100 --articles 500 --comments 2000 --seed 42 --output data.sql
//! blogseed verify data.sql
//! blogseed populate --sql-file data.sql
//! blogseed populate --generate --authors 10 --articles 50 --comments 200
//! ```

mod logging;

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use blogseed_seeding::commands::{
	GenerateCommand, GenerateOptions, PopulateCommand, PopulateOptions, VerifyArgs, VerifyCommand,
};
use blogseed_seeding::config::parse_timestamp;
use blogseed_seeding::loader::ConnectionConfig;
use blogseed_seeding::{GenerationConfig, SeedingResult};
use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

#[derive(Parser)]
#[command(name = "blogseed")]
#[command(about = "Synthetic blog data generator for PostgreSQL", long_about = None)]
#[command(version)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Verbosity level (can be repeated)
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	verbosity: u8,
}

#[derive(Subcommand)]
enum Commands {
	/// Generate SQL INSERT statements for authors, articles and comments
	Generate {
		#[command(flatten)]
		counts: CountArgs,

		/// Output file (defaults to stdout)
		#[arg(short, long, value_name = "FILE")]
		output: Option<PathBuf>,

		/// Random seed for reproducible output
		#[arg(long)]
		seed: Option<u64>,

		/// Fraction of articles that are published (0.0 to 1.0)
		#[arg(long, default_value_t = 0.7)]
		published_ratio: f64,

		/// Pin "now" for generated dates (YYYY-MM-DD HH:MM:SS)
		#[arg(long, value_name = "TIMESTAMP", value_parser = parse_reference_time)]
		reference_time: Option<NaiveDateTime>,
	},

	/// Check that every article and comment references an existing parent
	Verify {
		/// SQL file produced by `generate`
		#[arg(value_name = "SQL_FILE")]
		sql_file: PathBuf,
	},

	/// Load a SQL file into PostgreSQL
	Populate {
		#[command(flatten)]
		connection: ConnectionArgs,

		/// SQL file to execute
		#[arg(long, value_name = "FILE", default_value = "data.sql")]
		sql_file: PathBuf,

		/// Generate the SQL file before loading it
		#[arg(long)]
		generate: bool,

		#[command(flatten)]
		counts: CountArgs,

		/// Random seed used with --generate
		#[arg(long)]
		seed: Option<u64>,

		/// Connection attempts before giving up
		#[arg(long, default_value_t = 5)]
		retries: u32,

		/// Seconds to wait between connection attempts
		#[arg(long, value_name = "SECONDS", default_value_t = 2)]
		retry_delay: u64,
	},
}

#[derive(Args, Debug, Clone, PartialEq)]
struct CountArgs {
	/// Number of authors to generate
	#[arg(long, default_value_t = 100)]
	authors: usize,

	/// Number of articles to generate
	#[arg(long, default_value_t = 500)]
	articles: usize,

	/// Number of comments to generate
	#[arg(long, default_value_t = 2000)]
	comments: usize,
}

impl CountArgs {
	fn config(&self) -> GenerationConfig {
		GenerationConfig::new()
			.with_authors(self.authors)
			.with_articles(self.articles)
			.with_comments(self.comments)
	}
}

#[derive(Args, Debug, Clone, PartialEq)]
struct ConnectionArgs {
	/// Database host
	#[arg(long, env = "BLOGSEED_DB_HOST", default_value = "localhost")]
	host: String,

	/// Database port
	#[arg(long, env = "BLOGSEED_DB_PORT", default_value_t = 5432)]
	port: u16,

	/// Database name
	#[arg(long, env = "BLOGSEED_DB_NAME", default_value = "blog_db")]
	database: String,

	/// Database user
	#[arg(long, env = "BLOGSEED_DB_USER", default_value = "blog_user")]
	user: String,

	/// Database password
	#[arg(
		long,
		env = "BLOGSEED_DB_PASSWORD",
		default_value = "blog_password",
		hide_env_values = true
	)]
	password: String,
}

impl From<ConnectionArgs> for ConnectionConfig {
	fn from(args: ConnectionArgs) -> Self {
		ConnectionConfig::new()
			.with_host(args.host)
			.with_port(args.port)
			.with_database(args.database)
			.with_user(args.user)
			.with_password(args.password)
	}
}

fn parse_reference_time(value: &str) -> Result<NaiveDateTime, String> {
	parse_timestamp("reference_time", value).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init(cli.verbosity);

	let result = match cli.command {
		Commands::Generate {
			counts,
			output,
			seed,
			published_ratio,
			reference_time,
		} => run_generate(counts, output, seed, published_ratio, reference_time),
		Commands::Verify { sql_file } => run_verify(sql_file),
		Commands::Populate {
			connection,
			sql_file,
			generate,
			counts,
			seed,
			retries,
			retry_delay,
		} => {
			run_populate(
				connection,
				sql_file,
				generate.then(|| with_seed(counts.config(), seed)),
				retries,
				Duration::from_secs(retry_delay),
			)
			.await
		}
	};

	match result {
		Ok(true) => {}
		Ok(false) => process::exit(1),
		Err(e) => {
			eprintln!("Error: {}", e);
			process::exit(1);
		}
	}
}

fn with_seed(config: GenerationConfig, seed: Option<u64>) -> GenerationConfig {
	match seed {
		Some(seed) => config.with_seed(seed),
		None => config,
	}
}

fn run_generate(
	counts: CountArgs,
	output: Option<PathBuf>,
	seed: Option<u64>,
	published_ratio: f64,
	reference_time: Option<NaiveDateTime>,
) -> SeedingResult<bool> {
	let mut config = with_seed(counts.config(), seed).with_published_ratio(published_ratio);
	if let Some(now) = reference_time {
		config = config.with_reference_time(now);
	}

	let mut options = GenerateOptions::new().with_config(config);
	if let Some(path) = output {
		options = options.with_output(path);
	}

	let result = GenerateCommand::new().execute(options)?;
	match &result.output {
		Some(path) => eprintln!(
			"{} {} ({} authors, {} articles, {} published, {} comments)",
			"✓ SQL data generated:".green(),
			path.display(),
			result.authors,
			result.articles,
			result.published,
			result.comments
		),
		None => println!("{}", result.sql),
	}
	Ok(true)
}

fn run_verify(sql_file: PathBuf) -> SeedingResult<bool> {
	let report = VerifyCommand::new().execute(VerifyArgs { sql_file })?;
	println!("{}", report);
	Ok(report.is_valid())
}

async fn run_populate(
	connection: ConnectionArgs,
	sql_file: PathBuf,
	generate: Option<GenerationConfig>,
	retries: u32,
	retry_delay: Duration,
) -> SeedingResult<bool> {
	let mut options = PopulateOptions::new()
		.with_connection(connection.into())
		.with_sql_file(sql_file)
		.with_retries(retries, retry_delay);
	if let Some(config) = generate {
		options = options.with_generate(config);
	}

	let result = PopulateCommand::new().execute(options).await?;

	eprintln!();
	eprintln!("Final database state:");
	for (table, added) in result.added() {
		let total = result
			.final_counts
			.iter()
			.find(|(t, _)| *t == table)
			.map_or(0, |(_, c)| *c);
		eprintln!("  {}: {} rows ({})", table, total, format!("+{}", added).green());
	}
	eprintln!(
		"Statements: {} succeeded, {} skipped, {} failed",
		result.execution.executed.to_string().green(),
		result.execution.skipped.to_string().yellow(),
		if result.execution.failed > 0 {
			result.execution.failed.to_string().red()
		} else {
			result.execution.failed.to_string().green()
		}
	);

	if result.is_success() {
		eprintln!("{}", "✅ Database populated successfully!".green());
	} else {
		eprintln!("{}", "❌ Failed to populate database".red());
	}
	Ok(result.is_success())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_generate_defaults() {
		let cli = Cli::try_parse_from(["blogseed", "generate"]).unwrap();
		match cli.command {
			Commands::Generate {
				counts,
				output,
				seed,
				published_ratio,
				reference_time,
			} => {
				assert_eq!(
					counts,
					CountArgs {
						authors: 100,
						articles: 500,
						comments: 2000,
					}
				);
				assert_eq!(output, None);
				assert_eq!(seed, None);
				assert_eq!(published_ratio, 0.7);
				assert_eq!(reference_time, None);
			}
			_ => panic!("expected generate"),
		}
	}

	#[rstest]
	fn test_generate_flags() {
		let cli = Cli::try_parse_from([
			"blogseed",
			"-vv",
			"generate",
			"--authors",
			"3",
			"--articles",
			"5",
			"--comments",
			"10",
			"--seed",
			"42",
			"--published-ratio",
			"1.0",
			"--output",
			"out.sql",
			"--reference-time",
			"2024-06-01 12:00:00",
		])
		.unwrap();

		assert_eq!(cli.verbosity, 2);
		match cli.command {
			Commands::Generate {
				counts,
				output,
				seed,
				published_ratio,
				reference_time,
			} => {
				assert_eq!(counts.config().authors, 3);
				assert_eq!(output, Some(PathBuf::from("out.sql")));
				assert_eq!(seed, Some(42));
				assert_eq!(published_ratio, 1.0);
				assert_eq!(
					reference_time.map(|t| t.to_string()),
					Some("2024-06-01 12:00:00".to_string())
				);
			}
			_ => panic!("expected generate"),
		}
	}

	#[rstest]
	#[case::bad_timestamp(&["blogseed", "generate", "--reference-time", "noon"])]
	#[case::negative_count(&["blogseed", "generate", "--authors", "-1"])]
	#[case::missing_file(&["blogseed", "verify"])]
	fn test_rejected_arguments(#[case] args: &[&str]) {
		assert!(Cli::try_parse_from(args).is_err());
	}

	#[rstest]
	fn test_verify_args() {
		let cli = Cli::try_parse_from(["blogseed", "verify", "data.sql"]).unwrap();
		assert!(matches!(
			cli.command,
			Commands::Verify { sql_file } if sql_file == PathBuf::from("data.sql")
		));
	}

	#[rstest]
	fn test_populate_flags() {
		let cli = Cli::try_parse_from([
			"blogseed",
			"populate",
			"--host",
			"db",
			"--port",
			"6543",
			"--password",
			"pw",
			"--generate",
			"--authors",
			"2",
			"--retries",
			"1",
			"--retry-delay",
			"0",
		])
		.unwrap();

		match cli.command {
			Commands::Populate {
				connection,
				sql_file,
				generate,
				counts,
				retries,
				retry_delay,
				..
			} => {
				let config = ConnectionConfig::from(connection);
				assert_eq!(config.host, "db");
				assert_eq!(config.port, 6543);
				assert_eq!(config.password, "pw");
				assert_eq!(sql_file, PathBuf::from("data.sql"));
				assert!(generate);
				assert_eq!(counts.authors, 2);
				assert_eq!(counts.articles, 500);
				assert_eq!((retries, retry_delay), (1, 0));
			}
			_ => panic!("expected populate"),
		}
	}

	#[rstest]
	fn test_with_seed() {
		let config = GenerationConfig::new();
		assert_eq!(with_seed(config.clone(), None).seed, None);
		assert_eq!(with_seed(config, Some(9)).seed, Some(9));
	}

	#[rstest]
	#[case(0, "info")]
	#[case(1, "debug")]
	#[case(4, "trace")]
	fn test_default_directive(#[case] verbosity: u8, #[case] expected: &str) {
		assert_eq!(logging::default_directive(verbosity), expected);
	}

	#[rstest]
	fn test_generate_writes_file() {
		let dir = tempfile::TempDir::new().unwrap();
		let path = dir.path().join("data.sql");
		let counts = CountArgs {
			authors: 2,
			articles: 3,
			comments: 4,
		};

		assert!(run_generate(counts, Some(path.clone()), Some(1), 0.5, None).unwrap());
		assert!(run_verify(path).unwrap());
	}
}
