//! `calparse` CLI: parse iCalendar property lines, durations and date-times.
//!
//! ## Usage
//!
//! ```sh
//! # One property line → JSON record
//! calparse property 'RRULE:FREQ=WEEKLY;BYDAY=SA'
//!
//! # A whole .ics file (unfolded line by line) → JSON array of records
//! calparse property -i event.ics -o event.json
//!
//! # Duration literal → JSON with total_seconds
//! calparse duration -PT15M
//!
//! # Date-time literal → RFC 3339 UTC instant
//! calparse time 20180115T214000 --timezone Europe/Berlin
//! ```
//!
//! Diagnostics go to stderr; `--verbose` or `RUST_LOG` raise the log level.

use anyhow::{Context, Result};
use calparse::{DstPolicy, IanaResolver, TimeParser};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "calparse",
    version,
    about = "Parse iCalendar property lines, durations and date-times"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log parser decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a property line, or every line of an iCalendar document
    Property {
        /// A single property line (reads a document from --input or stdin if omitted)
        line: Option<String>,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long, conflicts_with = "line")]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Parse a duration literal such as PT3H15M
    Duration {
        /// The duration literal, e.g. PT3H15M or -P1D
        #[arg(allow_hyphen_values = true)]
        literal: String,
    },
    /// Parse a date-time literal such as 20190531T083000Z
    Time {
        /// The date-time literal
        literal: String,
        /// IANA timezone for literals without a trailing Z
        #[arg(short, long, default_value = "UTC")]
        timezone: String,
        /// Fail instead of adjusting times inside DST gaps or folds
        #[arg(long)]
        reject_dst_ambiguity: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Property {
            line,
            input,
            output,
        } => {
            let json = match line {
                Some(line) => {
                    let record = calparse::parse_property(&line)
                        .with_context(|| format!("Failed to parse property line {line:?}"))?;
                    serde_json::to_string_pretty(&record)?
                }
                None => {
                    let text = read_input(input.as_deref())?;
                    let records =
                        calparse::parse_document(&text).context("Failed to parse document")?;
                    tracing::info!(count = records.len(), "parsed document");
                    serde_json::to_string_pretty(&records)?
                }
            };
            write_output(output.as_deref(), &json)?;
        }
        Commands::Duration { literal } => {
            let duration = calparse::parse_duration(&literal)
                .with_context(|| format!("Failed to parse duration {literal:?}"))?;
            let mut value = serde_json::to_value(duration)?;
            if let Value::Object(ref mut map) = value {
                map.insert("total_seconds".into(), duration.total_seconds().into());
            }
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Commands::Time {
            literal,
            timezone,
            reject_dst_ambiguity,
        } => {
            let policy = if reject_dst_ambiguity {
                DstPolicy::Reject
            } else {
                DstPolicy::ShiftForward
            };
            let parser = TimeParser::new(IanaResolver::with_policy(policy));
            let instant = parser
                .parse(&literal, &timezone)
                .with_context(|| format!("Failed to parse date-time {literal:?} in {timezone}"))?;
            println!("{}", instant.to_rfc3339());
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
