//! CLI argument definitions
//!
//! Derive-based clap interface; parsed arguments are merged into the
//! file-based configuration with CLI taking precedence.

use clap::Parser;
use std::path::PathBuf;

use crate::config::CliConfig;
use crate::core::constants::output_formats;

fn parse_output_format(value: &str) -> Result<String, String> {
    if output_formats::ALL.contains(&value) {
        Ok(value.to_string())
    } else {
        Err(format!(
            "'{value}' is not a valid format (expected one of: {})",
            output_formats::ALL.join(", ")
        ))
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "linkprobe",
    version,
    about = "Validate URL reachability in bulk and report broken links"
)]
pub struct Cli {
    /// URLs to validate
    #[arg(value_name = "URLS")]
    pub urls: Vec<String>,

    /// Read URLs from a file, one per line
    #[arg(long, value_name = "PATH")]
    pub from_file: Option<PathBuf>,

    /// Path to a TOML config file (default: .linkprobe.toml lookup)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Records fetched from the backlog per batch
    #[arg(long, value_name = "COUNT")]
    pub batch_size: Option<u64>,

    /// Maximum concurrent probes within a batch
    #[arg(long, value_name = "COUNT")]
    pub concurrency: Option<usize>,

    /// Timeout in seconds for a single probe attempt
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Retry attempts after the initial probe for transient failures
    #[arg(long, value_name = "COUNT")]
    pub retries: Option<u32>,

    /// Custom User-Agent header
    #[arg(long, value_name = "AGENT")]
    pub user_agent: Option<String>,

    /// Broken links shown per report page
    #[arg(long, value_name = "COUNT", default_value_t = 100)]
    pub page_size: u64,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = output_formats::DEFAULT,
          value_parser = parse_output_format)]
    pub format: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all logging output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Convert parsed CLI arguments into the config-merge shape.
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        batch_size: cli.batch_size,
        max_parallelism: cli.concurrency,
        timeout_seconds: cli.timeout,
        max_retries: cli.retries,
        user_agent: cli.user_agent.clone(),
        verbose: cli.verbose,
        quiet: cli.quiet,
    }
}
