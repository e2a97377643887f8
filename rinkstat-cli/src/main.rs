// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! rinkstat CLI - rate-limited collection of NHL web API data.
//!
//! # Examples
//!
//! ```bash
//! # Print a payload
//! rinkstat get standings/now --pretty
//!
//! # Save a payload to the data directory
//! rinkstat get roster/TOR/20232024 --save
//!
//! # Collect several endpoints, one request every two seconds
//! rinkstat --rate-limit 0.5 collect standings/now schedule/now
//!
//! # Write a default config file
//! rinkstat config init
//! ```

mod collector;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rinkstat_core::FetchFailure;
use rinkstat_store::{CollectorConfig, StoreError};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{collect, config, get};

// ============================================================================
// CLI Definition
// ============================================================================

/// rinkstat CLI - NHL web API collector.
#[derive(Parser)]
#[command(name = "rinkstat")]
#[command(about = "Rate-limited, retrying collector for the NHL web API")]
#[command(long_about = r#"
rinkstat fetches JSON from the NHL web API at a bounded request rate,
retrying transient failures with exponential backoff, and stores the raw
responses for later analysis.

Examples:
  rinkstat get standings/now --pretty
  rinkstat get roster/TOR/20232024 --save
  rinkstat collect standings/now schedule/now
  rinkstat config show
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use instead of the default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Maximum requests per second.
    #[arg(long, global = true)]
    pub rate_limit: Option<f64>,

    /// Maximum attempts per request.
    #[arg(long, global = true)]
    pub max_retries: Option<u32>,

    /// Per-request timeout in seconds.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Cap on a single backoff delay, in seconds.
    #[arg(long, global = true)]
    pub max_backoff: Option<u64>,

    /// Directory raw payloads are saved to.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// API base URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (no logging, minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch one endpoint and print or save it.
    #[command(visible_alias = "g")]
    Get(get::GetArgs),

    /// Fetch and save several endpoints in order.
    #[command(visible_alias = "c")]
    Collect(collect::CollectArgs),

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// CLI exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// A fetch failed.
    FetchFailed = 2,
    /// Configuration could not be loaded or is invalid.
    Config = 3,
}

impl ExitCode {
    /// Exit code for an error that ended a command.
    pub fn for_error(err: &anyhow::Error) -> Self {
        if err.downcast_ref::<FetchFailure>().is_some() {
            ExitCode::FetchFailed
        } else if matches!(err.downcast_ref::<StoreError>(), Some(StoreError::Config(_))) {
            ExitCode::Config
        } else {
            ExitCode::Error
        }
    }
}

impl Cli {
    /// Path of the config file in effect.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(CollectorConfig::default_path)
    }

    /// Loads the config file and applies command-line overrides.
    pub fn collector_config(&self) -> Result<CollectorConfig, StoreError> {
        let loaded = match &self.config {
            Some(path) => CollectorConfig::load_from(path),
            None => CollectorConfig::load(),
        };
        let mut config = loaded.map_err(|e| {
            StoreError::Config(format!("{}: {e}", self.config_path().display()))
        })?;

        if let Some(base_url) = &self.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(data_dir) = &self.data_dir {
            config.data_dir.clone_from(data_dir);
        }
        if let Some(rate_limit) = self.rate_limit {
            config.rate_limit = rate_limit;
        }
        if let Some(max_retries) = self.max_retries {
            config.max_retries = max_retries;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(max_backoff) = self.max_backoff {
            config.max_backoff_secs = Some(max_backoff);
        }

        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("rinkstat=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rinkstat=info"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Get(args) => get::run(args, &cli).await,
        Commands::Collect(args) => collect::run(args, &cli).await,
        Commands::Config(args) => config::run(args, &cli),
    };

    let code = match result {
        Ok(code) => code,
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e:#}");
            }
            ExitCode::for_error(&e)
        }
    };

    std::process::exit(code as i32);
}

// ============================================================================
// Tests
// ============================================================================
