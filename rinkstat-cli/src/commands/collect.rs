//! Collect command - fetch and save several endpoints.

use anyhow::Result;
use clap::Args;
use tracing::{info, warn};

use crate::collector::Collector;
use crate::{Cli, ExitCode};

/// Arguments for the collect command.
#[derive(Args)]
pub struct CollectArgs {
    /// Endpoint paths to collect, in order.
    #[arg(required = true)]
    pub endpoints: Vec<String>,

    /// Stop at the first failed endpoint.
    #[arg(long)]
    pub fail_fast: bool,
}

/// Result of one collect run.
#[derive(Debug, Default)]
struct Summary {
    saved: Vec<String>,
    failed: Vec<(String, String)>,
}

impl Summary {
    fn exit_code(&self) -> ExitCode {
        if self.failed.is_empty() {
            ExitCode::Success
        } else {
            ExitCode::FetchFailed
        }
    }
}

/// Runs the collect command.
///
/// Endpoints are fetched one after another through a single fetcher, so the
/// rate limit spans the whole run.
pub async fn run(args: &CollectArgs, cli: &Cli) -> Result<ExitCode> {
    let config = cli.collector_config()?;
    let mut collector = Collector::from_config(&config)?;

    info!(
        endpoints = args.endpoints.len(),
        data_dir = %config.data_dir.display(),
        "Collecting"
    );

    let mut summary = Summary::default();
    for endpoint in &args.endpoints {
        match collector.collect(endpoint, None).await {
            Ok(path) => {
                if !cli.quiet {
                    println!("{endpoint} -> {}", path.display());
                }
                summary.saved.push(endpoint.clone());
            }
            Err(e) => {
                warn!(endpoint = %endpoint, "Endpoint skipped");
                summary.failed.push((endpoint.clone(), format!("{e:#}")));
                if args.fail_fast {
                    break;
                }
            }
        }
    }

    if !cli.quiet {
        println!(
            "\n{} saved, {} failed",
            summary.saved.len(),
            summary.failed.len()
        );
        for (endpoint, error) in &summary.failed {
            eprintln!("  {endpoint}: {error}");
        }
    }

    Ok(summary.exit_code())
}
