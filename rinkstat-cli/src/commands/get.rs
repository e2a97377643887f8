//! Get command - fetch one endpoint.

use anyhow::Result;
use clap::Args;
use rinkstat_core::Payload;
use tracing::info;

use crate::collector::Collector;
use crate::{Cli, ExitCode};

/// Arguments for the get command.
#[derive(Args)]
pub struct GetArgs {
    /// Endpoint path relative to the base URL, e.g. `standings/now`.
    pub endpoint: String,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Save to the data directory instead of printing, optionally under NAME.
    #[arg(long, value_name = "NAME")]
    pub save: Option<Option<String>>,
}

/// Runs the get command.
pub async fn run(args: &GetArgs, cli: &Cli) -> Result<ExitCode> {
    let config = cli.collector_config()?;
    let mut collector = Collector::from_config(&config)?;

    match &args.save {
        Some(name) => {
            let path = collector.collect(&args.endpoint, name.as_deref()).await?;
            info!(path = %path.display(), "Saved");
            if !cli.quiet {
                println!("{}", path.display());
            }
        }
        None => {
            let payload = collector.fetch(&args.endpoint).await?;
            println!("{}", render(&payload, args.pretty)?);
        }
    }

    Ok(ExitCode::Success)
}

/// Renders a payload as JSON text.
fn render(payload: &Payload, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(payload)?
    } else {
        serde_json::to_string(payload)?
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serde_json::json;

    fn get_args(args: &[&str]) -> GetArgs {
        match Cli::try_parse_from(args).unwrap().command {
            crate::Commands::Get(args) => args,
            _ => panic!("expected get"),
        }
    }

    #[test]
    fn test_save_flag_forms() {
        assert_eq!(get_args(&["rinkstat", "get", "teams"]).save, None);
        assert_eq!(get_args(&["rinkstat", "get", "teams", "--save"]).save, Some(None));
        assert_eq!(
            get_args(&["rinkstat", "get", "teams", "--save", "all-teams"]).save,
            Some(Some("all-teams".to_string()))
        );
    }

    #[test]
    fn test_render() {
        let payload = json!({"a": [1, 2]});
        assert_eq!(render(&payload, false).unwrap(), r#"{"a":[1,2]}"#);
        assert!(render(&payload, true).unwrap().contains('\n'));
    }
}
