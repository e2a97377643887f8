//! Config command - manage configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use rinkstat_store::{CollectorConfig, default_config_dir};
use tracing::info;

use crate::{Cli, ExitCode};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration, overrides included.
    Show,

    /// Show configuration paths.
    Path,

    /// Write a config file with default values.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Runs the config command.
pub fn run(args: &ConfigArgs, cli: &Cli) -> Result<ExitCode> {
    match &args.action {
        ConfigAction::Show => show_config(cli),
        ConfigAction::Path => show_paths(cli),
        ConfigAction::Init { force } => init_config(*force, cli),
    }
}

fn show_config(cli: &Cli) -> Result<ExitCode> {
    let config = cli.collector_config()?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(ExitCode::Success)
}

fn show_paths(cli: &Cli) -> Result<ExitCode> {
    let paths = serde_json::json!({
        "config_dir": default_config_dir().display().to_string(),
        "config_file": cli.config_path().display().to_string(),
    });
    println!("{}", serde_json::to_string_pretty(&paths)?);
    Ok(ExitCode::Success)
}

fn init_config(force: bool, cli: &Cli) -> Result<ExitCode> {
    let path = cli.config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    CollectorConfig::default().save_to(&path)?;
    info!(path = %path.display(), "Config initialised");
    if !cli.quiet {
        println!("Wrote {}", path.display());
    }

    Ok(ExitCode::Success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_init_writes_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rinkstat").join("config.json");
        let path_str = path.to_str().unwrap();

        let cli = cli(&["rinkstat", "-q", "--config", path_str, "config", "init"]);
        let crate::Commands::Config(args) = &cli.command else {
            panic!("expected config");
        };

        assert_eq!(run(args, &cli).unwrap(), ExitCode::Success);
        assert_eq!(CollectorConfig::load_from(&path).unwrap(), CollectorConfig::default());

        // A second init without --force refuses to clobber the file.
        assert!(run(args, &cli).is_err());
    }

    #[test]
    fn test_init_force_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{"max_retries": 9}"#).unwrap();

        let cli = cli(&[
            "rinkstat",
            "-q",
            "--config",
            path.to_str().unwrap(),
            "config",
            "init",
            "--force",
        ]);
        let crate::Commands::Config(args) = &cli.command else {
            panic!("expected config");
        };

        run(args, &cli).unwrap();
        assert_eq!(CollectorConfig::load_from(&path).unwrap().max_retries, 3);
    }
}
