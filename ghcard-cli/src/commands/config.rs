//! Config command - manage configuration.

use std::path::Path;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use tracing::info;

use crate::config::{Config, ConfigError};
use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration.
    Show,

    /// Show configuration paths.
    Path,

    /// Write a configuration file with the defaults.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },

    /// Reset to defaults.
    Reset,
}

/// Runs the config command.
pub fn run(
    args: &ConfigArgs,
    cli: &Cli,
    config: Result<Config, ConfigError>,
    path: &Path,
) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(&config?, cli),
        ConfigAction::Path => show_paths(path, cli),
        ConfigAction::Init { force } => init_config(path, *force),
        ConfigAction::Reset => reset_config(path),
    }
}

fn show_config(config: &Config, cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Text => {
            println!("ghcard Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!("API:");
            println!("  Base URL:    {}", config.api.base_url);
            println!("  User agent:  {}", config.api.user_agent);
            println!("  Page size:   {}", config.page_size());
            println!("  Timeout:     {}s", config.api.timeout_secs);
            println!();
            println!("Export:");
            println!(
                "  Converter:   {}",
                config.export.converter.as_deref().unwrap_or("auto-detect")
            );
            println!("  Output dir:  {}", config.export.output_dir.display());
            println!("  Paper:       {}", config.export.paper);
            println!("  Timeout:     {}s", config.export.timeout_secs);
            println!("  Keep HTML:   {}", config.export.keep_html);
            println!();
            println!(
                "Default color: {}",
                config
                    .general
                    .default_color
                    .map_or("ask", |c| c.name())
            );
            println!("Verbose: {}", config.general.verbose);
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(config)?);
        }
    }

    Ok(())
}

fn show_paths(path: &Path, cli: &Cli) -> Result<()> {
    let config_dir = Config::default_dir();

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:  {}", config_dir.display());
            println!("Config file: {}", path.display());
            println!("Exists:      {}", path.exists());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "configDir": config_dir.display().to_string(),
                "configFile": path.display().to_string(),
                "exists": path.exists(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Configuration already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    Config::default().save_to(path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

fn reset_config(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_file(path)?;
        info!(path = %path.display(), "Configuration reset");
        println!("Configuration reset to defaults");
    } else {
        println!("No configuration file to reset");
    }

    Ok(())
}
