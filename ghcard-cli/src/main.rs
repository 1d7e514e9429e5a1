// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! ghcard - turn a GitHub profile into a printable PDF card.
//!
//! # Examples
//!
//! ```bash
//! # Prompt for the username and color
//! ghcard
//!
//! # Non-interactive
//! ghcard generate --user octocat --color blue
//!
//! # Count stars the user gave instead of received
//! ghcard generate --user octocat --color red --stars given
//!
//! # Just print the normalized profile
//! ghcard show --user octocat --format json --pretty
//!
//! # List colors
//! ghcard themes
//! ```

mod commands;
mod config;
mod output;
mod pipeline;
mod prompt;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{config as config_command, generate, show, themes};
use config::{Config, ConfigError};
use output::{JsonFormatter, TextFormatter};
use pipeline::PipelineError;

// ============================================================================
// CLI Definition
// ============================================================================

/// ghcard - GitHub profile cards.
#[derive(Parser)]
#[command(name = "ghcard")]
#[command(about = "Generate a PDF profile card for a GitHub user")]
#[command(long_about = r"
ghcard looks up a GitHub user, totals their stars across every repository
page and writes a one-page PDF card in the color of your choice.

Colors: green, blue, pink, red

Examples:
  ghcard                                   # Prompt for username and color
  ghcard generate -u octocat -c blue       # Non-interactive
  ghcard show -u octocat --format json     # Print the profile, no PDF
  ghcard themes                            # List colors
")]
#[command(version)]
#[command(author = "ghcard contributors")]
pub struct Cli {
    /// Subcommand to run. If none, runs 'generate' with prompts.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Configuration file to use instead of the default.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Returns the configuration file path in effect.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Generate the PDF card (default if no command specified).
    #[command(visible_alias = "g")]
    Generate(generate::GenerateArgs),

    /// Fetch and print the profile without writing a PDF.
    #[command(visible_alias = "s")]
    Show(show::ShowArgs),

    /// List the card colors.
    #[command(visible_alias = "t")]
    Themes,

    /// Manage configuration.
    Config(config_command::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// The GitHub user does not exist.
    UserNotFound = 2,
    /// GitHub answered with another error status.
    ApiError = 3,
    /// GitHub could not be reached.
    TransportError = 4,
    /// GitHub sent an unexpected body.
    ParseError = 5,
    /// Rendering or PDF conversion failed.
    ExportError = 6,
    /// Bad username, color or option value.
    InvalidInput = 64,
    /// Interrupted with Ctrl-C.
    Interrupted = 130,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("ghcard=debug,info")
        } else {
            EnvFilter::new("ghcard=warn")
        }
    });

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

    let config_path = cli.config_path();
    let config = Config::load_from(&config_path);
    let verbose = cli.verbose || config.as_ref().is_ok_and(|c| c.general.verbose);

    setup_logging(verbose, cli.quiet);

    // Dropping the command future on Ctrl-C removes any temp files it owns
    // and kills a running converter.
    let code = tokio::select! {
        result = dispatch(&cli, config, &config_path) => match result {
            Ok(()) => ExitCode::Success,
            Err(e) => report_error(&cli, &e),
        },
        Ok(()) = tokio::signal::ctrl_c() => {
            if !cli.quiet {
                eprintln!("Interrupted");
            }
            ExitCode::Interrupted
        }
    };

    std::process::exit(code as i32);
}

async fn dispatch(cli: &Cli, config: Result<Config, ConfigError>, config_path: &Path) -> Result<()> {
    match &cli.command {
        Some(Commands::Generate(args)) => generate::run(args, cli, config?).await,
        Some(Commands::Show(args)) => show::run(args, cli, config?).await,
        Some(Commands::Themes) => themes::run(cli),
        Some(Commands::Config(args)) => config_command::run(args, cli, config, config_path),
        None => {
            // Default to generate, prompting for everything
            generate::run(&generate::GenerateArgs::default(), cli, config?).await
        }
    }
}

/// Prints `err` once and picks the exit code.
fn report_error(cli: &Cli, err: &anyhow::Error) -> ExitCode {
    let pipeline_error = err.downcast_ref::<PipelineError>();
    let code = pipeline_error.map_or(ExitCode::Error, PipelineError::exit_code);
    let message = format!("{err:#}");

    match cli.format {
        OutputFormat::Json => {
            let kind = pipeline_error.map_or("error", PipelineError::kind);
            match JsonFormatter::new(cli.pretty).format_error(&message, kind, code) {
                Ok(json) => println!("{json}"),
                Err(_) => eprintln!("Error: {message}"),
            }
        }
        OutputFormat::Text => {
            if !cli.quiet {
                eprintln!("{}", TextFormatter::new(!cli.no_color).format_error(&message));
            }
        }
    }

    code
}
