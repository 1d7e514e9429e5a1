//! Show command - fetch and print a profile without exporting.

use anyhow::Result;
use clap::Args;
use ghcard_core::ColorChoice;
use tracing::info;

use super::{build_client, parse_color, resolve_login, FetchArgs};
use crate::config::Config;
use crate::output::{JsonFormatter, TextFormatter};
use crate::pipeline::{Pipeline, PipelineConfig};
use crate::{Cli, OutputFormat};

/// Arguments for the show command.
#[derive(Args, Debug, Default, Clone)]
pub struct ShowArgs {
    #[command(flatten)]
    pub fetch: FetchArgs,

    /// Color recorded on the profile (default: configured color, else green).
    #[arg(long, short)]
    pub color: Option<String>,
}

/// Runs the show command.
pub async fn run(args: &ShowArgs, cli: &Cli, mut config: Config) -> Result<()> {
    args.fetch.apply(&mut config);

    let login = resolve_login(args.fetch.user.as_deref()).await?;
    let color = match args.color.as_deref() {
        Some(name) => parse_color(name)?,
        None => config.general.default_color.unwrap_or(ColorChoice::Green),
    };

    info!(login = %login, "Fetching profile");

    let client = build_client(&config)?;
    let pipeline = Pipeline::new(
        &client,
        PipelineConfig {
            verbose: cli.verbose || config.general.verbose,
            page_size: config.page_size(),
            star_source: args.fetch.star_source(),
            ..Default::default()
        },
    );

    let profile = pipeline.profile(&login, color).await?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_profile(&profile));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&profile)?);
        }
    }

    Ok(())
}
