//! Generate command - fetch a profile and write the PDF card.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::{Args, ValueEnum};
use ghcard_export::{CommandExporter, PaperSize, RenderOptions};
use tracing::info;

use super::{build_client, resolve_color, resolve_login, FetchArgs};
use crate::config::Config;
use crate::output::{JsonFormatter, TextFormatter};
use crate::pipeline::{Pipeline, PipelineConfig};
use crate::{Cli, OutputFormat};

/// Arguments for the generate command.
#[derive(Args, Debug, Default, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub fetch: FetchArgs,

    /// Card color (green, blue, pink, red); prompted for when omitted.
    #[arg(long, short)]
    pub color: Option<String>,

    /// HTML to PDF converter program, or "builtin" (default: first found on PATH, else builtin).
    #[arg(long)]
    pub converter: Option<String>,

    /// Directory the PDF is written to.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Output file name without extension (default: the profile name).
    #[arg(long, short)]
    pub output: Option<String>,

    /// Page size.
    #[arg(long, value_enum)]
    pub paper: Option<PaperArg>,

    /// Converter timeout in seconds.
    #[arg(long)]
    pub export_timeout: Option<u64>,

    /// Also write the rendered HTML next to the PDF.
    #[arg(long)]
    pub keep_html: bool,
}

/// `--paper` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PaperArg {
    /// US Letter.
    Letter,
    /// ISO A4.
    A4,
}

impl From<PaperArg> for PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::Letter => Self::Letter,
            PaperArg::A4 => Self::A4,
        }
    }
}

impl GenerateArgs {
    /// Writes the flags that were given over `config`.
    pub fn apply(&self, config: &mut Config) {
        self.fetch.apply(config);
        if let Some(converter) = &self.converter {
            config.export.converter = Some(converter.clone());
        }
        if let Some(dir) = &self.output_dir {
            config.export.output_dir.clone_from(dir);
        }
        if let Some(paper) = self.paper {
            config.export.paper = paper.into();
        }
        if let Some(timeout) = self.export_timeout {
            config.export.timeout_secs = timeout;
        }
        if self.keep_html {
            config.export.keep_html = true;
        }
    }

    /// Pipeline settings for this invocation.
    pub fn pipeline_config(&self, config: &Config, verbose: bool) -> PipelineConfig {
        PipelineConfig {
            verbose: verbose || config.general.verbose,
            page_size: config.page_size(),
            star_source: self.fetch.star_source(),
            output_base: self.output.clone(),
            render: RenderOptions {
                paper: config.export.paper,
                generated_on: Some(Local::now().date_naive()),
            },
        }
    }
}

/// Runs the generate command.
pub async fn run(args: &GenerateArgs, cli: &Cli, mut config: Config) -> Result<()> {
    args.apply(&mut config);

    let login = resolve_login(args.fetch.user.as_deref()).await?;
    let color = resolve_color(args.color.as_deref(), config.general.default_color).await?;

    info!(login = %login, color = %color, "Generating card");

    let client = build_client(&config)?;
    let exporter = CommandExporter::new(config.export_settings());
    let pipeline = Pipeline::new(&client, args.pipeline_config(&config, cli.verbose));

    let report = pipeline.run(&login, color, &exporter).await?;

    match cli.format {
        OutputFormat::Text => {
            if !cli.quiet {
                let formatter = TextFormatter::new(!cli.no_color);
                println!("{}", formatter.format_report(&report));
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_report(&report)?);
        }
    }

    Ok(())
}
