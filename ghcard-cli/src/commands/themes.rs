//! Themes command - list the card colors.

use anyhow::Result;
use ghcard_core::ColorChoice;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the themes command.
pub fn run(cli: &Cli) -> Result<()> {
    let colors = ColorChoice::all();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_themes(colors));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_themes(colors)?);
        }
    }

    Ok(())
}
