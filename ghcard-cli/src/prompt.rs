//! Interactive prompts for the username and card color.

use ghcard_core::ColorChoice;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Error while prompting.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Input ended before an answer was given.
    #[error("Input closed before an answer was given")]
    Closed,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Asks questions on `output` and reads answers from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Creates a prompter over the given streams.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Asks for a GitHub username. The answer is returned trimmed and unvalidated.
    ///
    /// # Errors
    ///
    /// Fails if input is closed or unreadable.
    pub fn ask_login(&mut self) -> Result<String, PromptError> {
        write!(self.output, "GitHub username: ")?;
        self.output.flush()?;
        self.read_answer()
    }

    /// Shows the numbered palette and asks until a valid color is picked.
    ///
    /// # Errors
    ///
    /// Fails if input is closed or unreadable.
    pub fn ask_color(&mut self) -> Result<ColorChoice, PromptError> {
        let colors = ColorChoice::all();

        writeln!(self.output, "Pick a color for the card:")?;
        for (i, color) in colors.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, color)?;
        }

        loop {
            write!(self.output, "Color [1-{}]: ", colors.len())?;
            self.output.flush()?;

            let answer = self.read_answer()?;
            if let Some(color) = parse_color_answer(&answer) {
                return Ok(color);
            }
            writeln!(self.output, "'{answer}' is not one of the colors above.")?;
        }
    }

    fn read_answer(&mut self) -> Result<String, PromptError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }
        Ok(line.trim().to_string())
    }
}

/// Accepts a 1-based palette number or a color name.
pub fn parse_color_answer(answer: &str) -> Option<ColorChoice> {
    let answer = answer.trim();
    if let Ok(n) = answer.parse::<usize>() {
        return ColorChoice::all().get(n.checked_sub(1)?).copied();
    }
    answer.parse().ok()
}
