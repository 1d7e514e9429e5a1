//! Text output formatting with colors.

use ghcard_core::{ColorChoice, NormalizedProfile};

use crate::pipeline::RunReport;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats a normalized profile as a small text card.
    pub fn format_profile(&self, profile: &NormalizedProfile) -> String {
        let mut lines = Vec::new();

        if profile.login() == profile.name() {
            lines.push(self.bold(profile.name()));
        } else {
            lines.push(format!(
                "{} {}",
                self.bold(profile.name()),
                self.dim(&format!("@{}", profile.login()))
            ));
        }
        if !profile.bio().is_empty() {
            lines.push(profile.bio().to_string());
        }
        lines.push(String::new());

        lines.push(format!("Location:   {}", profile.location()));
        if profile.has_location() {
            lines.push(format!("Map:        {}", self.cyan(profile.map_link())));
        }
        lines.push(format!("GitHub:     {}", self.cyan(profile.profile_url())));
        if profile.has_blog() {
            lines.push(format!("Blog:       {}", self.cyan(profile.blog_url())));
        }
        lines.push(String::new());

        lines.push(format!("Repos:      {}", profile.public_repo_count()));
        lines.push(format!("Followers:  {}", profile.follower_count()));
        lines.push(format!("Following:  {}", profile.following_count()));
        lines.push(format!("Stars:      {}", self.bold(&profile.star_total().to_string())));
        lines.push(format!("Color:      {}", profile.color_choice()));

        if let Some(since) = profile.member_since() {
            lines.push(format!("Member since {}", since.format("%B %Y")));
        }

        lines.join("\n")
    }

    /// Formats the outcome of a generate run.
    pub fn format_report(&self, report: &RunReport) -> String {
        let mut lines = vec![format!(
            "{} PDF written to {}",
            self.green("✓"),
            self.bold(&report.export.pdf_path.display().to_string())
        )];

        if let Some(html) = &report.export.html_path {
            lines.push(format!("  HTML kept at {}", html.display()));
        }

        lines.push(self.dim(&format!(
            "  {} ({}), {} stars, converted by {} in {} ms",
            report.profile.name(),
            report.profile.color_choice(),
            report.profile.star_total(),
            report.export.converter,
            report.export.duration.as_millis()
        )));

        lines.join("\n")
    }

    /// Formats the palette as a table.
    pub fn format_themes(&self, colors: &[ColorChoice]) -> String {
        let mut lines = vec![self.bold(&format!(
            "{:<8} {:<10} {:<10} {:<8} {:<8}",
            "Color", "Wrapper", "Header", "Text", "Border"
        ))];

        for color in colors {
            let theme = color.theme();
            lines.push(format!(
                "{:<8} {:<10} {:<10} {:<8} {:<8} {}",
                color.name(),
                theme.wrapper_background,
                theme.header_background,
                theme.header_color,
                theme.photo_border_color,
                self.swatch(theme.header_background)
            ));
        }

        lines.join("\n")
    }

    /// Formats an error message.
    pub fn format_error(&self, error: &str) -> String {
        format!("{}: {}", self.red("Error"), error)
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    /// A block in the given CSS color, or nothing without colors.
    fn swatch(&self, css_color: &str) -> String {
        match (self.use_colors, css_rgb(css_color)) {
            (true, Some((r, g, b))) => format!("\x1b[48;2;{r};{g};{b}m    {RESET}"),
            _ => String::new(),
        }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}

/// Parses `#RRGGBB`, `black` or `white`.
fn css_rgb(color: &str) -> Option<(u8, u8, u8)> {
    match color {
        "black" => return Some((0, 0, 0)),
        "white" => return Some((255, 255, 255)),
        _ => {}
    }

    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_rgb() {
        assert_eq!(css_rgb("#C1C72C"), Some((0xC1, 0xC7, 0x2C)));
        assert_eq!(css_rgb("#26175a"), Some((0x26, 0x17, 0x5A)));
        assert_eq!(css_rgb("white"), Some((255, 255, 255)));
        assert_eq!(css_rgb("#FFF"), None);
        assert_eq!(css_rgb("teal"), None);
        assert_eq!(css_rgb("#GGGGGG"), None);
    }

    #[test]
    fn test_swatch_needs_colors() {
        assert_eq!(TextFormatter::new(false).swatch("#870603"), "");
        let swatch = TextFormatter::new(true).swatch("#870603");
        assert!(swatch.starts_with("\x1b[48;2;135;6;3m"));
        assert!(swatch.ends_with(RESET));
    }

    #[test]
    fn test_format_error() {
        assert_eq!(TextFormatter::new(false).format_error("boom"), "Error: boom");
        assert!(TextFormatter::new(true).format_error("boom").contains(RED));
    }
}
