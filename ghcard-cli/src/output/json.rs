//! JSON output formatting.

use anyhow::Result;
use ghcard_core::{ColorChoice, NormalizedProfile, Theme};
use serde::Serialize;

use crate::pipeline::RunReport;
use crate::ExitCode;

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for a generate run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOutput<'a> {
    pub profile: &'a NormalizedProfile,
    pub pdf_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_path: Option<String>,
    pub converter: &'a str,
    pub duration_ms: u64,
    pub stages: Vec<&'static str>,
}

/// One palette entry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeOutput {
    pub name: &'static str,
    #[serde(flatten)]
    pub theme: Theme,
}

/// A failed command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput<'a> {
    pub error: &'a str,
    pub kind: &'a str,
    pub exit_code: i32,
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize + ?Sized>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats the outcome of a generate run.
    pub fn format_report(&self, report: &RunReport) -> Result<String> {
        let output = ReportOutput {
            profile: &report.profile,
            pdf_path: report.export.pdf_path.display().to_string(),
            html_path: report
                .export
                .html_path
                .as_ref()
                .map(|p| p.display().to_string()),
            converter: &report.export.converter,
            duration_ms: u64::try_from(report.export.duration.as_millis()).unwrap_or(u64::MAX),
            stages: report.stages.iter().map(|s| s.name()).collect(),
        };
        self.format(&output)
    }

    /// Formats the palette.
    pub fn format_themes(&self, colors: &[ColorChoice]) -> Result<String> {
        let themes: Vec<ThemeOutput> = colors
            .iter()
            .map(|c| ThemeOutput {
                name: c.name(),
                theme: c.theme(),
            })
            .collect();
        self.format(&themes)
    }

    /// Formats an error.
    pub fn format_error(&self, error: &str, kind: &str, code: ExitCode) -> Result<String> {
        self.format(&ErrorOutput {
            error,
            kind,
            exit_code: code as i32,
        })
    }
}
