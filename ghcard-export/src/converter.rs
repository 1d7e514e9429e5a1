//! External HTML to PDF converters.
//!
//! The card is laid out in HTML and handed to whichever converter is
//! available. A converter named in the config wins; otherwise the
//! candidates below are looked up on `PATH` in order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

use crate::error::ExportError;
use crate::process::ProcessRunner;

// ============================================================================
// Paper Size
// ============================================================================

/// Page size of the generated PDF.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    /// US Letter.
    #[default]
    Letter,
    /// ISO A4.
    A4,
}

impl PaperSize {
    /// Name used by converters and CSS `@page { size }`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Letter => "Letter",
            Self::A4 => "A4",
        }
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Converter
// ============================================================================

/// How a converter program is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConverterKind {
    /// `wkhtmltopdf`.
    Wkhtmltopdf,
    /// `weasyprint`.
    WeasyPrint,
    /// Headless Chromium or Chrome.
    Chromium,
    /// Any other program, called as `program <input.html> <output.pdf>`.
    Generic,
}

/// Programs probed on `PATH`, in order.
pub const CANDIDATES: &[(&str, ConverterKind)] = &[
    ("wkhtmltopdf", ConverterKind::Wkhtmltopdf),
    ("weasyprint", ConverterKind::WeasyPrint),
    ("chromium", ConverterKind::Chromium),
    ("chromium-browser", ConverterKind::Chromium),
    ("google-chrome", ConverterKind::Chromium),
    ("google-chrome-stable", ConverterKind::Chromium),
];

/// A resolved converter program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converter {
    kind: ConverterKind,
    program: PathBuf,
}

impl Converter {
    /// Creates a converter from an already resolved program path.
    pub fn new(kind: ConverterKind, program: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            program: program.into(),
        }
    }

    /// Resolves a configured program name or path.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::ConverterNotFound`] if it is not executable.
    pub fn from_program(program: &str, runner: &ProcessRunner) -> Result<Self, ExportError> {
        let path = runner
            .which(program)
            .ok_or_else(|| ExportError::ConverterNotFound(program.to_string()))?;
        Ok(Self::new(kind_for(&path), path))
    }

    /// Finds the first candidate available on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NoConverter`] if none is installed.
    pub fn detect(runner: &ProcessRunner) -> Result<Self, ExportError> {
        for (name, kind) in CANDIDATES {
            if let Some(path) = runner.which(name) {
                debug!(converter = %name, path = %path.display(), "Converter detected");
                return Ok(Self::new(*kind, path));
            }
        }

        let tried: Vec<&str> = CANDIDATES.iter().map(|(name, _)| *name).collect();
        Err(ExportError::NoConverter(tried.join(", ")))
    }

    /// Returns how the program is invoked.
    pub fn kind(&self) -> ConverterKind {
        self.kind
    }

    /// Returns the program path.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Builds the argument list converting `html` into `pdf`.
    pub fn args(&self, html: &Path, pdf: &Path, paper: PaperSize) -> Vec<String> {
        let html_arg = html.display().to_string();
        let pdf_arg = pdf.display().to_string();

        match self.kind {
            ConverterKind::Wkhtmltopdf => vec![
                "--quiet".to_string(),
                "--enable-local-file-access".to_string(),
                "--page-size".to_string(),
                paper.name().to_string(),
                html_arg,
                pdf_arg,
            ],
            ConverterKind::WeasyPrint => vec![html_arg, pdf_arg],
            ConverterKind::Chromium => {
                let page = Url::from_file_path(html)
                    .map_or_else(|()| format!("file://{html_arg}"), |url| url.to_string());
                vec![
                    "--headless".to_string(),
                    "--disable-gpu".to_string(),
                    "--no-pdf-header-footer".to_string(),
                    format!("--print-to-pdf={pdf_arg}"),
                    page,
                ]
            }
            ConverterKind::Generic => vec![html_arg, pdf_arg],
        }
    }
}

/// Infers the invocation style from the program's file name.
fn kind_for(path: &Path) -> ConverterKind {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if stem.contains("wkhtmltopdf") {
        ConverterKind::Wkhtmltopdf
    } else if stem.contains("weasyprint") {
        ConverterKind::WeasyPrint
    } else if stem.contains("chrom") {
        ConverterKind::Chromium
    } else {
        ConverterKind::Generic
    }
}
