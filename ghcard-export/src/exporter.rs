//! PDF export.
//!
//! [`CommandExporter`] writes the rendered HTML to a temporary file in the
//! output directory and converts it into a second temporary file, either
//! with an external converter or with the in-process engine. Results are
//! moved into place only after conversion succeeded: the optional HTML copy
//! first, then `<base>.pdf`. Temporaries are removed when they go out of
//! scope, so none survive a failed, cancelled or successful export.

use async_trait::async_trait;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::TempPath;
use tracing::{debug, info, instrument, warn};

use crate::builtin::{self, BUILTIN_ENGINE};
use crate::converter::{Converter, PaperSize};
use crate::error::ExportError;
use crate::process::ProcessRunner;

/// Default converter timeout in seconds.
pub const DEFAULT_EXPORT_TIMEOUT_SECS: u64 = 120;

/// Prefix of the temporary files created during export.
pub const TEMP_PREFIX: &str = ".ghcard-";

// ============================================================================
// Exporter Trait
// ============================================================================

/// Result of a successful export.
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// Where the PDF was written.
    pub pdf_path: PathBuf,
    /// Where the HTML copy was written, when requested.
    pub html_path: Option<PathBuf>,
    /// The converter program that ran, or `builtin`.
    pub converter: String,
    /// How long the conversion took.
    pub duration: Duration,
}

/// Converts a rendered card into a PDF file.
#[async_trait]
pub trait Exporter: Send + Sync {
    /// Writes `<output_base>.pdf` from `html`.
    async fn export(&self, html: &str, output_base: &str) -> Result<ExportReport, ExportError>;
}

// ============================================================================
// Export Settings
// ============================================================================

/// Settings for [`CommandExporter`].
#[derive(Debug, Clone)]
pub struct ExportSettings {
    /// Directory receiving the PDF.
    pub output_dir: PathBuf,
    /// Converter program name or path, or `builtin`. Detected on `PATH`
    /// when unset, falling back to the in-process engine.
    pub converter: Option<String>,
    /// Page size.
    pub paper: PaperSize,
    /// Conversion timeout.
    pub timeout: Duration,
    /// Also write `<base>.html` next to the PDF.
    pub keep_html: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            converter: None,
            paper: PaperSize::default(),
            timeout: Duration::from_secs(DEFAULT_EXPORT_TIMEOUT_SECS),
            keep_html: false,
        }
    }
}

// ============================================================================
// PDF Engine
// ============================================================================

/// What turns the HTML into a PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfEngine {
    /// An external converter program.
    External(Converter),
    /// `printpdf`, in process.
    Builtin,
}

impl PdfEngine {
    /// Name shown in reports.
    pub fn name(&self) -> String {
        match self {
            Self::External(converter) => converter.program().display().to_string(),
            Self::Builtin => BUILTIN_ENGINE.to_string(),
        }
    }
}

// ============================================================================
// Command Exporter
// ============================================================================

/// Exporter backed by an HTML to PDF converter.
#[derive(Debug, Clone, Default)]
pub struct CommandExporter {
    settings: ExportSettings,
    runner: ProcessRunner,
}

impl CommandExporter {
    /// Creates an exporter with the given settings.
    pub fn new(settings: ExportSettings) -> Self {
        Self {
            settings,
            runner: ProcessRunner::new(),
        }
    }

    /// Returns the settings.
    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Resolves the configured engine. Without configuration the first
    /// converter on `PATH` is used, else the in-process engine.
    ///
    /// # Errors
    ///
    /// Fails when the configured converter is missing.
    pub fn resolve_engine(&self) -> Result<PdfEngine, ExportError> {
        match self.settings.converter.as_deref() {
            Some(BUILTIN_ENGINE) => Ok(PdfEngine::Builtin),
            Some(program) => Converter::from_program(program, &self.runner).map(PdfEngine::External),
            None => match Converter::detect(&self.runner) {
                Ok(converter) => Ok(PdfEngine::External(converter)),
                Err(err) => {
                    info!(reason = %err, "Using the built-in PDF engine");
                    Ok(PdfEngine::Builtin)
                }
            },
        }
    }

    /// Creates the output directory and returns its absolute path.
    async fn prepare_output_dir(&self) -> Result<PathBuf, ExportError> {
        tokio::fs::create_dir_all(&self.settings.output_dir).await?;
        Ok(tokio::fs::canonicalize(&self.settings.output_dir).await?)
    }

    /// Runs an external converter from `html` into `pdf`.
    async fn convert(&self, converter: &Converter, html: &Path, pdf: &Path) -> Result<(), ExportError> {
        let args = converter.args(html, pdf, self.settings.paper);
        let output = self
            .runner
            .run(converter.program(), args.as_slice(), self.settings.timeout)
            .await?;

        if !output.success() {
            warn!(exit_code = output.exit_code, "Converter failed");
            return Err(ExportError::ConverterFailed {
                program: converter.program().display().to_string(),
                code: output.exit_code,
                stderr: output.stderr.trim().to_string(),
            });
        }
        Ok(())
    }

    /// Renders `html` with the in-process engine into `pdf`.
    async fn render_builtin(&self, html: &str, pdf: &Path) -> Result<(), ExportError> {
        let html = html.to_string();
        let timeout = self.settings.timeout;
        let bytes = tokio::time::timeout(timeout, blocking(move || builtin::html_to_pdf(&html)))
            .await
            .map_err(|_| ExportError::Timeout(timeout))??;
        tokio::fs::write(pdf, bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl Exporter for CommandExporter {
    #[instrument(skip(self, html), fields(html_len = html.len()))]
    async fn export(&self, html: &str, output_base: &str) -> Result<ExportReport, ExportError> {
        let engine = self.resolve_engine()?;
        let dir = self.prepare_output_dir().await?;

        let html_file = write_temp(&dir, ".html", html.as_bytes().to_vec()).await?;
        let pdf_file = write_temp(&dir, ".pdf", Vec::new()).await?;
        debug!(
            html = %html_file.display(),
            pdf = %pdf_file.display(),
            engine = %engine.name(),
            "Intermediate files created"
        );

        let start = Instant::now();
        match &engine {
            PdfEngine::External(converter) => self.convert(converter, &html_file, &pdf_file).await?,
            PdfEngine::Builtin => self.render_builtin(html, &pdf_file).await?,
        }

        if tokio::fs::metadata(&pdf_file).await?.len() == 0 {
            return Err(ExportError::EmptyOutput(pdf_file.to_path_buf()));
        }

        // The PDF is moved into place last; any failure before it leaves
        // no new PDF behind.
        let html_path = if self.settings.keep_html {
            let path = dir.join(format!("{output_base}.html"));
            persist(html_file, path.clone()).await?;
            Some(path)
        } else {
            drop(html_file);
            None
        };

        let pdf_path = dir.join(format!("{output_base}.pdf"));
        if let Err(err) = persist(pdf_file, pdf_path.clone()).await {
            if let Some(path) = &html_path {
                let _ = tokio::fs::remove_file(path).await;
            }
            return Err(err);
        }

        let duration = start.elapsed();
        info!(pdf = %pdf_path.display(), duration = ?duration, "PDF written");

        Ok(ExportReport {
            pdf_path,
            html_path,
            converter: engine.name(),
            duration,
        })
    }
}

// ============================================================================
// File Helpers
// ============================================================================

/// Runs blocking filesystem or rendering work off the async runtime.
async fn blocking<T, F>(task: F) -> Result<T, ExportError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ExportError> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| ExportError::Io(std::io::Error::other(e)))?
}

/// Writes `contents` to a new temporary file in `dir`, deleted on drop.
async fn write_temp(dir: &Path, suffix: &'static str, contents: Vec<u8>) -> Result<TempPath, ExportError> {
    let dir = dir.to_path_buf();
    blocking(move || {
        let mut file = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(suffix)
            .tempfile_in(&dir)?;
        file.write_all(&contents)?;
        file.flush()?;
        Ok(file.into_temp_path())
    })
    .await
}

/// Moves a temporary file to `target`. On failure the temporary is removed.
async fn persist(file: TempPath, target: PathBuf) -> Result<(), ExportError> {
    blocking(move || Ok(file.persist(&target)?)).await
}

// ============================================================================
// Output Naming
// ============================================================================

/// Derives a file base name from a display name.
///
/// Whitespace becomes `_`, characters outside `[A-Za-z0-9._-]` become `_`,
/// leading dots are dropped. Falls back to `profile`.
pub fn output_base_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        "profile".to_string()
    } else {
        cleaned.to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
