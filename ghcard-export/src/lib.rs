// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # ghcard Export
//!
//! Turns a [`ghcard_core::NormalizedProfile`] into a PDF profile card.
//!
//! - [`html`] - Renders the card as a self-contained HTML document
//! - [`converter`] - External HTML to PDF converters (wkhtmltopdf, WeasyPrint, Chromium)
//! - [`builtin`] - In-process rendering with `printpdf` when no converter is installed
//! - [`process`] - Subprocess execution with timeouts
//! - [`exporter`] - The [`Exporter`] seam and the converter-backed [`CommandExporter`]
//!
//! The intermediate HTML file handed to the converter lives in a temporary
//! file that is removed when the export finishes, on success or failure.

pub mod builtin;
pub mod converter;
pub mod error;
pub mod exporter;
pub mod html;
pub mod process;

pub use builtin::{html_to_pdf, BUILTIN_ENGINE};
pub use converter::{Converter, ConverterKind, PaperSize};
pub use error::{ExportError, ProcessError};
pub use exporter::{
    output_base_name, CommandExporter, ExportReport, ExportSettings, Exporter, PdfEngine,
    DEFAULT_EXPORT_TIMEOUT_SECS,
};
pub use html::{render_html, RenderOptions};
pub use process::{ProcessOutput, ProcessRunner};
