//! In-process HTML to PDF rendering with `printpdf`.
//!
//! Used when no external converter is configured or installed. The layout
//! engine supports a subset of CSS, so the card comes out plainer than with
//! a browser-grade converter.

use std::collections::BTreeMap;

use printpdf::{GeneratePdfOptions, PdfDocument};
use tracing::debug;

use crate::error::ExportError;

/// Name reported for the in-process engine and accepted as `converter`.
pub const BUILTIN_ENGINE: &str = "builtin";

/// Renders `html` into PDF bytes. Blocks; call from a blocking task.
///
/// # Errors
///
/// Returns [`ExportError::Engine`] when the document cannot be laid out.
pub fn html_to_pdf(html: &str) -> Result<Vec<u8>, ExportError> {
    let mut warnings = Vec::new();
    let doc = PdfDocument::from_html(
        html,
        &BTreeMap::new(),
        &BTreeMap::new(),
        &GeneratePdfOptions::default(),
        &mut warnings,
    )
    .map_err(|e| ExportError::Engine(e.to_string()))?;

    let bytes = doc.save(&Default::default(), &mut warnings);
    debug!(bytes = bytes.len(), warnings = warnings.len(), "PDF rendered in process");
    Ok(bytes)
}
