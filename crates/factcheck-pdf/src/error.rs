//! Errors surfaced while opening a PDF document.
//!
//! Per-page extraction failures are never surfaced as errors - see
//! [`crate::reader::extract_pages`].

#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    #[error("failed to open PDF document: {0}")]
    Open(#[from] lopdf::Error),
}

pub type PdfResult<T, E = PdfError> = std::result::Result<T, E>;
