//! PDF chunking types shared between the reader and the verification
//! pipeline.

use serde::{Deserialize, Serialize};

/// One paragraph-sized slice of a page, used as an evidence candidate
/// during claim verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfChunk {
    /// 1-based page number the chunk was taken from.
    pub page: u32,
    /// Section heading, when the reader was able to infer one.
    pub section: Option<String>,
    /// Index of the paragraph within the page, 0-based.
    pub paragraph: u32,
    pub text: String,
}
