//! Page-by-page text extraction.

use lopdf::Document;

/// Extract text from every page of `bytes`, in page order.
///
/// Pages are 1-based and returned in increasing order. A page whose text
/// fails to extract contributes an empty string rather than aborting the
/// whole document - a single damaged page should not hide the rest of the
/// paper. A document that cannot be opened at all yields an empty vec.
#[tracing::instrument(skip_all, target = "factcheck_pdf::reader")]
pub fn extract_pages(bytes: &[u8]) -> Vec<(u32, String)> {
    let document = match Document::load_mem(bytes) {
        Ok(document) => document,
        Err(error) => {
            tracing::warn!(target: "factcheck_pdf::reader", %error, "failed to open pdf, returning no pages");
            return Vec::new();
        }
    };

    document
        .get_pages()
        .keys()
        .copied()
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .map(|page_num| {
            let text = document.extract_text(&[page_num]).unwrap_or_default();
            (page_num, text)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_input_yields_no_pages() {
        let pages = extract_pages(b"not a pdf");
        assert!(pages.is_empty());
    }
}
