//! Greedy line chunking, used only by the verification pipeline.

use factcheck_core::pdf::PdfChunk;

/// Default maximum characters per chunk, matching the original greedy
/// splitter's default.
pub const MAX_CHUNK_CHARS: usize = 1400;

/// Split `text` into non-blank lines, then greedily pack consecutive lines
/// into chunks of at most `max_chars`, joined with `\n`. A single line
/// longer than `max_chars` becomes its own oversized chunk rather than
/// being split mid-sentence.
pub fn greedy_paragraph_split(text: &str, max_chars: usize) -> Vec<String> {
    let lines: Vec<&str> = text.split('\n').map(str::trim).filter(|p| !p.is_empty()).collect();

    let mut chunks = Vec::new();
    let mut buf: Vec<&str> = Vec::new();
    let mut size = 0usize;

    for line in lines {
        if !buf.is_empty() && size + line.len() + 1 > max_chars {
            chunks.push(buf.join("\n"));
            buf.clear();
            size = 0;
        }

        size += line.len() + 1;
        buf.push(line);
    }

    if !buf.is_empty() {
        chunks.push(buf.join("\n"));
    }

    chunks
}

/// Chunk every page of a parsed document for use as evidence candidates
/// during claim verification.
pub fn chunk_for_verification(pages: &[(u32, String)]) -> Vec<PdfChunk> {
    let mut chunks = Vec::new();
    for (page, text) in pages {
        for (paragraph, chunk_text) in greedy_paragraph_split(text, MAX_CHUNK_CHARS).into_iter().enumerate() {
            chunks.push(PdfChunk {
                page: *page,
                section: None,
                paragraph: paragraph as u32,
                text: chunk_text,
            });
        }
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_short_lines_into_one_chunk() {
        let text = "First line.\nSecond line.\nThird line.";
        let chunks = greedy_paragraph_split(text, 1400);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].contains("First"));
        assert!(chunks[0].contains("Third"));
    }

    #[test]
    fn splits_when_exceeding_max_chars() {
        let line = "x".repeat(800);
        let text = format!("{line}\n{line}\n{line}");
        let chunks = greedy_paragraph_split(&text, 1400);
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].len() <= 1400 + 1);
    }

    #[test]
    fn oversized_single_line_is_its_own_chunk() {
        let line = "y".repeat(5000);
        let chunks = greedy_paragraph_split(&line, 1400);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].len(), 5000);
    }

    #[test]
    fn chunk_for_verification_tracks_page_and_paragraph_index() {
        let pages = vec![(1u32, "Line A.\nLine B.".to_string())];
        let chunks = chunk_for_verification(&pages);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].page, 1);
        assert_eq!(chunks[0].paragraph, 0);
    }
}
