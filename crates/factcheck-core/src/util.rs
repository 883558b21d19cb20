//! Small cross-cutting helpers shared by the extraction and verification
//! paths.

/// Default claim id used when the model omits one: `p{page}_{n}`, with `n`
/// counted 1-based within the page.
pub fn default_claim_id(page: u32, n: usize) -> String {
    format!("p{page}_{n}")
}

/// Clip `text` to at most `max_chars` characters, backing off to the
/// nearest preceding word boundary rather than splitting mid-word.
pub fn clip_at_word_boundary(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let clipped: String = text.chars().take(max_chars).collect();
    match clipped.rfind(char::is_whitespace) {
        Some(boundary) if boundary > 0 => clipped[..boundary].trim_end().to_string(),
        _ => clipped,
    }
}

/// Clip `text` to at most `max_words` whitespace-separated words.
pub fn clip_words(text: &str, max_words: usize) -> String {
    text.split_whitespace().take(max_words).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_claim_id_formats_page_and_index() {
        assert_eq!(default_claim_id(3, 1), "p3_1");
        assert_eq!(default_claim_id(12, 7), "p12_7");
    }

    #[test]
    fn clip_words_caps_at_max_words() {
        let text = "one two three four five";
        assert_eq!(clip_words(text, 3), "one two three");
        assert_eq!(clip_words(text, 100), text);
    }

    #[test]
    fn clip_leaves_short_text_untouched() {
        assert_eq!(clip_at_word_boundary("short text", 280), "short text");
    }

    #[test]
    fn clip_backs_off_to_word_boundary() {
        let text = "word ".repeat(100);
        let clipped = clip_at_word_boundary(&text, 20);
        assert!(clipped.chars().count() <= 20);
        assert!(!clipped.ends_with(' '));
        assert!(text.starts_with(&clipped));
    }
}
