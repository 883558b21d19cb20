//! NDJSON response parsing for per-page extraction calls.

use factcheck_core::verification::{Claim, ClaimStatus};
use factcheck_core::util::{clip_at_word_boundary, default_claim_id};
use serde::Deserialize;

const MAX_CLAIMS_PER_PAGE: usize = 8;
const MAX_CLAIM_CHARS: usize = 280;

#[derive(Deserialize)]
struct RawClaim {
    #[serde(default)]
    id: Option<String>,
    text: String,
    #[serde(default)]
    status: Option<String>,
}

fn parse_status(raw: Option<&str>) -> ClaimStatus {
    match raw {
        Some("cited") => ClaimStatus::Cited,
        Some("weakly_cited") => ClaimStatus::WeaklyCited,
        _ => ClaimStatus::Uncited,
    }
}

/// Parse a raw NDJSON response body into at most [`MAX_CLAIMS_PER_PAGE`]
/// claims. Lines that fail to parse as a claim object are skipped, never
/// abort the whole page.
pub fn parse_claims_ndjson(page: u32, body: &str) -> Vec<Claim> {
    body.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| serde_json::from_str::<RawClaim>(line.trim()).ok())
        .take(MAX_CLAIMS_PER_PAGE)
        .enumerate()
        .map(|(index, raw)| Claim {
            id: raw
                .id
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| default_claim_id(page, index + 1)),
            text: clip_at_word_boundary(&raw.text, MAX_CLAIM_CHARS),
            status: parse_status(raw.status.as_deref()),
            verdict: None,
            confidence: None,
            reasoning_md: None,
            suggestions: None,
            source_uploaded: false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ndjson_lines_into_claims() {
        let body = "{\"text\":\"Claim one.\",\"status\":\"cited\"}\n{\"text\":\"Claim two.\"}\n";
        let claims = parse_claims_ndjson(3, body);
        assert_eq!(claims.len(), 2);
        assert_eq!(claims[0].status, ClaimStatus::Cited);
        assert_eq!(claims[1].status, ClaimStatus::Uncited);
        assert_eq!(claims[0].id, "p3_1");
        assert_eq!(claims[1].id, "p3_2");
        assert!(!claims[0].source_uploaded);
    }

    #[test]
    fn caps_at_eight_claims_per_page() {
        let body = (0..20)
            .map(|i| format!("{{\"text\":\"Claim {i}.\"}}"))
            .collect::<Vec<_>>()
            .join("\n");
        let claims = parse_claims_ndjson(1, &body);
        assert_eq!(claims.len(), MAX_CLAIMS_PER_PAGE);
    }

    #[test]
    fn skips_malformed_lines() {
        let body = "not json\n{\"text\":\"Good claim.\"}\n";
        let claims = parse_claims_ndjson(1, body);
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].text, "Good claim.");
    }

    #[test]
    fn empty_body_yields_no_claims() {
        assert!(parse_claims_ndjson(1, "").is_empty());
    }
}
