//! Claim and verification domain types.

use serde::{Deserialize, Serialize};

/// Whether a claim carried an inline citation in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    Cited,
    WeaklyCited,
    Uncited,
}

/// Outcome of checking a claim's evidence against the uploaded paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Supported,
    PartiallySupported,
    Unsupported,
    /// Reserved: never produced by the pipeline today, kept for forward
    /// compatibility with manually-skipped claims.
    Skipped,
}

/// A suggested citation offered alongside an uncited or weakly-cited claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

/// A single extracted claim, as emitted on the claim buffer and the
/// `/stream-claim` NDJSON body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    pub id: String,
    pub text: String,
    pub status: ClaimStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "reasoningMd")]
    pub reasoning_md: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<Suggestion>>,
    #[serde(rename = "sourceUploaded")]
    pub source_uploaded: bool,
}

impl Claim {
    /// Merge a verification result into a claim clone, as the buffer replay
    /// path does when a verdict has since been recorded. The buffered claim
    /// itself is never mutated - this only changes the emitted view.
    pub fn merged_with(&self, verification: &Verification) -> Self {
        Self {
            verdict: Some(verification.verdict),
            confidence: Some(verification.confidence),
            reasoning_md: Some(verification.reasoning_md.clone()),
            source_uploaded: true,
            ..self.clone()
        }
    }
}

/// One excerpt of supporting (or refuting) evidence from a cited source
/// PDF, handed back alongside a verification's verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evidence {
    #[serde(rename = "paperTitle")]
    pub paper_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraph: Option<u32>,
    /// Clipped to at most 100 words, word-boundary-safe.
    pub excerpt: String,
}

/// The result of running the verification pipeline on one claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verification {
    pub claim_id: String,
    pub verdict: Verdict,
    pub confidence: f32,
    pub reasoning_md: String,
    pub evidence: Vec<Evidence>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claim() -> Claim {
        Claim {
            id: "p1_0".into(),
            text: "Example claim text.".into(),
            status: ClaimStatus::Uncited,
            verdict: None,
            confidence: None,
            reasoning_md: None,
            suggestions: None,
            source_uploaded: false,
        }
    }

    #[test]
    fn merge_fills_in_verdict_fields_and_sets_source_uploaded() {
        let verification = Verification {
            claim_id: "p1_0".into(),
            verdict: Verdict::Supported,
            confidence: 0.92,
            reasoning_md: "Matches page 3.".into(),
            evidence: vec![Evidence {
                paper_title: "Source PDF".into(),
                page: Some(3),
                section: None,
                paragraph: Some(2),
                excerpt: "excerpt".into(),
            }],
        };
        let merged = claim().merged_with(&verification);
        assert_eq!(merged.verdict, Some(Verdict::Supported));
        assert_eq!(merged.confidence, Some(0.92));
        assert_eq!(merged.id, "p1_0");
        assert!(merged.source_uploaded);
        assert!(!claim().source_uploaded, "the buffered claim itself must stay unchanged");
    }

    #[test]
    fn claim_without_verdict_omits_verdict_fields_in_json() {
        let encoded = serde_json::to_string(&claim()).unwrap();
        assert!(!encoded.contains("verdict"));
        assert!(encoded.contains("\"sourceUploaded\":false"));
    }
}
