//! The verification pipeline: chunk the paper, retrieve the most similar
//! chunks to a claim by cosine similarity, then ask the model to
//! adjudicate against that evidence.

use factcheck_core::util::clip_words;
use factcheck_core::verification::{Evidence, Verdict};
use factcheck_pdf::chunk_for_verification;
use serde::Deserialize;

use crate::client::AnthropicClient;
use crate::embed::{EmbeddingClient, EmbeddingIndex};
use crate::error::{LlmError, LlmResult};

/// How many evidence chunks are handed to the adjudication call.
const TOP_K: usize = 4;

/// Evidence excerpts are clipped to this many words.
const MAX_EXCERPT_WORDS: usize = 100;

const ADJUDICATION_SYSTEM_PROMPT: &str = "\
You are a fact-checking assistant. You will be given a claim from a paper \
and several excerpts from that same paper. Decide whether the excerpts \
support the claim. Respond with a single JSON object (no prose, no \
surrounding text) with fields `verdict` (one of \"supported\", \
\"partially_supported\", \"unsupported\"), `confidence` (a number between \
0 and 1), and `reasoning_md` (a short markdown explanation citing which \
excerpt, if any, supports the claim).";

#[derive(Deserialize)]
struct AdjudicationResponse {
    verdict: String,
    confidence: f32,
    reasoning_md: String,
}

fn parse_verdict(raw: &str) -> Verdict {
    match raw {
        "supported" => Verdict::Supported,
        "partially_supported" => Verdict::PartiallySupported,
        _ => Verdict::Unsupported,
    }
}

/// Outcome of adjudicating one claim against retrieved evidence.
pub struct VerificationOutcome {
    pub verdict: Verdict,
    pub confidence: f32,
    pub reasoning_md: String,
    pub evidence: Vec<Evidence>,
}

/// Bundles the two clients the verification pipeline needs.
#[derive(Clone)]
pub struct VerificationPipeline {
    embedding: EmbeddingClient,
    anthropic: AnthropicClient,
}

impl VerificationPipeline {
    pub fn new(embedding: EmbeddingClient, anthropic: AnthropicClient) -> Self {
        Self { embedding, anthropic }
    }

    #[tracing::instrument(skip_all, target = "factcheck_llm::verify", fields(claim_len = claim_text.len()))]
    pub async fn verify_claim(
        &self,
        api_key: &str,
        claim_text: &str,
        paper_title: &str,
        pages: &[(u32, String)],
    ) -> LlmResult<VerificationOutcome> {
        let chunks = chunk_for_verification(pages);
        if chunks.is_empty() {
            return Ok(VerificationOutcome {
                verdict: Verdict::Unsupported,
                confidence: 0.0,
                reasoning_md: "No extractable text was available to check this claim against.".to_string(),
                evidence: Vec::new(),
            });
        }

        let chunk_texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let chunk_embeddings = self.embedding.embed_batch(&chunk_texts).await?;
        let index = EmbeddingIndex::build(chunk_embeddings);

        let claim_embedding = self.embedding.embed_one(claim_text).await?;
        let top = index.top_k(&claim_embedding, TOP_K);

        let evidence: Vec<Evidence> = top
            .iter()
            .map(|&i| {
                let chunk = &chunks[i];
                Evidence {
                    paper_title: paper_title.to_string(),
                    page: Some(chunk.page),
                    section: chunk.section.clone(),
                    paragraph: Some(chunk.paragraph),
                    excerpt: clip_words(&chunk.text, MAX_EXCERPT_WORDS),
                }
            })
            .collect();

        let excerpts_joined = evidence.iter().map(|e| e.excerpt.as_str()).collect::<Vec<_>>().join("\n---\n");
        let user_prompt = format!("Claim:\n{claim_text}\n\nExcerpts from the paper:\n{excerpts_joined}");

        let raw = self
            .anthropic
            .adjudicate(api_key, ADJUDICATION_SYSTEM_PROMPT, &user_prompt)
            .await?;
        let parsed: AdjudicationResponse = serde_json::from_str(raw.trim()).map_err(LlmError::Parse)?;

        Ok(VerificationOutcome {
            verdict: parse_verdict(&parsed.verdict),
            confidence: parsed.confidence.clamp(0.0, 1.0),
            reasoning_md: parsed.reasoning_md,
            evidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_verdict_string_defaults_to_unsupported() {
        assert_eq!(parse_verdict("maybe"), Verdict::Unsupported);
        assert_eq!(parse_verdict("supported"), Verdict::Supported);
        assert_eq!(parse_verdict("partially_supported"), Verdict::PartiallySupported);
    }
}
