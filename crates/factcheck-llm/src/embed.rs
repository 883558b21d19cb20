//! Embedding client and the in-memory, per-verify-call similarity index.
//!
//! Mirrors `sentence_transformers`-style usage: L2-normalize every vector
//! once at index build time so cosine similarity reduces to a dot product.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde_json::json;

use crate::client::LlmConfig;
use crate::error::{LlmError, LlmResult};

struct EmbeddingClientInner {
    http: Client,
    api_url: String,
    model: String,
}

/// Cloneable handle onto the embedding HTTP endpoint. Stateless beyond the
/// pooled `reqwest::Client` it wraps, so there is nothing to tear down on
/// shutdown.
#[derive(Clone)]
pub struct EmbeddingClient {
    inner: Arc<EmbeddingClientInner>,
}

impl EmbeddingClient {
    pub fn new(config: &LlmConfig) -> LlmResult<Self> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            inner: Arc::new(EmbeddingClientInner {
                http,
                api_url: config.embedding_api_url.clone(),
                model: config.embedding_model_name.clone(),
            }),
        })
    }

    /// Embed a batch of texts in one request, preserving input order.
    #[tracing::instrument(skip(self, texts), target = "factcheck_llm::embed", fields(count = texts.len()))]
    pub async fn embed_batch(&self, texts: &[String]) -> LlmResult<Vec<Vec<f32>>> {
        #[derive(serde::Deserialize)]
        struct EmbeddingsResponse {
            embeddings: Vec<Vec<f32>>,
        }

        let response = self
            .inner
            .http
            .post(&self.inner.api_url)
            .json(&json!({ "model": self.inner.model, "input": texts }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: EmbeddingsResponse = response.json().await.map_err(LlmError::Transport)?;
        Ok(parsed.embeddings)
    }

    pub async fn embed_one(&self, text: &str) -> LlmResult<Vec<f32>> {
        let mut batch = self.embed_batch(&[text.to_string()]).await?;
        Ok(batch.pop().unwrap_or_default())
    }
}

fn l2_normalize(vector: &mut [f32]) {
    let norm: f32 = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        for v in vector.iter_mut() {
            *v /= norm;
        }
    }
}

/// Row-major matrix of L2-normalized embedding vectors, scoped to a single
/// verify call - never persisted, never shared across requests.
pub struct EmbeddingIndex {
    dim: usize,
    rows: Vec<Vec<f32>>,
}

impl EmbeddingIndex {
    /// Build an index from raw (unnormalized) vectors.
    pub fn build(mut vectors: Vec<Vec<f32>>) -> Self {
        let dim = vectors.first().map(Vec::len).unwrap_or(0);
        for row in &mut vectors {
            l2_normalize(row);
        }
        Self { dim, rows: vectors }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Indices of the `k` rows most similar to `query`, descending by
    /// cosine similarity. `query` need not be pre-normalized.
    pub fn top_k(&self, query: &[f32], k: usize) -> Vec<usize> {
        if self.rows.is_empty() || k == 0 {
            return Vec::new();
        }
        assert_eq!(query.len(), self.dim, "query dimension must match index dimension");

        let mut normalized_query = query.to_vec();
        l2_normalize(&mut normalized_query);

        let mut scored: Vec<(usize, f32)> = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| (i, dot(row, &normalized_query)))
            .collect();

        let k = k.min(scored.len());
        // Partial selection mirrors `numpy.argpartition`: isolate the top-k
        // without fully sorting everything, then sort just that slice.
        scored.select_nth_unstable_by(k.saturating_sub(1), |a, b| b.1.total_cmp(&a.1));
        let mut top = scored[..k].to_vec();
        top.sort_by(|a, b| b.1.total_cmp(&a.1));
        top.into_iter().map(|(i, _)| i).collect()
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_k_ranks_by_cosine_similarity() {
        let index = EmbeddingIndex::build(vec![
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![0.9, 0.1],
        ]);
        let top = index.top_k(&[1.0, 0.0], 2);
        assert_eq!(top, vec![0, 2]);
    }

    #[test]
    fn top_k_clamps_to_index_size() {
        let index = EmbeddingIndex::build(vec![vec![1.0, 0.0]]);
        let top = index.top_k(&[1.0, 0.0], 5);
        assert_eq!(top.len(), 1);
    }

    #[test]
    fn empty_index_returns_no_matches() {
        let index = EmbeddingIndex::build(Vec::new());
        assert!(index.is_empty());
        assert!(index.top_k(&[1.0], 3).is_empty());
    }
}
