//! Bounded-concurrency fan-out over pages, yielding results as each
//! completes rather than in page order - mirrors `asyncio.Semaphore` +
//! `as_completed` in the pipeline this was distilled from, and the same
//! semaphore-gated task shape the worker pool in this workspace's teacher
//! uses for bounding concurrent job handling.

use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};
use tokio_util::sync::CancellationToken;

use super::parse::parse_claims_ndjson;
use super::EXTRACTION_SYSTEM_PROMPT;
use crate::client::AnthropicClient;

/// One page's extraction result. Claims is empty when the call failed
/// after retries - extraction failures are swallowed per page, never
/// propagated to the caller.
pub struct PageClaims {
    pub page: u32,
    pub claims: Vec<factcheck_core::Claim>,
}

/// Spawn one task per page, each gated by a semaphore of size
/// `client.extract_concurrency()`. Results arrive on the returned receiver
/// in completion order; dropping the receiver or cancelling `cancel` stops
/// outstanding tasks from doing further work once their current call
/// returns.
pub fn spawn_extraction(
    client: AnthropicClient,
    api_key: String,
    pages: Vec<(u32, String)>,
    cancel: CancellationToken,
) -> mpsc::Receiver<PageClaims> {
    let (tx, rx) = mpsc::channel(pages.len().max(1));
    let semaphore = Arc::new(Semaphore::new(client.extract_concurrency()));

    for (page, text) in pages {
        let client = client.clone();
        let api_key = api_key.clone();
        let semaphore = Arc::clone(&semaphore);
        let cancel = cancel.clone();
        let tx = tx.clone();

        tokio::spawn(async move {
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return;
            };
            if cancel.is_cancelled() {
                return;
            }

            let claims = match client.extract_page(&api_key, EXTRACTION_SYSTEM_PROMPT, &text).await {
                Ok(body) => parse_claims_ndjson(page, &body),
                Err(error) => {
                    tracing::warn!(
                        target: "factcheck_llm::extract",
                        page,
                        %error,
                        "page extraction failed after retries, skipping"
                    );
                    Vec::new()
                }
            };

            let _ = tx.send(PageClaims { page, claims }).await;
        });
    }

    rx
}
