//! Plain `reqwest`-backed Anthropic client.
//!
//! Deliberately thinner than a multi-provider completion abstraction: this
//! workspace only ever talks to one provider, and needs exact control over
//! the system prompt, NDJSON body parsing, and retry/backoff - none of
//! which benefit from an abstraction over providers we will never add.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

use crate::error::{LlmError, LlmResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const VALIDATION_TIMEOUT: Duration = Duration::from_secs(10);
const VALIDATION_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_RETRIES: u32 = 3;

/// Configuration for the Anthropic and embedding HTTP clients.
#[derive(Debug, Clone, clap::Parser)]
pub struct LlmConfig {
    #[clap(long, env = "ANTHROPIC_API_URL", default_value = "https://api.anthropic.com")]
    pub anthropic_api_url: String,

    #[clap(long, env = "ANTHROPIC_MODEL", default_value = "claude-sonnet-4-5")]
    pub anthropic_model: String,

    #[clap(long, env = "ANTHROPIC_VERSION", default_value = "2023-06-01")]
    pub anthropic_version: String,

    #[clap(long, env = "EMBEDDING_API_URL")]
    pub embedding_api_url: String,

    #[clap(
        long,
        env = "EMBEDDING_MODEL_NAME",
        default_value = "sentence-transformers/all-MiniLM-L6-v2"
    )]
    pub embedding_model_name: String,

    /// Bounded concurrency for the extraction worker pool.
    #[clap(long, env = "EXTRACT_CONCURRENCY", default_value_t = 4)]
    pub extract_concurrency: usize,
}

struct ClientInner {
    http: Client,
    config: LlmConfig,
}

/// Cloneable handle onto the Anthropic Messages API.
#[derive(Clone)]
pub struct AnthropicClient {
    inner: Arc<ClientInner>,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

impl AnthropicClient {
    pub fn new(config: LlmConfig) -> LlmResult<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("factcheck-server/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner { http, config }),
        })
    }

    pub fn model(&self) -> &str {
        &self.inner.config.anthropic_model
    }

    pub fn extract_concurrency(&self) -> usize {
        self.inner.config.extract_concurrency
    }

    /// One Messages API call, returning the concatenated text of every
    /// content block. No retry here - callers that need retry (the
    /// extraction worker) wrap this with [`with_retry`].
    #[tracing::instrument(skip(self, api_key, system_prompt, user_prompt), target = "factcheck_llm::client")]
    async fn messages(
        &self,
        api_key: &str,
        system_prompt: &str,
        user_prompt: &str,
        max_tokens: u32,
    ) -> LlmResult<String> {
        let url = format!("{}/v1/messages", self.inner.config.anthropic_api_url);
        let body = json!({
            "model": self.inner.config.anthropic_model,
            "max_tokens": max_tokens,
            "system": system_prompt,
            "messages": [{"role": "user", "content": user_prompt}],
        });

        let response = self
            .inner
            .http
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", &self.inner.config.anthropic_version)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(LlmError::Auth);
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: MessagesResponse = response.json().await.map_err(LlmError::Transport)?;
        Ok(parsed.content.into_iter().map(|block| block.text).collect())
    }

    /// Validate an API key with a minimal, cheap ping call. `Ok(false)`
    /// means the key was rejected (401/403); any other failure is an `Err`.
    #[tracing::instrument(skip(self, api_key), target = "factcheck_llm::client")]
    pub async fn validate_api_key(&self, api_key: &str) -> LlmResult<bool> {
        let url = format!("{}/v1/messages", self.inner.config.anthropic_api_url);
        let body = json!({
            "model": self.inner.config.anthropic_model,
            "max_tokens": 1,
            "messages": [{"role": "user", "content": "Ping"}],
        });

        let response = self
            .inner
            .http
            .post(&url)
            .timeout(VALIDATION_TIMEOUT)
            .header("x-api-key", api_key)
            .header("anthropic-version", &self.inner.config.anthropic_version)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Ok(false);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(true)
    }

    /// Send one page of text through the extraction system prompt and
    /// return the raw NDJSON response body.
    pub async fn extract_page(&self, api_key: &str, system_prompt: &str, page_text: &str) -> LlmResult<String> {
        with_retry(|| self.messages(api_key, system_prompt, page_text, 2048)).await
    }

    /// Send one adjudication request and return the raw JSON response body.
    pub async fn adjudicate(&self, api_key: &str, system_prompt: &str, user_prompt: &str) -> LlmResult<String> {
        with_retry(|| self.messages(api_key, system_prompt, user_prompt, 1024)).await
    }
}

/// Retry a transient upstream call up to [`MAX_RETRIES`] times with
/// jittered exponential backoff (200ms * 2^n).
pub async fn with_retry<F, Fut, T>(mut call: F) -> LlmResult<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = LlmResult<T>>,
{
    let mut attempt = 0;
    loop {
        match call().await {
            Ok(value) => return Ok(value),
            Err(error) if error.is_transient() && attempt < MAX_RETRIES => {
                let delay = LlmError::retry_delay(attempt);
                tracing::warn!(
                    target: "factcheck_llm::client",
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    %error,
                    "retrying transient llm error"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}

/// Timeout configuration exposed for the embedding client, which shares the
/// same "cheap external ping" profile as key validation.
pub fn validation_timeouts() -> (Duration, Duration) {
    (VALIDATION_TIMEOUT, VALIDATION_CONNECT_TIMEOUT)
}
