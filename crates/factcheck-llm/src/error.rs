//! Errors raised talking to the Anthropic and embedding HTTP APIs.

use std::time::Duration;

pub type LlmResult<T, E = LlmError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("request to upstream LLM provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream provider rejected the API key")]
    Auth,

    #[error("upstream provider returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("upstream provider is rate limiting this key")]
    RateLimited,

    #[error("failed to parse upstream response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl LlmError {
    pub fn is_transient(&self) -> bool {
        matches!(self, LlmError::Transport(_) | LlmError::RateLimited)
            || matches!(self, LlmError::UpstreamStatus { status, .. } if *status >= 500)
    }

    pub fn retry_delay(attempt: u32) -> Duration {
        let base_ms = 200u64.saturating_mul(1u64 << attempt.min(10));
        let jitter_ms = rand::random::<u64>() % (base_ms / 2 + 1);
        Duration::from_millis(base_ms + jitter_ms)
    }
}

impl From<LlmError> for factcheck_core::Error {
    fn from(value: LlmError) -> Self {
        match value {
            LlmError::Auth => factcheck_core::Error::auth(),
            LlmError::RateLimited => factcheck_core::Error::rate_limited(),
            other => factcheck_core::Error::upstream(Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_delay_grows_with_attempt() {
        let d0 = LlmError::retry_delay(0);
        let d3 = LlmError::retry_delay(3);
        assert!(d0.as_millis() >= 200);
        assert!(d3.as_millis() >= 1600);
    }

    #[test]
    fn server_status_is_transient_client_status_is_not() {
        let server = LlmError::UpstreamStatus {
            status: 503,
            body: String::new(),
        };
        let client = LlmError::UpstreamStatus {
            status: 400,
            body: String::new(),
        };
        assert!(server.is_transient());
        assert!(!client.is_transient());
    }
}
