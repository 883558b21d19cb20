//! Shared error taxonomy for the factcheck pipeline.
//!
//! Every fallible operation below the HTTP layer returns this [`Error`].
//! The server's `handler::error` module maps each [`ErrorKind`] onto an
//! HTTP status code; nothing below that layer needs to know about status
//! codes at all.

use std::error::Error as StdError;
use std::time::Duration;

/// Result type alias used throughout the workspace.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Structured error with an optional source for debugging.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    pub fn with_source(kind: ErrorKind, source: Box<dyn StdError + Send + Sync>) -> Self {
        Self {
            kind,
            source: Some(source),
        }
    }

    /// Client-supplied input was invalid (missing job, malformed upload, ...).
    pub fn invalid_input() -> Self {
        Self::new(ErrorKind::InvalidInput)
    }

    /// The supplied Anthropic API key was rejected upstream.
    pub fn auth() -> Self {
        Self::new(ErrorKind::AuthError)
    }

    /// A downstream provider (LLM, embeddings) returned an unexpected error.
    pub fn upstream(source: Box<dyn StdError + Send + Sync>) -> Self {
        Self::with_source(ErrorKind::UpstreamError, source)
    }

    /// A referenced job, claim, or blob does not exist (or has expired).
    pub fn not_found() -> Self {
        Self::new(ErrorKind::NotFound)
    }

    /// Stored state failed to decode. Callers should log and degrade, not
    /// propagate this to an HTTP client unless recovery is impossible.
    pub fn corrupt_state(source: Box<dyn StdError + Send + Sync>) -> Self {
        Self::with_source(ErrorKind::CorruptState, source)
    }

    /// Caller exceeded the configured rate limit.
    pub fn rate_limited() -> Self {
        Self::new(ErrorKind::RateLimited)
    }

    pub fn internal(source: Box<dyn StdError + Send + Sync>) -> Self {
        Self::with_source(ErrorKind::Internal, source)
    }

    pub fn is_client_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::InvalidInput | ErrorKind::AuthError | ErrorKind::NotFound | ErrorKind::RateLimited
        )
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self.kind, ErrorKind::UpstreamError | ErrorKind::CorruptState | ErrorKind::Internal)
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self.kind, ErrorKind::UpstreamError | ErrorKind::RateLimited)
    }

    pub fn retry_delay(&self) -> Option<Duration> {
        match self.kind {
            ErrorKind::RateLimited => Some(Duration::from_secs(30)),
            ErrorKind::UpstreamError => Some(Duration::from_millis(200)),
            _ => None,
        }
    }
}

/// The seven-member error taxonomy shared across the whole pipeline.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ErrorKind {
    /// Client-supplied input was invalid.
    #[error("invalid input")]
    InvalidInput,
    /// The supplied API key was rejected by the upstream provider.
    #[error("authentication failed")]
    AuthError,
    /// A downstream provider returned an error or malformed response.
    #[error("upstream provider error")]
    UpstreamError,
    /// The referenced resource does not exist or has expired.
    #[error("not found")]
    NotFound,
    /// Stored state could not be decoded.
    #[error("corrupt stored state")]
    CorruptState,
    /// Caller exceeded the configured rate limit.
    #[error("rate limited")]
    RateLimited,
    /// Anything else.
    #[error("internal error")]
    #[default]
    Internal,
}
