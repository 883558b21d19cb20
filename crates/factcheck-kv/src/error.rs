//! Error taxonomy for the KV store adapter.

use std::borrow::Cow;

pub type KvResult<T, E = KvError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum KvError {
    #[error("invalid redis configuration: {0}")]
    Config(Cow<'static, str>),

    #[error("timed out waiting for a pooled connection")]
    Timeout,

    #[error("redis connection error: {0}")]
    Connection(#[from] deadpool_redis::PoolError),

    #[error("redis command failed: {0}")]
    Command(#[from] redis::RedisError),

    #[error("failed to (de)serialize stored value: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Unexpected(Cow<'static, str>),
}

impl KvError {
    pub fn config(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Config(message.into())
    }

    pub fn unexpected(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Unexpected(message.into())
    }

    /// True for errors that are plausibly transient (pool exhaustion,
    /// connection reset) and worth a caller-side retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, KvError::Timeout | KvError::Connection(_))
            || matches!(self, KvError::Command(e) if e.is_timeout() || e.is_connection_dropped())
    }

    pub fn is_permanent(&self) -> bool {
        !self.is_transient()
    }
}

impl From<KvError> for factcheck_core::Error {
    fn from(value: KvError) -> Self {
        match &value {
            KvError::Serialization(_) => factcheck_core::Error::corrupt_state(Box::new(value)),
            _ => factcheck_core::Error::internal(Box::new(value)),
        }
    }
}
