#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod client;
mod embed;
mod error;
pub mod extract;
pub mod verify;

pub use client::{with_retry, AnthropicClient, LlmConfig};
pub use embed::{EmbeddingClient, EmbeddingIndex};
pub use error::{LlmError, LlmResult};
pub use extract::{spawn_extraction, PageClaims};
pub use verify::{VerificationOutcome, VerificationPipeline};
