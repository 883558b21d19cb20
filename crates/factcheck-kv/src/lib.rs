#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod client;
mod error;
mod repo;

pub use client::{KvClient, KvConfig};
pub use error::{KvError, KvResult};
pub use repo::{BlobRepository, ClaimBufferRepository, JobRepository, VerificationRepository};

pub const TRACING_TARGET_CLIENT: &str = "factcheck_kv::client";
pub const TRACING_TARGET_REPO: &str = "factcheck_kv::repo";
