#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod error;
pub mod event;
pub mod job;
pub mod pdf;
pub mod util;
pub mod verification;

pub use error::{Error, ErrorKind, Result};
pub use event::{DoneEvent, ErrorPayload, ProgressEvent, ProgressPhase, StreamEvent};
pub use job::{Job, JobStatus};
pub use pdf::PdfChunk;
pub use verification::{Claim, ClaimStatus, Evidence, Suggestion, Verdict, Verification};

/// Tracing target for log records emitted by this crate.
pub const TRACING_TARGET: &str = "factcheck_core";
