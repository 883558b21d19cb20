#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod handler;
pub mod middleware;
mod orchestrator;
pub mod service;
mod state;
mod router;

pub use middleware::MiddlewareConfig;
pub use router::create_router;
pub use state::ServiceState;
