#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod chunk;
mod error;
mod reader;

pub use chunk::{chunk_for_verification, greedy_paragraph_split, MAX_CHUNK_CHARS};
pub use error::{PdfError, PdfResult};
pub use reader::extract_pages;
