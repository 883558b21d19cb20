//! The extraction worker pool: one bounded-concurrency LLM call per page.

mod parse;
mod worker;

pub use parse::parse_claims_ndjson;
pub use worker::{spawn_extraction, PageClaims};

/// System prompt sent with every per-page extraction call. Instructs the
/// model to emit at most 8 NDJSON claim objects per page.
pub const EXTRACTION_SYSTEM_PROMPT: &str = "\
You are a fact-checking assistant. Given one page of a research paper, \
extract up to 8 factual claims made on this page. Respond with newline- \
delimited JSON (NDJSON): one JSON object per line, no surrounding array, \
no prose. Each object has the fields `id` (string, optional), `text` \
(string, the claim, at most 280 characters), and `status` (one of \
\"cited\", \"weakly_cited\", \"uncited\"; optional, defaults to \
\"uncited\"). Output nothing if the page contains no factual claims.";
