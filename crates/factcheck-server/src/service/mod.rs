mod paper;

pub use paper::{create_job_for_file, stream_claims, verify_claim, ClaimStream};
