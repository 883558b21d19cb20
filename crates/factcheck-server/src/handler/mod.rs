pub mod error;
mod health;
mod stream;
mod upload;
mod validate_key;
mod verify;

pub use health::healthz;
pub use stream::stream_claims;
pub use upload::upload_paper;
pub use validate_key::validate_api_key;
pub use verify::verify_claim;
