mod blob;
mod claims;
mod job;
mod verification;

pub use blob::BlobRepository;
pub use claims::ClaimBufferRepository;
pub use job::JobRepository;
pub use verification::VerificationRepository;
