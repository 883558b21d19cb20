//! `blob:{id}` repository for raw uploaded PDF bytes.

use crate::client::KvClient;
use crate::error::KvResult;

fn key(blob_id: &str) -> String {
    format!("blob:{blob_id}")
}

/// Stores the raw PDF bytes a job was created from, so extraction can be
/// retried without asking the client to re-upload.
#[derive(Clone)]
pub struct BlobRepository {
    kv: KvClient,
}

impl BlobRepository {
    pub fn new(kv: KvClient) -> Self {
        Self { kv }
    }

    pub async fn put_pdf(&self, blob_id: &str, bytes: Vec<u8>) -> KvResult<()> {
        self.kv.set_bytes(&key(blob_id), bytes).await
    }

    pub async fn get_pdf(&self, blob_id: &str) -> KvResult<Option<Vec<u8>>> {
        self.kv.get_bytes(&key(blob_id)).await
    }
}
