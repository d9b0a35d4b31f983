use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::entities::{StoredObject, TransactionRecord};
use crate::errors::{ObjectStoreError, ResultStoreError};

/// Blob storage keyed by the uploaded filename. Writes overwrite silently.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(
        &self,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject, ObjectStoreError>;
    async fn get_text(&self, name: &str) -> Result<String, ObjectStoreError>;
}

/// Append-only document collection of enriched rows.
#[async_trait]
pub trait ResultRepository: Send + Sync {
    async fn append(&self, record: &TransactionRecord) -> Result<(), ResultStoreError>;
    async fn query(
        &self,
        filename: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Map<String, Value>>, ResultStoreError>;
    async fn count(&self, filename: &str) -> Result<u64, ResultStoreError>;
}
