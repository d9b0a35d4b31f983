use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use fraudscan_domain::{
    ObjectStore, ObjectStoreError, ResultRepository, ResultStoreError, StoredObject,
    TransactionRecord, FILENAME_FIELD,
};

pub const MEMORY_BUCKET: &str = "memory";

/// Process-local blob store used by the `memory` backend.
#[derive(Default)]
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<String, (Vec<u8>, u64)>>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put(
        &self,
        name: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<StoredObject, ObjectStoreError> {
        let size = bytes.len() as u64;
        let mut objects = self.objects.write().await;
        let generation = objects.get(name).map(|(_, generation)| generation + 1).unwrap_or(1);
        objects.insert(name.to_string(), (bytes, generation));
        Ok(StoredObject {
            name: name.to_string(),
            bucket: MEMORY_BUCKET.to_string(),
            size,
            generation: Some(generation.to_string()),
        })
    }

    async fn get_text(&self, name: &str) -> Result<String, ObjectStoreError> {
        let objects = self.objects.read().await;
        let (bytes, _) = objects
            .get(name)
            .ok_or_else(|| ObjectStoreError::NotFound(name.to_string()))?;
        String::from_utf8(bytes.clone()).map_err(|err| ObjectStoreError::Decode(err.to_string()))
    }
}

/// Process-local document collection used by the `memory` backend. Documents
/// keep insertion order.
#[derive(Default)]
pub struct InMemoryResultRepository {
    documents: RwLock<Vec<Map<String, Value>>>,
}

impl InMemoryResultRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

fn belongs_to(document: &Map<String, Value>, filename: &str) -> bool {
    document.get(FILENAME_FIELD).and_then(Value::as_str) == Some(filename)
}

#[async_trait]
impl ResultRepository for InMemoryResultRepository {
    async fn append(&self, record: &TransactionRecord) -> Result<(), ResultStoreError> {
        self.documents.write().await.push(record.to_document());
        Ok(())
    }

    async fn query(
        &self,
        filename: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Map<String, Value>>, ResultStoreError> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter(|document| belongs_to(document, filename))
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn count(&self, filename: &str) -> Result<u64, ResultStoreError> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter(|document| belongs_to(document, filename))
            .count() as u64)
    }
}
