// In-process doubles for the component ports.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use fraudscan_domain::{
    ObjectStore, ObjectStoreError, PredictionError, PredictionInstance, PredictionResponse,
    PredictionService, ResultRepository, ResultStoreError, RuntimeConfig, StoredObject,
    TransactionRecord, FILENAME_FIELD,
};

use crate::{AppState, Metrics};

#[derive(Default)]
pub(crate) struct FakeObjectStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    fail_writes: AtomicBool,
}

impl FakeObjectStore {
    pub(crate) fn contains(&self, name: &str) -> bool {
        self.objects.lock().unwrap().contains_key(name)
    }

    pub(crate) fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ObjectStore for FakeObjectStore {
    async fn put(
        &self,
        name: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<StoredObject, ObjectStoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ObjectStoreError::Transport("bucket unreachable".to_string()));
        }
        let size = bytes.len() as u64;
        self.objects.lock().unwrap().insert(name.to_string(), bytes);
        Ok(StoredObject {
            name: name.to_string(),
            bucket: "test-bucket".to_string(),
            size,
            generation: None,
        })
    }

    async fn get_text(&self, name: &str) -> Result<String, ObjectStoreError> {
        let objects = self.objects.lock().unwrap();
        let bytes = objects
            .get(name)
            .ok_or_else(|| ObjectStoreError::NotFound(name.to_string()))?;
        String::from_utf8(bytes.clone()).map_err(|err| ObjectStoreError::Decode(err.to_string()))
    }
}

#[derive(Default)]
pub(crate) struct FakeResults {
    documents: Mutex<Vec<Map<String, Value>>>,
}

impl FakeResults {
    pub(crate) fn documents(&self) -> Vec<Map<String, Value>> {
        self.documents.lock().unwrap().clone()
    }

    fn matching(&self, filename: &str) -> Vec<Map<String, Value>> {
        self.documents
            .lock()
            .unwrap()
            .iter()
            .filter(|doc| doc.get(FILENAME_FIELD) == Some(&json!(filename)))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ResultRepository for FakeResults {
    async fn append(&self, record: &TransactionRecord) -> Result<(), ResultStoreError> {
        self.documents.lock().unwrap().push(record.to_document());
        Ok(())
    }

    async fn query(
        &self,
        filename: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Map<String, Value>>, ResultStoreError> {
        Ok(self
            .matching(filename)
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self, filename: &str) -> Result<u64, ResultStoreError> {
        Ok(self.matching(filename).len() as u64)
    }
}

#[derive(Default)]
struct PredictionScript {
    flags: Vec<bool>,
    fail: bool,
    calls: Mutex<Vec<Vec<PredictionInstance>>>,
}

#[derive(Clone, Default)]
pub(crate) struct FakePredictions {
    script: Arc<PredictionScript>,
}

impl FakePredictions {
    pub(crate) fn flags(flags: &[bool]) -> Self {
        Self {
            script: Arc::new(PredictionScript {
                flags: flags.to_vec(),
                ..PredictionScript::default()
            }),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            script: Arc::new(PredictionScript {
                fail: true,
                ..PredictionScript::default()
            }),
        }
    }

    pub(crate) fn calls(&self) -> Vec<Vec<PredictionInstance>> {
        self.script.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PredictionService for FakePredictions {
    async fn predict(
        &self,
        instances: &[PredictionInstance],
    ) -> Result<PredictionResponse, PredictionError> {
        self.script.calls.lock().unwrap().push(instances.to_vec());
        if self.script.fail {
            return Err(PredictionError::Status {
                status: 503,
                body: "endpoint unavailable".to_string(),
            });
        }
        Ok(PredictionResponse::from_predictions(
            self.script
                .flags
                .iter()
                .map(|flag| json!({ "is_fraud": flag }))
                .collect(),
        ))
    }
}

pub(crate) fn test_state(
    predictions: FakePredictions,
) -> (AppState, Arc<FakeObjectStore>, Arc<FakeResults>) {
    let store = Arc::new(FakeObjectStore::default());
    let results = Arc::new(FakeResults::default());
    let state = AppState {
        config: RuntimeConfig::default(),
        object_store: store.clone(),
        prediction_service: Arc::new(predictions),
        result_repo: results.clone(),
        metrics: Arc::new(Metrics::default()),
    };
    (state, store, results)
}
