use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::{json, Map, Value};
use tracing::debug;

use fraudscan_domain::{ResultRepository, ResultStoreError, TransactionRecord, FILENAME_FIELD};

use super::firestore_value::{decode_fields, decode_value, encode_fields};
use crate::gcp::{send_json, AccessTokenProvider};
use crate::utils::trim_trailing_slash;

const COUNT_ALIAS: &str = "total";
// structuredQuery offset and limit are int32 on the wire
const MAX_WINDOW: u64 = i32::MAX as u64;

/// Firestore collection of enriched transaction rows, accessed through the
/// v1 REST API.
pub struct FirestoreResultRepository {
    client: Client,
    tokens: Arc<AccessTokenProvider>,
    collection: String,
    collection_url: Url,
    run_query_url: Url,
    aggregation_url: Url,
}

impl FirestoreResultRepository {
    pub fn new(
        client: Client,
        tokens: Arc<AccessTokenProvider>,
        base_url: &str,
        project_id: &str,
        database: &str,
        collection: impl Into<String>,
    ) -> Result<Self, ResultStoreError> {
        let collection = collection.into();
        let base = trim_trailing_slash(base_url);
        let parent = ["v1", "projects", project_id, "databases", database];
        Ok(Self {
            collection_url: documents_url(&base, &parent, &["documents", collection.as_str()])?,
            run_query_url: documents_url(&base, &parent, &["documents:runQuery"])?,
            aggregation_url: documents_url(&base, &parent, &["documents:runAggregationQuery"])?,
            client,
            tokens,
            collection,
        })
    }
}

fn documents_url(base: &str, parent: &[&str], tail: &[&str]) -> Result<Url, ResultStoreError> {
    let mut url =
        Url::parse(base).map_err(|err| ResultStoreError::Transport(format!("{}: {}", base, err)))?;
    url.path_segments_mut()
        .map_err(|_| ResultStoreError::Transport(format!("invalid base url {}", base)))?
        .pop_if_empty()
        .extend(parent)
        .extend(tail);
    Ok(url)
}

fn filename_filter(filename: &str) -> Value {
    json!({
        "fieldFilter": {
            "field": { "fieldPath": FILENAME_FIELD },
            "op": "EQUAL",
            "value": { "stringValue": filename }
        }
    })
}

/// Body of a `runQuery` call selecting one window of a file's documents.
pub fn run_query_body(collection: &str, filename: &str, offset: u64, limit: u64) -> Value {
    json!({
        "structuredQuery": {
            "from": [{ "collectionId": collection }],
            "where": filename_filter(filename),
            "offset": offset.min(MAX_WINDOW),
            "limit": limit.min(MAX_WINDOW)
        }
    })
}

/// Body of a `runAggregationQuery` call counting a file's documents.
pub fn count_body(collection: &str, filename: &str) -> Value {
    json!({
        "structuredAggregationQuery": {
            "structuredQuery": {
                "from": [{ "collectionId": collection }],
                "where": filename_filter(filename)
            },
            "aggregations": [{ "alias": COUNT_ALIAS, "count": {} }]
        }
    })
}

/// `runQuery` streams one element per document; elements without a
/// `document` only carry progress metadata.
pub fn decode_query_response(response: &Value) -> Result<Vec<Map<String, Value>>, ResultStoreError> {
    let items = response
        .as_array()
        .ok_or_else(|| ResultStoreError::Decode("runQuery response is not an array".to_string()))?;
    items
        .iter()
        .filter_map(|item| item.get("document"))
        .map(|document| match document.get("fields").and_then(Value::as_object) {
            Some(fields) => decode_fields(fields),
            None => Ok(Map::new()),
        })
        .collect()
}

pub fn decode_count_response(response: &Value) -> Result<u64, ResultStoreError> {
    let items = response.as_array().ok_or_else(|| {
        ResultStoreError::Decode("runAggregationQuery response is not an array".to_string())
    })?;
    let field = items
        .iter()
        .find_map(|item| item.pointer(&format!("/result/aggregateFields/{}", COUNT_ALIAS)));
    match field {
        Some(value) => decode_value(value)?
            .as_u64()
            .ok_or_else(|| ResultStoreError::Decode(format!("invalid count {}", value))),
        None => Err(ResultStoreError::Decode(
            "aggregation result missing count".to_string(),
        )),
    }
}

#[async_trait]
impl ResultRepository for FirestoreResultRepository {
    async fn append(&self, record: &TransactionRecord) -> Result<(), ResultStoreError> {
        let body = json!({ "fields": encode_fields(&record.to_document()) });
        let request = self.client.post(self.collection_url.clone()).json(&body);
        let created: Value = send_json(&self.tokens, request).await?;
        let document = created.get("name").and_then(Value::as_str).unwrap_or_default();
        debug!(document, "result document created");
        Ok(())
    }

    async fn query(
        &self,
        filename: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Map<String, Value>>, ResultStoreError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let body = run_query_body(&self.collection, filename, offset, limit);
        let request = self.client.post(self.run_query_url.clone()).json(&body);
        let response: Value = send_json(&self.tokens, request).await?;
        decode_query_response(&response)
    }

    async fn count(&self, filename: &str) -> Result<u64, ResultStoreError> {
        let body = count_body(&self.collection, filename);
        let request = self.client.post(self.aggregation_url.clone()).json(&body);
        let response: Value = send_json(&self.tokens, request).await?;
        decode_count_response(&response)
    }
}
