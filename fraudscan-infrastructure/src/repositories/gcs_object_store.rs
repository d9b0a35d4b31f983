use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

use fraudscan_domain::{ObjectStore, ObjectStoreError, StoredObject};

use crate::gcp::{send_authorized, AccessTokenProvider, CallFailure};
use crate::utils::trim_trailing_slash;

/// Cloud Storage bucket accessed through the JSON API.
pub struct GcsObjectStore {
    client: Client,
    tokens: Arc<AccessTokenProvider>,
    base_url: String,
    bucket: String,
}

#[derive(Debug, Deserialize)]
struct ObjectResource {
    name: String,
    bucket: String,
    #[serde(default)]
    size: Option<String>,
    #[serde(default)]
    generation: Option<String>,
}

impl GcsObjectStore {
    pub fn new(
        client: Client,
        tokens: Arc<AccessTokenProvider>,
        base_url: &str,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            client,
            tokens,
            base_url: trim_trailing_slash(base_url),
            bucket: bucket.into(),
        }
    }

    fn upload_url(&self, name: &str) -> Result<Url, ObjectStoreError> {
        object_upload_url(&self.base_url, &self.bucket, name)
    }

    fn media_url(&self, name: &str) -> Result<Url, ObjectStoreError> {
        object_media_url(&self.base_url, &self.bucket, name)
    }
}

/// `POST {base}/upload/storage/v1/b/{bucket}/o?uploadType=media&name={name}`
pub fn object_upload_url(base_url: &str, bucket: &str, name: &str) -> Result<Url, ObjectStoreError> {
    let mut url = parse_base(base_url)?;
    url.path_segments_mut()
        .map_err(|_| ObjectStoreError::Transport(format!("invalid base url {}", base_url)))?
        .pop_if_empty()
        .extend(["upload", "storage", "v1", "b", bucket, "o"]);
    url.query_pairs_mut()
        .append_pair("uploadType", "media")
        .append_pair("name", name);
    Ok(url)
}

/// `GET {base}/storage/v1/b/{bucket}/o/{name}?alt=media`, with the object
/// name percent-encoded as a single path segment.
pub fn object_media_url(base_url: &str, bucket: &str, name: &str) -> Result<Url, ObjectStoreError> {
    let mut url = parse_base(base_url)?;
    url.path_segments_mut()
        .map_err(|_| ObjectStoreError::Transport(format!("invalid base url {}", base_url)))?
        .pop_if_empty()
        .extend(["storage", "v1", "b", bucket, "o"])
        .push(name);
    url.query_pairs_mut().append_pair("alt", "media");
    Ok(url)
}

fn parse_base(base_url: &str) -> Result<Url, ObjectStoreError> {
    Url::parse(base_url).map_err(|err| ObjectStoreError::Transport(format!("{}: {}", base_url, err)))
}

#[async_trait]
impl ObjectStore for GcsObjectStore {
    async fn put(
        &self,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject, ObjectStoreError> {
        let size = bytes.len() as u64;
        let request = self
            .client
            .post(self.upload_url(name)?)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes);
        let body = send_authorized(&self.tokens, request).await?;
        let resource: ObjectResource = serde_json::from_slice(&body)
            .map_err(|err| ObjectStoreError::Decode(err.to_string()))?;
        debug!(object = %resource.name, bucket = %resource.bucket, "object stored");
        Ok(StoredObject {
            size: resource
                .size
                .as_deref()
                .and_then(|value| value.parse().ok())
                .unwrap_or(size),
            name: resource.name,
            bucket: resource.bucket,
            generation: resource.generation,
        })
    }

    async fn get_text(&self, name: &str) -> Result<String, ObjectStoreError> {
        let request = self.client.get(self.media_url(name)?);
        let body = match send_authorized(&self.tokens, request).await {
            Ok(body) => body,
            Err(CallFailure::Status { status: 404, .. }) => {
                return Err(ObjectStoreError::NotFound(name.to_string()))
            }
            Err(other) => return Err(other.into()),
        };
        String::from_utf8(body).map_err(|err| ObjectStoreError::Decode(err.to_string()))
    }
}
