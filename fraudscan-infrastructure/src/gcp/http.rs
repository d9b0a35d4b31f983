use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use fraudscan_domain::{ObjectStoreError, PredictionError, ResultStoreError};

use super::auth::AccessTokenProvider;
use crate::utils::truncate_body;

/// Failure of one authenticated REST call, before it is mapped onto the
/// error type of the calling component.
#[derive(Debug)]
pub enum CallFailure {
    Unauthenticated(String),
    Status { status: u16, body: String },
    Transport(String),
    Decode(String),
}

/// Sends `request` with a bearer token and returns the raw response body.
pub async fn send_authorized(
    tokens: &AccessTokenProvider,
    request: RequestBuilder,
) -> Result<Vec<u8>, CallFailure> {
    let token = tokens
        .token()
        .await
        .map_err(|err| CallFailure::Unauthenticated(err.to_string()))?;
    let response = request
        .bearer_auth(token)
        .send()
        .await
        .map_err(|err| CallFailure::Transport(err.to_string()))?;
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|err| CallFailure::Transport(err.to_string()))?;
    if !status.is_success() {
        let text = String::from_utf8_lossy(&body);
        if status.as_u16() == 401 {
            return Err(CallFailure::Unauthenticated(truncate_body(&text)));
        }
        return Err(CallFailure::Status {
            status: status.as_u16(),
            body: truncate_body(&text),
        });
    }
    Ok(body.to_vec())
}

pub async fn send_json<T: DeserializeOwned>(
    tokens: &AccessTokenProvider,
    request: RequestBuilder,
) -> Result<T, CallFailure> {
    let body = send_authorized(tokens, request).await?;
    serde_json::from_slice(&body).map_err(|err| CallFailure::Decode(err.to_string()))
}

impl From<CallFailure> for ObjectStoreError {
    fn from(value: CallFailure) -> Self {
        match value {
            CallFailure::Unauthenticated(msg) => ObjectStoreError::Unauthenticated(msg),
            CallFailure::Status { status, body } => ObjectStoreError::Status { status, body },
            CallFailure::Transport(msg) => ObjectStoreError::Transport(msg),
            CallFailure::Decode(msg) => ObjectStoreError::Decode(msg),
        }
    }
}

impl From<CallFailure> for PredictionError {
    fn from(value: CallFailure) -> Self {
        match value {
            CallFailure::Unauthenticated(msg) => PredictionError::Unauthenticated(msg),
            CallFailure::Status { status, body } => PredictionError::Status { status, body },
            CallFailure::Transport(msg) => PredictionError::Transport(msg),
            CallFailure::Decode(msg) => PredictionError::Decode(msg),
        }
    }
}

impl From<CallFailure> for ResultStoreError {
    fn from(value: CallFailure) -> Self {
        match value {
            CallFailure::Unauthenticated(msg) => ResultStoreError::Unauthenticated(msg),
            CallFailure::Status { status, body } => ResultStoreError::Status { status, body },
            CallFailure::Transport(msg) => ResultStoreError::Transport(msg),
            CallFailure::Decode(msg) => ResultStoreError::Decode(msg),
        }
    }
}
