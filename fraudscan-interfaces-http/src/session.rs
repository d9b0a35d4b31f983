use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use time::Duration;
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};
use tracing::error;

use fraudscan_domain::RuntimeConfig;

use crate::error::HttpError;

const LAST_UPLOADED_FILE_KEY: &str = "last_uploaded_file";
// one year
const MAX_IDLE_MINUTES: u64 = 365 * 24 * 60;

/// Per-browser state: the name of the file this client uploaded last.
pub struct UploadSession {
    session: Session,
}

impl UploadSession {
    pub async fn last_uploaded_file(&self) -> Result<Option<String>, HttpError> {
        self.session
            .get::<String>(LAST_UPLOADED_FILE_KEY)
            .await
            .map_err(|err| {
                error!("failed to read session: {}", err);
                HttpError::Internal(err.to_string())
            })
    }

    pub async fn remember_upload(&self, filename: &str) -> Result<(), HttpError> {
        self.session
            .insert(LAST_UPLOADED_FILE_KEY, filename)
            .await
            .map_err(|err| {
                error!("failed to write session: {}", err);
                HttpError::Internal(err.to_string())
            })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for UploadSession
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state).await?;
        Ok(Self { session })
    }
}

/// Cookie-backed sessions held in process memory.
pub fn session_layer(config: &RuntimeConfig) -> SessionManagerLayer<MemoryStore> {
    let idle_minutes = config.session_idle_minutes.min(MAX_IDLE_MINUTES) as i64;
    SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.session_secure)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(idle_minutes)))
}
