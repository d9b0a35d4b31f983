use std::sync::Arc;

use gcp_auth::TokenProvider;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, info};

const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("no application default credentials: {0}")]
    Credentials(String),
    #[error("access token request failed: {0}")]
    Request(String),
}

enum TokenSource {
    Static(String),
    ApplicationDefault {
        provider: OnceCell<Arc<dyn TokenProvider>>,
    },
}

/// OAuth access tokens for the Google APIs: either a fixed token from the
/// configuration or Application Default Credentials (service-account key
/// file, gcloud user credentials, then the metadata server).
pub struct AccessTokenProvider {
    source: TokenSource,
}

impl AccessTokenProvider {
    pub fn fixed(token: impl Into<String>) -> Self {
        Self {
            source: TokenSource::Static(token.into()),
        }
    }

    /// Credentials are looked up on the first token request.
    pub fn application_default() -> Self {
        Self {
            source: TokenSource::ApplicationDefault {
                provider: OnceCell::new(),
            },
        }
    }

    pub fn from_settings(access_token: Option<&str>) -> Self {
        match access_token {
            Some(token) => Self::fixed(token),
            None => Self::application_default(),
        }
    }

    pub fn describe(&self) -> &'static str {
        match self.source {
            TokenSource::Static(_) => "static",
            TokenSource::ApplicationDefault { .. } => "application-default",
        }
    }

    pub async fn token(&self) -> Result<String, TokenError> {
        match &self.source {
            TokenSource::Static(token) => Ok(token.clone()),
            TokenSource::ApplicationDefault { provider } => {
                let provider = provider
                    .get_or_try_init(|| async {
                        let provider = gcp_auth::provider()
                            .await
                            .map_err(|err| TokenError::Credentials(err.to_string()))?;
                        info!("application default credentials resolved");
                        Ok::<_, TokenError>(provider)
                    })
                    .await?;
                // The provider caches tokens and refreshes them before expiry.
                let token = provider
                    .token(&[CLOUD_PLATFORM_SCOPE])
                    .await
                    .map_err(|err| TokenError::Request(err.to_string()))?;
                debug!("access token obtained");
                Ok(token.as_str().to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_token_is_returned_verbatim() {
        let provider = AccessTokenProvider::from_settings(Some("ya29.test"));
        assert_eq!(provider.describe(), "static");
        assert_eq!(provider.token().await.expect("token"), "ya29.test");
    }

    #[test]
    fn missing_token_falls_back_to_application_default() {
        let provider = AccessTokenProvider::from_settings(None);
        assert_eq!(provider.describe(), "application-default");
        match &provider.source {
            TokenSource::ApplicationDefault { provider } => assert!(provider.get().is_none()),
            TokenSource::Static(_) => panic!("expected application default source"),
        }
    }
}
