use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;

use fraudscan_domain::RuntimeConfig;

use super::validation::{require_setting, validate_base_url};
use crate::utils::trim_trailing_slash;

pub const CONFIG_PATH_ENV: &str = "FRAUDSCAN_CONFIG";
pub const BIND_ADDR_ENV: &str = "FRAUDSCAN_BIND_ADDR";

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Gcp,
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Gcp => "gcp",
            StorageBackend::Memory => "memory",
        }
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "gcp" => Ok(StorageBackend::Gcp),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(anyhow!("unknown backend '{}', expected gcp or memory", other)),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub backend: StorageBackend,
    pub project_id: Option<String>,
    pub region: Option<String>,
    pub endpoint_id: Option<String>,
    pub bucket_name: Option<String>,
    pub firestore_database: String,
    pub collection: String,
    pub access_token: Option<String>,
    pub storage_base_url: String,
    pub firestore_base_url: String,
    pub prediction_base_url: Option<String>,
    pub page_size: u64,
    pub max_body_bytes: u64,
    pub session_secure: bool,
    pub session_idle_minutes: u64,
    pub memory_fraud_flag: bool,
    pub log_dir: Option<String>,
    pub log_json: bool,
    #[serde(skip)]
    pub loaded_from: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            backend: StorageBackend::Gcp,
            project_id: None,
            region: None,
            endpoint_id: None,
            bucket_name: None,
            firestore_database: "(default)".to_string(),
            collection: "transactions".to_string(),
            access_token: None,
            storage_base_url: "https://storage.googleapis.com".to_string(),
            firestore_base_url: "https://firestore.googleapis.com".to_string(),
            prediction_base_url: None,
            page_size: 100,
            max_body_bytes: 32 * 1024 * 1024,
            session_secure: false,
            session_idle_minutes: 24 * 60,
            memory_fraud_flag: false,
            log_dir: None,
            log_json: false,
            loaded_from: None,
        }
    }
}

/// Connection settings for the three Google Cloud collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcpConfig {
    pub project_id: String,
    pub region: String,
    pub endpoint_id: String,
    pub bucket_name: String,
    pub firestore_database: String,
    pub collection: String,
    pub access_token: Option<String>,
    pub storage_base_url: String,
    pub firestore_base_url: String,
    pub prediction_base_url: String,
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            let mut config: AppConfig = toml::from_str(&content)?;
            config.loaded_from = Some(path.clone());
            config
        } else {
            AppConfig::default()
        };
        config.apply_env_overrides()?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        for value in [
            &mut self.project_id,
            &mut self.region,
            &mut self.endpoint_id,
            &mut self.bucket_name,
            &mut self.access_token,
            &mut self.prediction_base_url,
            &mut self.log_dir,
        ] {
            let cleaned = value
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(ToString::to_string);
            *value = cleaned;
        }
        self.storage_base_url = trim_trailing_slash(&self.storage_base_url);
        self.firestore_base_url = trim_trailing_slash(&self.firestore_base_url);
        if let Some(url) = &self.prediction_base_url {
            self.prediction_base_url = Some(trim_trailing_slash(url));
        }
        self.collection = self.collection.trim().to_string();
        self.firestore_database = self.firestore_database.trim().to_string();
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.page_size == 0 {
            return Err(anyhow!("page_size must be greater than 0"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.session_idle_minutes == 0 {
            return Err(anyhow!("session_idle_minutes must be greater than 0"));
        }
        if self.backend == StorageBackend::Gcp {
            self.to_gcp_config()?;
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            page_size: self.page_size,
            max_body_bytes: self.max_body_bytes,
            session_secure: self.session_secure,
            session_idle_minutes: self.session_idle_minutes,
        }
    }

    pub fn to_gcp_config(&self) -> Result<GcpConfig> {
        let project_id = require_setting("PROJECT_ID", self.project_id.as_deref())?;
        let region = require_setting("REGION", self.region.as_deref())?;
        let endpoint_id = require_setting("ENDPOINT_ID", self.endpoint_id.as_deref())?;
        let bucket_name = require_setting("BUCKET_NAME", self.bucket_name.as_deref())?;
        if self.collection.is_empty() {
            return Err(anyhow!("collection must not be empty"));
        }
        if self.firestore_database.is_empty() {
            return Err(anyhow!("firestore_database must not be empty"));
        }
        let prediction_base_url = self
            .prediction_base_url
            .clone()
            .unwrap_or_else(|| format!("https://{}-aiplatform.googleapis.com", region));

        validate_base_url("storage_base_url", &self.storage_base_url)?;
        validate_base_url("firestore_base_url", &self.firestore_base_url)?;
        validate_base_url("prediction_base_url", &prediction_base_url)?;

        Ok(GcpConfig {
            project_id: project_id.to_string(),
            region: region.to_string(),
            endpoint_id: endpoint_id.to_string(),
            bucket_name: bucket_name.to_string(),
            firestore_database: self.firestore_database.clone(),
            collection: self.collection.clone(),
            access_token: self.access_token.clone(),
            storage_base_url: self.storage_base_url.clone(),
            firestore_base_url: self.firestore_base_url.clone(),
            prediction_base_url,
        })
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(value) = lookup(BIND_ADDR_ENV) {
            self.bind_addr = value;
        }
        if let Some(value) = lookup("FRAUDSCAN_BACKEND") {
            self.backend = value.parse()?;
        }
        if let Some(value) = lookup("PROJECT_ID") {
            self.project_id = Some(value);
        }
        if let Some(value) = lookup("REGION") {
            self.region = Some(value);
        }
        if let Some(value) = lookup("ENDPOINT_ID") {
            self.endpoint_id = Some(value);
        }
        if let Some(value) = lookup("BUCKET_NAME") {
            self.bucket_name = Some(value);
        }
        if let Some(value) = lookup("FRAUDSCAN_FIRESTORE_DATABASE") {
            self.firestore_database = value;
        }
        if let Some(value) = lookup("FRAUDSCAN_COLLECTION") {
            self.collection = value;
        }
        if let Some(value) = lookup("GOOGLE_OAUTH_ACCESS_TOKEN") {
            self.access_token = Some(value);
        }
        if let Some(value) = lookup("FRAUDSCAN_STORAGE_BASE_URL") {
            self.storage_base_url = value;
        }
        if let Some(value) = lookup("FRAUDSCAN_FIRESTORE_BASE_URL") {
            self.firestore_base_url = value;
        }
        if let Some(value) = lookup("FRAUDSCAN_PREDICTION_BASE_URL") {
            self.prediction_base_url = Some(value);
        }
        if let Some(value) = lookup("FRAUDSCAN_PAGE_SIZE") {
            self.page_size = value.parse().unwrap_or(self.page_size);
        }
        if let Some(value) = lookup("FRAUDSCAN_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Some(value) = lookup("FRAUDSCAN_SESSION_SECURE") {
            self.session_secure = value.parse().unwrap_or(self.session_secure);
        }
        if let Some(value) = lookup("FRAUDSCAN_SESSION_IDLE_MINUTES") {
            self.session_idle_minutes = value.parse().unwrap_or(self.session_idle_minutes);
        }
        if let Some(value) = lookup("FRAUDSCAN_MEMORY_FRAUD_FLAG") {
            self.memory_fraud_flag = value.parse().unwrap_or(self.memory_fraud_flag);
        }
        if let Some(value) = lookup("FRAUDSCAN_LOG_DIR") {
            self.log_dir = Some(value);
        }
        if let Some(value) = lookup("FRAUDSCAN_LOG_JSON") {
            self.log_json = value.parse().unwrap_or(self.log_json);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn gcp_settings() -> HashMap<&'static str, String> {
        HashMap::from([
            ("PROJECT_ID", "demo-project".to_string()),
            ("REGION", "europe-west1".to_string()),
            ("ENDPOINT_ID", "1234567890".to_string()),
            ("BUCKET_NAME", "uploads".to_string()),
        ])
    }

    fn with_overrides(vars: HashMap<&'static str, String>) -> AppConfig {
        let mut config = AppConfig::default();
        config
            .apply_overrides(|key| vars.get(key).cloned())
            .expect("overrides");
        config.normalize();
        config
    }

    #[test]
    fn defaults_need_gcp_settings() {
        let config = AppConfig::default();
        let err = config.validate().expect_err("missing gcp settings");
        assert!(err.to_string().contains("PROJECT_ID"));
    }

    #[test]
    fn memory_backend_validates_without_gcp_settings() {
        let vars = HashMap::from([("FRAUDSCAN_BACKEND", "memory".to_string())]);
        let config = with_overrides(vars);
        assert_eq!(config.backend, StorageBackend::Memory);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn env_settings_build_gcp_config() {
        let config = with_overrides(gcp_settings());
        config.validate().expect("valid");
        let gcp = config.to_gcp_config().expect("gcp config");
        assert_eq!(gcp.project_id, "demo-project");
        assert_eq!(gcp.collection, "transactions");
        assert_eq!(gcp.firestore_database, "(default)");
        assert_eq!(
            gcp.prediction_base_url,
            "https://europe-west1-aiplatform.googleapis.com"
        );
    }

    #[test]
    fn blank_values_normalise_to_none() {
        let mut vars = gcp_settings();
        vars.insert("GOOGLE_OAUTH_ACCESS_TOKEN", "   ".to_string());
        vars.insert("FRAUDSCAN_PREDICTION_BASE_URL", "http://localhost:9090/".to_string());
        let config = with_overrides(vars);
        assert_eq!(config.access_token, None);
        assert_eq!(
            config.prediction_base_url.as_deref(),
            Some("http://localhost:9090")
        );
    }

    #[test]
    fn numeric_overrides_keep_defaults_on_garbage() {
        let vars = HashMap::from([
            ("FRAUDSCAN_PAGE_SIZE", "lots".to_string()),
            ("FRAUDSCAN_SESSION_SECURE", "true".to_string()),
        ]);
        let config = with_overrides(vars);
        assert_eq!(config.page_size, 100);
        assert!(config.session_secure);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let mut config = with_overrides(gcp_settings());
        config.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_backend_is_an_error() {
        let mut config = AppConfig::default();
        let result = config.apply_overrides(|key| {
            (key == "FRAUDSCAN_BACKEND").then(|| "sqlite".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn toml_file_shape() {
        let config: AppConfig = toml::from_str(
            r#"
bind_addr = "0.0.0.0:9000"
backend = "memory"
page_size = 25
"#,
        )
        .expect("toml");
        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.backend, StorageBackend::Memory);
        assert_eq!(config.page_size, 25);
        assert_eq!(config.collection, "transactions");
    }
}
