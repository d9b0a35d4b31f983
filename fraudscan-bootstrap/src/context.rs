use std::sync::Arc;

use anyhow::Result;
use reqwest::Client;
use tracing::info;

use fraudscan_application::{AppState, Metrics};
use fraudscan_domain::{ObjectStore, PredictionService, ResultRepository};
use fraudscan_infrastructure::{
    AccessTokenProvider, AppConfig, FirestoreResultRepository, GcpConfig, GcsObjectStore,
    InMemoryObjectStore, InMemoryResultRepository, StaticPredictionService, StorageBackend,
    VertexPredictionService,
};

pub struct AppContext {
    pub state: AppState,
}

struct Components {
    object_store: Arc<dyn ObjectStore>,
    prediction_service: Arc<dyn PredictionService>,
    result_repo: Arc<dyn ResultRepository>,
}

impl AppContext {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let components = match config.backend {
            StorageBackend::Gcp => gcp_components(&config.to_gcp_config()?)?,
            StorageBackend::Memory => memory_components(config.memory_fraud_flag),
        };

        let state = AppState {
            config: config.to_runtime_config(),
            object_store: components.object_store,
            prediction_service: components.prediction_service,
            result_repo: components.result_repo,
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state })
    }
}

fn gcp_components(gcp: &GcpConfig) -> Result<Components> {
    let client = Client::builder()
        .user_agent(concat!("fraudscan/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let tokens = Arc::new(AccessTokenProvider::from_settings(gcp.access_token.as_deref()));
    info!(
        project = %gcp.project_id,
        region = %gcp.region,
        bucket = %gcp.bucket_name,
        collection = %gcp.collection,
        token_source = tokens.describe(),
        "using gcp backend"
    );

    let object_store = GcsObjectStore::new(
        client.clone(),
        tokens.clone(),
        &gcp.storage_base_url,
        gcp.bucket_name.clone(),
    );
    let prediction_service = VertexPredictionService::new(
        client.clone(),
        tokens.clone(),
        &gcp.prediction_base_url,
        &gcp.project_id,
        &gcp.region,
        &gcp.endpoint_id,
    )?;
    let result_repo = FirestoreResultRepository::new(
        client,
        tokens,
        &gcp.firestore_base_url,
        &gcp.project_id,
        &gcp.firestore_database,
        gcp.collection.clone(),
    )?;

    Ok(Components {
        object_store: Arc::new(object_store),
        prediction_service: Arc::new(prediction_service),
        result_repo: Arc::new(result_repo),
    })
}

fn memory_components(fraud_flag: bool) -> Components {
    info!(fraud_flag, "using in-memory backend");
    Components {
        object_store: Arc::new(InMemoryObjectStore::new()),
        prediction_service: Arc::new(StaticPredictionService::new(fraud_flag)),
        result_repo: Arc::new(InMemoryResultRepository::new()),
    }
}
