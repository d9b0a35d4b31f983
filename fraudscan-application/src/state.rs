use std::sync::Arc;

use fraudscan_domain::ports::{ObjectStore, PredictionService, ResultRepository};
use fraudscan_domain::RuntimeConfig;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub object_store: Arc<dyn ObjectStore>,
    pub prediction_service: Arc<dyn PredictionService>,
    pub result_repo: Arc<dyn ResultRepository>,
    pub metrics: Arc<Metrics>,
}
