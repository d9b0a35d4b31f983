use async_trait::async_trait;

use crate::entities::{PredictionInstance, PredictionResponse};
use crate::errors::PredictionError;

#[async_trait]
pub trait PredictionService: Send + Sync {
    /// One remote call covering every instance of an upload.
    async fn predict(
        &self,
        instances: &[PredictionInstance],
    ) -> Result<PredictionResponse, PredictionError>;
}
