use async_trait::async_trait;
use serde_json::json;

use fraudscan_domain::{
    PredictionError, PredictionInstance, PredictionResponse, PredictionService, IS_FRAUD_FIELD,
};

/// Prediction stand-in for the `memory` backend: every instance gets the
/// same flag.
pub struct StaticPredictionService {
    flag: bool,
}

impl StaticPredictionService {
    pub fn new(flag: bool) -> Self {
        Self { flag }
    }
}

#[async_trait]
impl PredictionService for StaticPredictionService {
    async fn predict(
        &self,
        instances: &[PredictionInstance],
    ) -> Result<PredictionResponse, PredictionError> {
        Ok(PredictionResponse::from_predictions(vec![
            json!({ IS_FRAUD_FIELD: self.flag });
            instances.len()
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fraudscan_domain::align_fraud_flags;
    use serde_json::Value;

    fn instance(id: &str) -> PredictionInstance {
        PredictionInstance {
            transaction_id: Value::from(id),
            amount: "1.0".to_string(),
            date: Value::Null,
            time: Value::from("10:00"),
            location: Value::from("Berlin"),
        }
    }

    #[tokio::test]
    async fn flags_every_instance_alike() {
        let service = StaticPredictionService::new(true);
        let response = service
            .predict(&[instance("T1"), instance("T2")])
            .await
            .expect("predict");
        assert_eq!(align_fraud_flags(&response, 2), vec![true, true]);
    }
}
