use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Serialize;
use tracing::debug;

use fraudscan_domain::{PredictionError, PredictionInstance, PredictionResponse, PredictionService};

use crate::gcp::{send_json, AccessTokenProvider};
use crate::utils::trim_trailing_slash;

#[derive(Serialize)]
struct PredictRequest<'a> {
    instances: &'a [PredictionInstance],
}

/// Vertex AI online prediction endpoint.
pub struct VertexPredictionService {
    client: Client,
    tokens: Arc<AccessTokenProvider>,
    predict_url: Url,
}

impl VertexPredictionService {
    pub fn new(
        client: Client,
        tokens: Arc<AccessTokenProvider>,
        base_url: &str,
        project_id: &str,
        region: &str,
        endpoint_id: &str,
    ) -> Result<Self, PredictionError> {
        Ok(Self {
            client,
            tokens,
            predict_url: predict_url(base_url, project_id, region, endpoint_id)?,
        })
    }
}

/// `{base}/v1/projects/{project}/locations/{region}/endpoints/{endpoint}:predict`
pub fn predict_url(
    base_url: &str,
    project_id: &str,
    region: &str,
    endpoint_id: &str,
) -> Result<Url, PredictionError> {
    let base = trim_trailing_slash(base_url);
    let mut url =
        Url::parse(&base).map_err(|err| PredictionError::Transport(format!("{}: {}", base, err)))?;
    url.path_segments_mut()
        .map_err(|_| PredictionError::Transport(format!("invalid base url {}", base)))?
        .pop_if_empty()
        .extend(["v1", "projects", project_id, "locations", region, "endpoints"])
        .push(&format!("{}:predict", endpoint_id));
    Ok(url)
}

#[async_trait]
impl PredictionService for VertexPredictionService {
    async fn predict(
        &self,
        instances: &[PredictionInstance],
    ) -> Result<PredictionResponse, PredictionError> {
        let request = self
            .client
            .post(self.predict_url.clone())
            .json(&PredictRequest { instances });
        let response: PredictionResponse = send_json(&self.tokens, request).await?;
        debug!(
            instances = instances.len(),
            predictions = response.len(),
            model = response.deployed_model_id.as_deref().unwrap_or("unknown"),
            "prediction call finished"
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_tokens, RestServer};
    use serde_json::{json, Value};

    fn instance(id: &str) -> PredictionInstance {
        PredictionInstance {
            transaction_id: json!(id),
            amount: "120.5".to_string(),
            date: json!("2024-01-05"),
            time: json!("10:00"),
            location: json!("Berlin"),
        }
    }

    fn service(base_url: &str) -> VertexPredictionService {
        VertexPredictionService::new(
            Client::new(),
            test_tokens(),
            base_url,
            "demo-project",
            "us-central1",
            "1234567890",
        )
        .expect("service")
    }

    #[test]
    fn predict_url_targets_regional_endpoint() {
        let url = predict_url(
            "https://us-central1-aiplatform.googleapis.com/",
            "demo-project",
            "us-central1",
            "1234567890",
        )
        .expect("url");
        assert_eq!(
            url.as_str(),
            "https://us-central1-aiplatform.googleapis.com/v1/projects/demo-project/locations/us-central1/endpoints/1234567890:predict"
        );
    }

    #[test]
    fn request_wraps_instances() {
        let instances = vec![instance("T1")];
        let body = serde_json::to_value(PredictRequest { instances: &instances }).expect("encode");
        assert_eq!(body["instances"][0]["Amount"], json!("120.5"));
        assert_eq!(body["instances"][0]["TransactionID"], json!("T1"));
    }

    #[test]
    fn response_without_predictions_decodes() {
        let response: PredictionResponse =
            serde_json::from_value(json!({ "deployedModelId": "42" })).expect("decode");
        assert!(response.is_empty());
        let response: PredictionResponse =
            serde_json::from_value(json!({ "predictions": [true, 0, "1"] })).expect("decode");
        assert_eq!(response.predictions.as_ref().map(Vec::len), Some(3));
        assert_eq!(response.predictions.expect("some")[2], Value::from("1"));
    }

    #[tokio::test]
    async fn predict_posts_instances_to_endpoint() {
        let server = RestServer::start(vec![(
            200,
            r#"{"predictions":[{"is_fraud":true},{"is_fraud":false}],"deployedModelId":"42"}"#,
        )])
        .await;
        let instances = vec![instance("T1"), instance("T2")];
        let response = service(server.base_url())
            .predict(&instances)
            .await
            .expect("predict");
        assert_eq!(response.len(), 2);
        assert_eq!(response.deployed_model_id.as_deref(), Some("42"));

        let request = &server.requests()[0];
        assert_eq!(request.method, "POST");
        assert_eq!(
            request.path,
            "/v1/projects/demo-project/locations/us-central1/endpoints/1234567890:predict"
        );
        assert_eq!(request.authorization.as_deref(), Some("Bearer test-token"));
        let body = request.json();
        assert_eq!(body["instances"].as_array().map(Vec::len), Some(2));
        assert_eq!(body["instances"][1]["TransactionID"], json!("T2"));
        assert_eq!(body["instances"][0]["Amount"], json!("120.5"));
    }

    #[tokio::test]
    async fn endpoint_failures_map_to_prediction_errors() {
        let server = RestServer::start(vec![(401, "bad token"), (500, "model crashed")]).await;
        let service = service(server.base_url());
        let instances = vec![instance("T1")];

        let err = service.predict(&instances).await.expect_err("unauthorized");
        assert!(matches!(err, PredictionError::Unauthenticated(_)));
        match service.predict(&instances).await {
            Err(PredictionError::Status { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "model crashed");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
