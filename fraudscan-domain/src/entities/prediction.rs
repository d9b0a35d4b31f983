// Prediction request/response entities

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The field subset sent to the model endpoint for one row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionInstance {
    #[serde(rename = "TransactionID")]
    pub transaction_id: Value,
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "Date")]
    pub date: Value,
    #[serde(rename = "Time")]
    pub time: Value,
    #[serde(rename = "Location")]
    pub location: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResponse {
    #[serde(default)]
    pub predictions: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployed_model_id: Option<String>,
}

impl PredictionResponse {
    pub fn from_predictions(predictions: Vec<Value>) -> Self {
        Self {
            predictions: Some(predictions),
            deployed_model_id: None,
        }
    }

    pub fn len(&self) -> usize {
        self.predictions.as_ref().map(Vec::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
