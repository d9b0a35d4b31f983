use serde_json::Value;

use crate::entities::{PredictionResponse, IS_FRAUD_FIELD};

/// Reads one fraud flag per input row, by position. Row `i` takes
/// `predictions[i].is_fraud`; anything absent or unreadable is `false`.
/// Instance identity is not checked, so a reordering endpoint misaligns rows.
pub fn align_fraud_flags(response: &PredictionResponse, row_count: usize) -> Vec<bool> {
    let predictions = response.predictions.as_deref().unwrap_or(&[]);
    (0..row_count)
        .map(|index| {
            predictions
                .get(index)
                .and_then(|prediction| prediction.get(IS_FRAUD_FIELD))
                .map(flag_value)
                .unwrap_or(false)
        })
        .collect()
}

fn flag_value(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number
            .as_i64()
            .map(|n| n != 0)
            .or_else(|| number.as_f64().map(|n| n != 0.0))
            .unwrap_or(false),
        Value::String(text) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes"
        ),
        _ => false,
    }
}
