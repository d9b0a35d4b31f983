use serde_json::{json, Map, Value};

use fraudscan_domain::ResultStoreError;

/// Encodes a JSON value as a Firestore REST `Value`.
pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(flag) => json!({ "booleanValue": flag }),
        Value::Number(number) => match number.as_i64() {
            Some(integer) => json!({ "integerValue": integer.to_string() }),
            None => json!({ "doubleValue": number.as_f64() }),
        },
        Value::String(text) => json!({ "stringValue": text }),
        Value::Array(items) => json!({
            "arrayValue": { "values": items.iter().map(encode_value).collect::<Vec<_>>() }
        }),
        Value::Object(fields) => json!({ "mapValue": { "fields": encode_fields(fields) } }),
    }
}

pub fn encode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(key, value)| (key.clone(), encode_value(value)))
        .collect()
}

/// Decodes a Firestore REST `Value` back to plain JSON. Timestamps and
/// references come back as strings.
pub fn decode_value(value: &Value) -> Result<Value, ResultStoreError> {
    let object = value
        .as_object()
        .ok_or_else(|| ResultStoreError::Decode(format!("expected typed value, got {}", value)))?;
    let (kind, inner) = object
        .iter()
        .next()
        .ok_or_else(|| ResultStoreError::Decode("empty typed value".to_string()))?;
    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => inner
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| decode_error(kind, inner)),
        "integerValue" => match inner {
            Value::String(text) => text
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| decode_error(kind, inner)),
            Value::Number(number) => Ok(Value::Number(number.clone())),
            _ => Err(decode_error(kind, inner)),
        },
        "doubleValue" => match inner {
            Value::Number(number) => Ok(Value::Number(number.clone())),
            // NaN and infinities arrive as strings
            Value::String(_) => Ok(Value::Null),
            _ => Err(decode_error(kind, inner)),
        },
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner
            .as_str()
            .map(|text| Value::String(text.to_string()))
            .ok_or_else(|| decode_error(kind, inner)),
        "arrayValue" => inner
            .get("values")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(decode_value).collect::<Result<Vec<_>, _>>())
            .unwrap_or_else(|| Ok(Vec::new()))
            .map(Value::Array),
        "mapValue" => match inner.get("fields").and_then(Value::as_object) {
            Some(fields) => decode_fields(fields).map(Value::Object),
            None => Ok(Value::Object(Map::new())),
        },
        "geoPointValue" => Ok(inner.clone()),
        _ => Err(decode_error(kind, inner)),
    }
}

pub fn decode_fields(fields: &Map<String, Value>) -> Result<Map<String, Value>, ResultStoreError> {
    fields
        .iter()
        .map(|(key, value)| Ok((key.clone(), decode_value(value)?)))
        .collect()
}

fn decode_error(kind: &str, inner: &Value) -> ResultStoreError {
    ResultStoreError::Decode(format!("invalid {}: {}", kind, inner))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_encode_to_typed_values() {
        assert_eq!(encode_value(&Value::Null), json!({ "nullValue": null }));
        assert_eq!(encode_value(&json!(true)), json!({ "booleanValue": true }));
        assert_eq!(encode_value(&json!(42)), json!({ "integerValue": "42" }));
        assert_eq!(encode_value(&json!(12.5)), json!({ "doubleValue": 12.5 }));
        assert_eq!(encode_value(&json!("Berlin")), json!({ "stringValue": "Berlin" }));
    }

    #[test]
    fn document_fields_survive_a_store_cycle() {
        let document = json!({
            "TransactionID": "T1",
            "Amount": 120.5,
            "Count": 3,
            "Date": null,
            "is_fraud": false,
            "tags": ["a", 1],
            "meta": { "source": "web" }
        });
        let fields = document.as_object().expect("object");
        let encoded = encode_fields(fields);
        assert_eq!(encoded["Count"], json!({ "integerValue": "3" }));
        assert_eq!(
            encoded["meta"],
            json!({ "mapValue": { "fields": { "source": { "stringValue": "web" } } } })
        );
        assert_eq!(decode_fields(&encoded).expect("decode"), *fields);
    }

    #[test]
    fn server_side_shapes_decode() {
        assert_eq!(
            decode_value(&json!({ "timestampValue": "2024-01-05T10:00:00Z" })).expect("ts"),
            json!("2024-01-05T10:00:00Z")
        );
        assert_eq!(decode_value(&json!({ "doubleValue": "NaN" })).expect("nan"), Value::Null);
        assert_eq!(decode_value(&json!({ "arrayValue": {} })).expect("array"), json!([]));
        assert_eq!(decode_value(&json!({ "mapValue": {} })).expect("map"), json!({}));
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(decode_value(&json!("plain")).is_err());
        assert!(decode_value(&json!({})).is_err());
        assert!(decode_value(&json!({ "integerValue": "twelve" })).is_err());
        assert!(decode_value(&json!({ "mysteryValue": 1 })).is_err());
    }
}
