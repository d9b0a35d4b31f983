use std::collections::HashMap;

use csv::{ReaderBuilder, StringRecord};
use serde_json::{Number, Value};

use crate::entities::{
    CsvRow, PredictionInstance, AMOUNT_COLUMN, DATE_COLUMN, LOCATION_COLUMN, TIME_COLUMN,
    TRANSACTION_ID_COLUMN,
};
use crate::errors::ParseError;
use crate::services::date_normalizer::normalize_date;

// Cell texts read as missing values.
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Integer,
    Float,
    Boolean,
    Text,
}

/// Parses CSV text (header row first) into typed rows.
///
/// Each column gets a single type from all of its cells: integers, floats
/// (integers with gaps become floats), booleans, or text. Missing cells are
/// `null`. A `Date` column, when present, is normalised to `YYYY-MM-DD` with
/// unparsable values set to `null`.
pub fn parse_csv(text: &str) -> Result<Vec<CsvRow>, ParseError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let raw_headers = reader.headers()?;
    if raw_headers.is_empty() || (raw_headers.len() == 1 && is_blank(raw_headers)) {
        return Err(ParseError::Empty);
    }
    let headers = column_names(raw_headers);

    let mut records: Vec<StringRecord> = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        if is_blank(&record) {
            continue;
        }
        if record.len() > headers.len() {
            return Err(ParseError::Csv(format!(
                "record {} has {} fields, header has {}",
                index + 1,
                record.len(),
                headers.len()
            )));
        }
        records.push(record);
    }

    let kinds = headers
        .iter()
        .enumerate()
        .map(|(column, name)| {
            if name == DATE_COLUMN {
                ColumnKind::Text
            } else {
                infer_column_kind(records.iter().map(|record| record.get(column).unwrap_or("")))
            }
        })
        .collect::<Vec<_>>();

    let rows = records
        .iter()
        .map(|record| {
            let mut row = CsvRow::new();
            for (column, name) in headers.iter().enumerate() {
                let raw = record.get(column).unwrap_or("");
                let value = if name == DATE_COLUMN {
                    date_cell(raw)
                } else {
                    typed_cell(raw, kinds[column])
                };
                row.insert(name.clone(), value);
            }
            row
        })
        .collect();
    Ok(rows)
}

/// Projects rows onto the five prediction fields. Any row lacking one of the
/// columns fails the whole batch.
pub fn build_instances(rows: &[CsvRow]) -> Result<Vec<PredictionInstance>, ParseError> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            Ok(PredictionInstance {
                transaction_id: required(row, index, TRANSACTION_ID_COLUMN)?.clone(),
                amount: amount_text(required(row, index, AMOUNT_COLUMN)?),
                date: required(row, index, DATE_COLUMN)?.clone(),
                time: required(row, index, TIME_COLUMN)?.clone(),
                location: required(row, index, LOCATION_COLUMN)?.clone(),
            })
        })
        .collect()
}

/// Text form of an `Amount` cell as sent to the model.
pub fn amount_text(value: &Value) -> String {
    match value {
        Value::Null => "nan".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn required<'a>(row: &'a CsvRow, index: usize, column: &str) -> Result<&'a Value, ParseError> {
    row.get(column).ok_or_else(|| ParseError::MissingColumn {
        row: index,
        column: column.to_string(),
    })
}

// Blank header cells become `Unnamed: {position}`; repeated names get
// `.1`, `.2`, ... suffixes.
fn column_names(record: &StringRecord) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    record
        .iter()
        .enumerate()
        .map(|(position, name)| {
            let name = if name.is_empty() {
                format!("Unnamed: {}", position)
            } else {
                name.to_string()
            };
            let count = seen.entry(name.clone()).or_insert(0);
            let unique = if *count == 0 {
                name
            } else {
                format!("{}.{}", name, count)
            };
            *count += 1;
            unique
        })
        .collect()
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

fn is_missing(raw: &str) -> bool {
    MISSING_MARKERS.contains(&raw.trim())
}

fn infer_column_kind<'a>(cells: impl Iterator<Item = &'a str>) -> ColumnKind {
    let mut has_missing = false;
    let mut all_integer = true;
    let mut all_float = true;
    let mut all_boolean = true;
    for cell in cells {
        if is_missing(cell) {
            has_missing = true;
            continue;
        }
        let trimmed = cell.trim();
        all_integer &= trimmed.parse::<i64>().is_ok();
        all_float &= parse_finite(trimmed).is_some();
        all_boolean &= parse_bool(trimmed).is_some();
    }
    if all_integer && !has_missing {
        ColumnKind::Integer
    } else if all_float {
        ColumnKind::Float
    } else if all_boolean {
        ColumnKind::Boolean
    } else {
        ColumnKind::Text
    }
}

fn typed_cell(raw: &str, kind: ColumnKind) -> Value {
    if is_missing(raw) {
        return Value::Null;
    }
    let trimmed = raw.trim();
    match kind {
        ColumnKind::Integer => trimmed
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::String(raw.to_string())),
        ColumnKind::Float => parse_finite(trimmed)
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(raw.to_string())),
        ColumnKind::Boolean => parse_bool(trimmed)
            .map(Value::Bool)
            .unwrap_or_else(|| Value::String(raw.to_string())),
        ColumnKind::Text => Value::String(raw.to_string()),
    }
}

fn date_cell(raw: &str) -> Value {
    normalize_date(raw).map(Value::String).unwrap_or(Value::Null)
}

fn parse_finite(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "True" | "TRUE" | "true" => Some(true),
        "False" | "FALSE" | "false" => Some(false),
        _ => None,
    }
}
