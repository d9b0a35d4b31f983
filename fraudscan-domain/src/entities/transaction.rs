// Transaction entity
// One parsed CSV row, and the enriched document written per row

use serde_json::{Map, Value};

pub const TRANSACTION_ID_COLUMN: &str = "TransactionID";
pub const AMOUNT_COLUMN: &str = "Amount";
pub const DATE_COLUMN: &str = "Date";
pub const TIME_COLUMN: &str = "Time";
pub const LOCATION_COLUMN: &str = "Location";
pub const FILENAME_FIELD: &str = "filename";
pub const IS_FRAUD_FIELD: &str = "is_fraud";

/// Column name to typed cell value for one CSV data row.
pub type CsvRow = Map<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub filename: String,
    pub is_fraud: bool,
    pub columns: CsvRow,
}

impl TransactionRecord {
    pub fn new(columns: CsvRow, filename: impl Into<String>, is_fraud: bool) -> Self {
        Self {
            filename: filename.into(),
            is_fraud,
            columns,
        }
    }

    /// Flattens the record into the document shape stored per row: every CSV
    /// column plus `filename` and `is_fraud`, the latter two taking precedence
    /// over same-named columns.
    pub fn to_document(&self) -> Map<String, Value> {
        let mut document = self.columns.clone();
        document.insert(FILENAME_FIELD.to_string(), Value::String(self.filename.clone()));
        document.insert(IS_FRAUD_FIELD.to_string(), Value::Bool(self.is_fraud));
        document
    }
}
