// Result page entities

use serde::Serialize;
use serde_json::{Map, Value};

use super::transaction::{
    AMOUNT_COLUMN, DATE_COLUMN, IS_FRAUD_FIELD, LOCATION_COLUMN, TIME_COLUMN,
    TRANSACTION_ID_COLUMN,
};

const MISSING: &str = "N/A";

/// Display tuple for one stored document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub transaction_id: String,
    pub amount: String,
    pub date: String,
    pub location: String,
    pub time: String,
    pub is_fraud: bool,
}

impl ResultRow {
    pub fn from_document(document: &Map<String, Value>) -> Self {
        Self {
            transaction_id: display_or(document.get(TRANSACTION_ID_COLUMN), MISSING),
            amount: display_or(document.get(AMOUNT_COLUMN), "0"),
            date: display_or(document.get(DATE_COLUMN), MISSING),
            location: display_or(document.get(LOCATION_COLUMN), MISSING),
            time: display_or(document.get(TIME_COLUMN), MISSING),
            is_fraud: document
                .get(IS_FRAUD_FIELD)
                .and_then(Value::as_bool)
                .unwrap_or(false),
        }
    }
}

fn display_or(value: Option<&Value>, fallback: &str) -> String {
    match value {
        None | Some(Value::Null) => fallback.to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsPage {
    pub filename: String,
    pub rows: Vec<ResultRow>,
    pub page: i64,
    pub per_page: u64,
    pub total_docs: u64,
    pub total_pages: u64,
}

impl ResultsPage {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        if self.page < 1 {
            return self.total_pages > 0;
        }
        (self.page as u64) < self.total_pages
    }

    pub fn previous_page(&self) -> i64 {
        self.page - 1
    }

    /// Out-of-range pages below 1 link forward to the first page.
    pub fn next_page(&self) -> i64 {
        if self.page < 1 {
            1
        } else {
            self.page + 1
        }
    }
}
