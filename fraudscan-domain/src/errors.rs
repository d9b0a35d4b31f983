// Error types returned by each component port

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObjectStoreError {
    #[error("object '{0}' not found")]
    NotFound(String),
    #[error("object store authentication failed: {0}")]
    Unauthenticated(String),
    #[error("object store responded {status}: {body}")]
    Status { status: u16, body: String },
    #[error("object store request failed: {0}")]
    Transport(String),
    #[error("object store payload invalid: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("csv input is empty")]
    Empty,
    #[error("csv parse failed: {0}")]
    Csv(String),
    #[error("row {row} is missing column '{column}'")]
    MissingColumn { row: usize, column: String },
}

impl From<csv::Error> for ParseError {
    fn from(err: csv::Error) -> Self {
        ParseError::Csv(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("prediction authentication failed: {0}")]
    Unauthenticated(String),
    #[error("prediction endpoint responded {status}: {body}")]
    Status { status: u16, body: String },
    #[error("prediction request failed: {0}")]
    Transport(String),
    #[error("prediction response invalid: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum ResultStoreError {
    #[error("result store authentication failed: {0}")]
    Unauthenticated(String),
    #[error("result store responded {status}: {body}")]
    Status { status: u16, body: String },
    #[error("result store request failed: {0}")]
    Transport(String),
    #[error("result store payload invalid: {0}")]
    Decode(String),
}
