use fraudscan_domain::{
    FilenameRejection, ObjectStoreError, ParseError, PredictionError, ResultStoreError,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("No file uploaded")]
    NoFileUploaded,
    #[error("No selected file")]
    NoSelectedFile,
    #[error("Invalid file type")]
    InvalidFileType,
    #[error("No recent uploads found.")]
    NoRecentUploads,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    ObjectStore(#[from] ObjectStoreError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Prediction(#[from] PredictionError),
    #[error(transparent)]
    ResultStore(#[from] ResultStoreError),
}

impl From<FilenameRejection> for AppError {
    fn from(value: FilenameRejection) -> Self {
        match value {
            FilenameRejection::Empty => AppError::NoSelectedFile,
            FilenameRejection::NotCsv => AppError::InvalidFileType,
        }
    }
}
