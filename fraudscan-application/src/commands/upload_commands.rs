use serde::Serialize;
use tracing::{debug, error, info};

use crate::{AppError, AppState};
use fraudscan_domain::{
    align_fraud_flags, build_instances, parse_csv, PredictionResponse, StoredObject,
    TransactionRecord, UploadFilename,
};

pub const CSV_CONTENT_TYPE: &str = "text/csv";

#[derive(Debug, Clone, Serialize)]
pub struct UploadOutcome {
    pub filename: UploadFilename,
    pub stored: StoredObject,
    pub rows_written: usize,
    pub fraud_flags: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ProcessSummary {
    rows_written: usize,
    fraud_flags: usize,
}

/// Checks the submitted file part. `None` means no file part was sent.
pub fn accept_upload_filename(
    state: &AppState,
    submitted: Option<&str>,
) -> Result<UploadFilename, AppError> {
    let result = match submitted {
        None => Err(AppError::NoFileUploaded),
        Some(raw) => UploadFilename::parse(raw).map_err(AppError::from),
    };
    if result.is_err() {
        state.metrics.record_rejection();
    }
    result
}

/// Stores the raw upload, then processes it in the same request. A failure
/// after the blob write leaves the blob and any documents already appended.
pub async fn upload_transactions(
    state: &AppState,
    filename: &UploadFilename,
    bytes: Vec<u8>,
) -> Result<UploadOutcome, AppError> {
    let stored = state
        .object_store
        .put(filename.as_str(), bytes, CSV_CONTENT_TYPE)
        .await
        .map_err(|err| {
            error!("failed to store upload '{}': {}", filename, err);
            state.metrics.record_processing_error();
            AppError::from(err)
        })?;
    info!(
        filename = %filename,
        bucket = %stored.bucket,
        size = stored.size,
        "upload stored"
    );

    let summary = process_file(state, filename).await.map_err(|err| {
        error!("failed to process upload '{}': {}", filename, err);
        state.metrics.record_processing_error();
        err
    })?;
    state
        .metrics
        .record_upload(summary.rows_written, summary.fraud_flags);

    Ok(UploadOutcome {
        filename: filename.clone(),
        stored,
        rows_written: summary.rows_written,
        fraud_flags: summary.fraud_flags,
    })
}

async fn process_file(
    state: &AppState,
    filename: &UploadFilename,
) -> Result<ProcessSummary, AppError> {
    let text = state.object_store.get_text(filename.as_str()).await?;
    let rows = parse_csv(&text)?;
    let instances = build_instances(&rows)?;

    // Header-only files skip the model call instead of sending an empty batch.
    let response = if instances.is_empty() {
        PredictionResponse::default()
    } else {
        state.prediction_service.predict(&instances).await?
    };
    debug!(?response, "prediction response");
    info!(
        rows = rows.len(),
        predictions = response.len(),
        "prediction response received"
    );

    let flags = align_fraud_flags(&response, rows.len());
    let mut summary = ProcessSummary {
        rows_written: 0,
        fraud_flags: 0,
    };
    for (row, is_fraud) in rows.into_iter().zip(flags) {
        let record = TransactionRecord::new(row, filename.as_str(), is_fraud);
        state.result_repo.append(&record).await?;
        summary.rows_written += 1;
        if is_fraud {
            summary.fraud_flags += 1;
        }
    }

    info!(
        "processed file '{}' and stored {} results",
        filename, summary.rows_written
    );
    Ok(summary)
}
