use tracing::error;

use crate::{AppError, AppState};
use fraudscan_domain::{page_offset, total_pages, ResultRow, ResultsPage};

const DEFAULT_PAGE: i64 = 1;

/// Reads the `page` query value; absent or non-integer input means page 1.
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .unwrap_or(DEFAULT_PAGE)
}

/// One window of documents for the session's last upload plus the page count.
/// Pages below 1 or past the end yield an empty window.
pub async fn fetch_results(
    state: &AppState,
    last_uploaded_file: Option<String>,
    page: i64,
) -> Result<ResultsPage, AppError> {
    let filename = last_uploaded_file
        .filter(|name| !name.is_empty())
        .ok_or(AppError::NoRecentUploads)?;
    let per_page = state.config.page_size;
    state.metrics.record_result_query();

    let documents = match page_offset(page, per_page) {
        Some(offset) => state
            .result_repo
            .query(&filename, offset, per_page)
            .await
            .map_err(|err| {
                error!("failed to fetch results for '{}': {}", filename, err);
                AppError::from(err)
            })?,
        None => Vec::new(),
    };

    let total_docs = state.result_repo.count(&filename).await.map_err(|err| {
        error!("failed to count results for '{}': {}", filename, err);
        AppError::from(err)
    })?;

    Ok(ResultsPage {
        rows: documents.iter().map(ResultRow::from_document).collect(),
        filename,
        page,
        per_page,
        total_docs,
        total_pages: total_pages(total_docs, per_page),
    })
}
