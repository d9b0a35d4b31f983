use axum::extract::{Query, State};
use axum::response::Html;
use serde::Deserialize;

use fraudscan_application::queries::result_queries;
use fraudscan_application::AppState;

use crate::error::HttpError;
use crate::session::UploadSession;
use crate::views;

#[derive(Debug, Default, Deserialize)]
pub struct ResultsQuery {
    pub page: Option<String>,
}

/// GET /fetch_results?page=N
pub async fn fetch_results(
    State(state): State<AppState>,
    session: UploadSession,
    Query(query): Query<ResultsQuery>,
) -> Result<Html<String>, HttpError> {
    let page = result_queries::parse_page(query.page.as_deref());
    let last_uploaded_file = session.last_uploaded_file().await?;
    let results = result_queries::fetch_results(&state, last_uploaded_file, page).await?;
    Ok(Html(views::results_page(&results)))
}
