use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::response::{Html, Redirect};
use tracing::{info, warn};

use fraudscan_application::commands::upload_commands;
use fraudscan_application::{AppError, AppState};

use crate::error::HttpError;
use crate::session::UploadSession;
use crate::views;

const FILE_FIELD: &str = "file";

pub async fn upload_form() -> Html<String> {
    Html(views::upload_form_page())
}

pub async fn results_button() -> Html<String> {
    Html(views::results_button_page())
}

/// POST /upload
///
/// Accepts the first `file` part carrying a filename, stores and scores it
/// before answering, then remembers the filename in the session.
pub async fn upload(
    State(state): State<AppState>,
    session: UploadSession,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Redirect, HttpError> {
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            warn!("upload without multipart body: {}", rejection.body_text());
            return Err(reject_missing_file(&state));
        }
    };

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => {
                warn!("upload multipart body unreadable: {}", err.body_text());
                break;
            }
        };
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(submitted) = field.file_name() else {
            continue;
        };

        let filename = upload_commands::accept_upload_filename(&state, Some(submitted))?;
        let bytes = field.bytes().await.map_err(|err| {
            warn!("failed to read upload '{}': {}", filename, err.body_text());
            HttpError::from(AppError::BadRequest(err.body_text()))
        })?;

        let outcome =
            upload_commands::upload_transactions(&state, &filename, bytes.to_vec()).await?;
        session.remember_upload(outcome.filename.as_str()).await?;
        info!(
            filename = %outcome.filename,
            rows = outcome.rows_written,
            fraud = outcome.fraud_flags,
            "upload processed"
        );
        return Ok(Redirect::to("/results_button"));
    }

    Err(reject_missing_file(&state))
}

fn reject_missing_file(state: &AppState) -> HttpError {
    match upload_commands::accept_upload_filename(state, None) {
        Ok(_) => HttpError::from(AppError::NoFileUploaded),
        Err(err) => HttpError::from(err),
    }
}
