//! Spreadsheet upload and batch processing.

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::{Json, Router, routing::post};
use linktxt_automation::application::batch_runner::run_batch;
use linktxt_automation::domain::outcome::RowResult;
use linktxt_core::credential::Credential;
use serde::Serialize;
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::ingest;
use crate::state::AppState;

/// Multipart field carrying the spreadsheet.
pub const FILE_FIELD: &str = "xlsxFile";
/// Alternative name accepted for the spreadsheet field.
pub const FILE_FIELD_ALIAS: &str = "file";
/// Multipart field carrying the API key.
pub const API_KEY_FIELD: &str = "apiKey";

/// Response body for POST /upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// `true` once every row has a result, whatever the row outcomes.
    pub success: bool,
    /// Human-readable summary.
    pub message: &'static str,
    /// One entry per data row, in sheet order.
    pub results: Vec<RowResult>,
    /// Rows that produced a creative.
    pub succeeded: usize,
    /// Rows that did not.
    pub failed: usize,
}

#[derive(Debug)]
struct UploadedFile {
    name: Option<String>,
    bytes: Bytes,
}

#[derive(Debug, Default)]
struct UploadForm {
    file: Option<UploadedFile>,
    api_key: Option<String>,
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadUpload(e.to_string()))?
    {
        let field_name = field.name().map(str::to_owned);
        match field_name.as_deref() {
            Some(FILE_FIELD | FILE_FIELD_ALIAS) => {
                let name = field.file_name().map(str::to_owned);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadUpload(e.to_string()))?;
                form.file = Some(UploadedFile { name, bytes });
            }
            Some(API_KEY_FIELD) => {
                let key = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadUpload(e.to_string()))?;
                form.api_key = Some(key);
            }
            _ => {}
        }
    }

    Ok(form)
}

/// The request's own key wins; a blank or absent one falls back to the
/// configured key.
fn resolve_credential(
    supplied: Option<&str>,
    fallback: Option<&Credential>,
) -> Result<Credential, ApiError> {
    match supplied.map(Credential::new) {
        Some(Ok(credential)) => Ok(credential),
        _ => fallback.cloned().ok_or(ApiError::MissingCredential),
    }
}

/// POST /upload
#[instrument(skip_all)]
async fn upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let form = read_form(multipart).await?;

    let credential =
        resolve_credential(form.api_key.as_deref(), state.fallback_credential.as_ref())?;
    let file = form.file.ok_or(ApiError::MissingFile)?;
    let records = ingest::read_records(file.name.as_deref(), &file.bytes)?;

    info!(file = ?file.name, rows = records.len(), "processing upload");

    let report = run_batch(
        &records,
        &credential,
        state.vendor.as_ref(),
        state.ids.as_ref(),
        state.clock.as_ref(),
    )
    .await;

    Ok(Json(UploadResponse {
        success: true,
        message: "Processing finished.",
        succeeded: report.succeeded(),
        failed: report.failed(),
        results: report.results,
    }))
}

/// Returns the upload router.
pub fn router() -> Router<AppState> {
    Router::new().route("/upload", post(upload))
}
