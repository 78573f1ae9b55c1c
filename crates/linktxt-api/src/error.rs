//! Link TXT API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use linktxt_core::error::{CredentialError, VendorError};
use serde::Serialize;
use thiserror::Error;

use crate::ingest::IngestError;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The vendor client could not be built.
    #[error("vendor client error: {0}")]
    Vendor(#[from] VendorError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Always `false`.
    pub success: bool,
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// Request-level failures. Row failures never end up here; they are part of
/// a successful batch response.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No usable API key in the request and none configured.
    #[error("An API key is required.")]
    MissingCredential,

    /// The vendor refused the API key.
    #[error("The API key is invalid or lacks the required permissions.")]
    InvalidCredential,

    /// The upload carried no spreadsheet.
    #[error("No file was uploaded.")]
    MissingFile,

    /// The multipart body could not be read.
    #[error("The upload could not be read: {0}")]
    BadUpload(String),

    /// The spreadsheet could not be turned into rows.
    #[error("{0}")]
    Ingest(#[from] IngestError),

    /// The vendor could not be asked.
    #[error("The vendor API did not answer usefully: {0}")]
    Vendor(VendorError),
}

impl From<CredentialError> for ApiError {
    fn from(_: CredentialError) -> Self {
        Self::MissingCredential
    }
}

impl From<VendorError> for ApiError {
    fn from(err: VendorError) -> Self {
        if err.is_unauthorized() {
            Self::InvalidCredential
        } else {
            Self::Vendor(err)
        }
    }
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::MissingCredential => (StatusCode::BAD_REQUEST, "missing_api_key"),
            Self::InvalidCredential => (StatusCode::UNAUTHORIZED, "invalid_api_key"),
            Self::MissingFile => (StatusCode::BAD_REQUEST, "missing_file"),
            Self::BadUpload(_) => (StatusCode::BAD_REQUEST, "invalid_upload"),
            Self::Ingest(IngestError::Unreadable(_)) => {
                (StatusCode::BAD_REQUEST, "unreadable_spreadsheet")
            }
            Self::Ingest(IngestError::Empty) => (StatusCode::BAD_REQUEST, "empty_spreadsheet"),
            Self::Vendor(_) => (StatusCode::BAD_GATEWAY, "vendor_unavailable"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();

        let body = ErrorBody {
            success: false,
            error: error_code,
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
