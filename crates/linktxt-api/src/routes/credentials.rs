//! API key verification.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use linktxt_automation::application::credential_check::{CredentialStatus, verify_credential};
use linktxt_core::credential::Credential;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /verify-api-key.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyApiKeyRequest {
    /// The key to check.
    #[serde(default)]
    pub api_key: String,
}

/// Response body for an accepted key.
#[derive(Debug, Serialize)]
pub struct VerifyApiKeyResponse {
    /// Always `true`.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
    /// Account the key belongs to, when the vendor says.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
}

/// POST /verify-api-key
#[instrument(skip_all)]
async fn verify_api_key(
    State(state): State<AppState>,
    Json(request): Json<VerifyApiKeyRequest>,
) -> Result<Json<VerifyApiKeyResponse>, ApiError> {
    let credential = Credential::new(&request.api_key)?;

    match verify_credential(&credential, state.vendor.as_ref()).await? {
        CredentialStatus::Valid { account } => Ok(Json(VerifyApiKeyResponse {
            success: true,
            message: "The API key is valid.".to_owned(),
            account,
        })),
        CredentialStatus::Invalid => Err(ApiError::InvalidCredential),
    }
}

/// Returns the credential router.
pub fn router() -> Router<AppState> {
    Router::new().route("/verify-api-key", post(verify_api_key))
}
