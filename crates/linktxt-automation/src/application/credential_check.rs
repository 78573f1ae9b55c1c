//! Credential verification against the vendor.

use linktxt_core::credential::Credential;
use linktxt_core::error::VendorError;
use linktxt_core::vendor::VendorApi;
use tracing::{info, instrument, warn};

/// Result of probing the vendor with a credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialStatus {
    /// The vendor accepted the key.
    Valid {
        /// Account label, when the vendor reports one.
        account: Option<String>,
    },
    /// The vendor answered 401/403.
    Invalid,
}

/// Probes the vendor's current-user endpoint with `credential`.
///
/// # Errors
///
/// Returns the `VendorError` for any failure other than 401/403, which is
/// reported as `CredentialStatus::Invalid`.
#[instrument(skip_all)]
pub async fn verify_credential(
    credential: &Credential,
    vendor: &dyn VendorApi,
) -> Result<CredentialStatus, VendorError> {
    match vendor.get_current_user(credential).await {
        Ok(user) => {
            let account = user.display_name().map(str::to_owned);
            info!(account = ?account, "credential accepted");
            Ok(CredentialStatus::Valid { account })
        }
        Err(err) if err.is_unauthorized() => {
            warn!(error = %err, "credential refused");
            Ok(CredentialStatus::Invalid)
        }
        Err(err) => Err(err),
    }
}
