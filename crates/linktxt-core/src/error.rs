//! Error types shared across the workspace.

use thiserror::Error;

/// Failure of a single vendor API call.
#[derive(Debug, Error)]
pub enum VendorError {
    /// The vendor answered 401 or 403: the key is invalid or lacks permission.
    #[error("vendor rejected the credential (HTTP {status})")]
    Unauthorized {
        /// HTTP status code (401 or 403).
        status: u16,
    },

    /// The vendor answered with a non-success status, or a success status
    /// whose body carries an `errors` member.
    #[error("vendor rejected the request (HTTP {status}): {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Raw response body for diagnostics.
        body: String,
    },

    /// The request never produced a response (DNS, TLS, connection, timeout).
    #[error("vendor request failed: {0}")]
    Transport(String),

    /// The response body did not have the expected shape.
    #[error("unexpected vendor response: {0}")]
    Decode(String),
}

impl VendorError {
    /// Whether this error means the credential was refused.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Classifies a non-success HTTP status. 401 and 403 collapse into
    /// `Unauthorized`; everything else becomes `Rejected`.
    #[must_use]
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => Self::Unauthorized { status },
            _ => Self::Rejected { status, body },
        }
    }
}

/// Invalid credential input.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// No API key was supplied.
    #[error("API key must not be blank")]
    Blank,
}
