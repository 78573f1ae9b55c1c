//! Row and batch outcomes.

use std::fmt;

use chrono::{DateTime, Utc};
use linktxt_core::error::VendorError;
use serde::Serialize;
use thiserror::Error;

/// Where the product category for a new folder was looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySource {
    /// Detail record of the existing Link TXT folder.
    ExistingFolder,
    /// The advertiser's default tracking category.
    AdvertiserDefault,
}

impl fmt::Display for CategorySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExistingFolder => f.write_str("the existing Link TXT folder"),
            Self::AdvertiserDefault => f.write_str("the advertiser's default tracking category"),
        }
    }
}

/// Why a row was not turned into a creative.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowFailure {
    /// The row lacks required columns; no vendor call was made.
    #[error("missing required columns: {}", .0.join(", "))]
    MissingRequiredField(Vec<&'static str>),

    /// The vendor answered 401/403.
    #[error("the API key is invalid or lacks permission to create creatives")]
    UnauthorizedCredential,

    /// Listing the advertiser's folders returned no usable result.
    #[error("could not list the advertiser's creative sets")]
    FolderLookupFailed,

    /// No product category could be resolved.
    #[error("could not resolve the product category from {0}")]
    CategoryResolutionFailed(CategorySource),

    /// Creating the top-level Link TXT folder failed.
    #[error("could not create the Link TXT folder")]
    FolderCreationFailed,

    /// Listing the Link TXT folder's children returned no usable result.
    #[error("could not read existing subfolders to pick the next number")]
    SequenceLookupFailed,

    /// Creating the numbered subfolder failed.
    #[error("could not create subfolder \"{0}\"; check that the target URL is valid")]
    SubfolderCreationFailed(String),

    /// Creating the link creative failed. The subfolder stays in place.
    #[error("could not create creative \"{0}\"; check that the target URL is valid")]
    CreativeCreationFailed(String),

    /// Anything else: network failure, malformed response.
    #[error("unexpected error during automation: {0}")]
    UnexpectedError(String),
}

impl RowFailure {
    /// Maps a vendor error raised by a step. 401/403 always becomes
    /// `UnauthorizedCredential`, a rejected call becomes `step`, and transport
    /// or decode problems become `UnexpectedError`.
    #[must_use]
    pub fn from_vendor(err: &VendorError, step: Self) -> Self {
        match err {
            VendorError::Unauthorized { .. } => Self::UnauthorizedCredential,
            VendorError::Rejected { .. } => step,
            VendorError::Transport(_) | VendorError::Decode(_) => {
                Self::UnexpectedError(err.to_string())
            }
        }
    }

    /// Machine-readable code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingRequiredField(_) => "missing_required_field",
            Self::UnauthorizedCredential => "unauthorized_credential",
            Self::FolderLookupFailed => "folder_lookup_failed",
            Self::CategoryResolutionFailed(_) => "category_resolution_failed",
            Self::FolderCreationFailed => "folder_creation_failed",
            Self::SequenceLookupFailed => "sequence_lookup_failed",
            Self::SubfolderCreationFailed(_) => "subfolder_creation_failed",
            Self::CreativeCreationFailed(_) => "creative_creation_failed",
            Self::UnexpectedError(_) => "unexpected_error",
        }
    }
}

/// Result reported for one input row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowResult {
    /// Sheet line of the row.
    pub row: usize,
    /// Whether the creative was created.
    pub success: bool,
    /// Human-readable explanation.
    pub message: String,
    /// Failure code, absent on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

impl RowResult {
    /// A row whose creative was created.
    #[must_use]
    pub fn created(row: usize, creative_name: &str) -> Self {
        Self {
            row,
            success: true,
            message: format!("Creative \"{creative_name}\" was created successfully."),
            error: None,
        }
    }

    /// A failed row. The message names the creative when known, otherwise
    /// the sheet line.
    #[must_use]
    pub fn failed(row: usize, creative_name: Option<&str>, failure: &RowFailure) -> Self {
        let message = match creative_name {
            Some(name) => format!("Creative \"{name}\" (row {row}): {failure}."),
            None => format!("Row {row}: {failure}."),
        };
        Self {
            row,
            success: false,
            message,
            error: Some(failure.code()),
        }
    }
}

/// Outcome of a whole batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// One result per input row, in input order.
    pub results: Vec<RowResult>,
    /// When processing started.
    pub started_at: DateTime<Utc>,
    /// When the last row finished.
    pub finished_at: DateTime<Utc>,
}

impl BatchReport {
    /// Number of rows that produced a creative.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|result| result.success).count()
    }

    /// Number of rows that did not.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }
}
