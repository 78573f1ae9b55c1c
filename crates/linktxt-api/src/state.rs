//! Shared application state.

use std::sync::Arc;

use linktxt_core::clock::Clock;
use linktxt_core::credential::Credential;
use linktxt_core::id::IdGenerator;
use linktxt_core::vendor::VendorApi;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Vendor API client.
    pub vendor: Arc<dyn VendorApi>,
    /// Source of client-side identifiers for create calls.
    pub ids: Arc<dyn IdGenerator>,
    /// Clock for batch timestamps.
    pub clock: Arc<dyn Clock>,
    /// Key used when an upload does not carry one.
    pub fallback_credential: Option<Credential>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        vendor: Arc<dyn VendorApi>,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
        fallback_credential: Option<Credential>,
    ) -> Self {
        Self {
            vendor,
            ids,
            clock,
            fallback_credential,
        }
    }
}
