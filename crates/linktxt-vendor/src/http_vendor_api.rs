//! HTTP implementation of the `VendorApi` trait.
//!
//! Wraps the vendor's creative-set, creative, partnership and access
//! endpoints using [`reqwest`]. Every request carries the caller's key in the
//! `x-api-key` header. Calls are never retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use uuid::Uuid;

use linktxt_core::credential::Credential;
use linktxt_core::error::VendorError;
use linktxt_core::vendor::{
    CreateCreativeSet, CreateLinkCreative, CreativeSetDetail, CreativeSetQuery,
    CreativeSetSummary, TrackingCategory, UserInfo, VendorApi,
};

/// Production base URL of the vendor API.
pub const DEFAULT_BASE_URL: &str = "https://api.system.netsalesmedia.pl";

const API_KEY_HEADER: &str = "x-api-key";

const LIST_SETS_PATH: &str = "/creatives/creativeset/list";
const GET_SINGLE_SET_PATH: &str = "/creatives/creativeset/single";
const CREATE_SET_PATH: &str = "/creatives/creativeset/create";
const CREATE_LINK_CREATIVE_PATH: &str = "/creatives/creative/link/create";
const FIND_TRACKING_CATEGORIES_PATH: &str = "/partnerships/advertiser/findTrackingCategories";
const CURRENT_USER_PATH: &str = "/access/user/get";

/// Connection settings for [`HttpVendorApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorConfig {
    /// Base URL, e.g. `https://api.system.netsalesmedia.pl`.
    pub base_url: String,
    /// Optional per-request timeout. `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

impl Default for VendorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
        }
    }
}

/// Response of the find-tracking-categories endpoint.
#[derive(Debug, Deserialize)]
struct TrackingCategoryPage {
    #[serde(default)]
    entries: Vec<TrackingCategory>,
}

/// HTTP client for the vendor API.
#[derive(Debug, Clone)]
pub struct HttpVendorApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpVendorApi {
    /// Create a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns `VendorError::Transport` if the underlying HTTP client cannot
    /// be built (e.g. TLS backend initialization fails).
    pub fn new(config: &VendorConfig) -> Result<Self, VendorError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| VendorError::Transport(e.to_string()))?;
        Ok(Self::with_client(client, &config.base_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sends the request and returns the body of a usable response.
    async fn send(
        request: reqwest::RequestBuilder,
        credential: &Credential,
    ) -> Result<String, VendorError> {
        let response = request
            .header(API_KEY_HEADER, credential.expose())
            .send()
            .await
            .map_err(|e| VendorError::Transport(e.to_string()))?;

        let status = response.status();
        let url = response.url().path().to_owned();
        let body = response
            .text()
            .await
            .map_err(|e| VendorError::Transport(e.to_string()))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), path = %url, body = %body, "vendor returned an error status");
            return Err(VendorError::from_status(status.as_u16(), body));
        }
        debug!(status = status.as_u16(), path = %url, "vendor call succeeded");
        reject_error_body(status.as_u16(), body)
    }

    async fn send_json<T: DeserializeOwned>(
        request: reqwest::RequestBuilder,
        credential: &Credential,
    ) -> Result<T, VendorError> {
        let body = Self::send(request, credential).await?;
        serde_json::from_str(&body).map_err(|e| VendorError::Decode(e.to_string()))
    }
}

/// A 2xx body carrying a non-null `errors` member is a rejection.
fn reject_error_body(status: u16, body: String) -> Result<String, VendorError> {
    let has_errors = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| value.get("errors").cloned())
        .is_some_and(|errors| !errors.is_null());
    if has_errors {
        warn!(status, body = %body, "vendor reported errors in a success response");
        return Err(VendorError::Rejected { status, body });
    }
    Ok(body)
}

/// Query parameters of the list-creative-sets call.
fn list_params(query: &CreativeSetQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![("advertiserId", query.advertiser_id.clone())];
    if let Some(parent_id) = query.parent_id {
        params.push(("creativeSetId", parent_id.to_string()));
    }
    params
}

/// Filter expression sent to the tracking-category search.
fn tracking_category_filter(advertiser_id: &str) -> String {
    format!("advertiser.id = '{advertiser_id}'")
}

#[async_trait]
impl VendorApi for HttpVendorApi {
    async fn list_creative_sets(
        &self,
        credential: &Credential,
        query: &CreativeSetQuery,
    ) -> Result<Vec<CreativeSetSummary>, VendorError> {
        let request = self
            .client
            .get(self.url(LIST_SETS_PATH))
            .query(&list_params(query));
        Self::send_json(request, credential).await
    }

    async fn get_creative_set(
        &self,
        credential: &Credential,
        creative_set_id: Uuid,
    ) -> Result<CreativeSetDetail, VendorError> {
        let request = self
            .client
            .get(self.url(GET_SINGLE_SET_PATH))
            .query(&[("creativeSetId", creative_set_id.to_string())]);
        Self::send_json(request, credential).await
    }

    async fn create_creative_set(
        &self,
        credential: &Credential,
        command: &CreateCreativeSet,
    ) -> Result<(), VendorError> {
        let request = self.client.post(self.url(CREATE_SET_PATH)).json(command);
        Self::send(request, credential).await?;
        Ok(())
    }

    async fn create_link_creative(
        &self,
        credential: &Credential,
        command: &CreateLinkCreative,
    ) -> Result<(), VendorError> {
        let request = self
            .client
            .post(self.url(CREATE_LINK_CREATIVE_PATH))
            .json(command);
        Self::send(request, credential).await?;
        Ok(())
    }

    async fn find_tracking_categories(
        &self,
        credential: &Credential,
        advertiser_id: &str,
    ) -> Result<Vec<TrackingCategory>, VendorError> {
        let request = self
            .client
            .post(self.url(FIND_TRACKING_CATEGORIES_PATH))
            .header(CONTENT_TYPE, "text/plain")
            .body(tracking_category_filter(advertiser_id));
        let page: TrackingCategoryPage = Self::send_json(request, credential).await?;
        Ok(page.entries)
    }

    async fn get_current_user(&self, credential: &Credential) -> Result<UserInfo, VendorError> {
        let request = self.client.get(self.url(CURRENT_USER_PATH));
        Self::send_json(request, credential).await
    }
}
