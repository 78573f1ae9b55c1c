//! Vendor API abstraction.
//!
//! Wire types for the creative-set and creative endpoints of the vendor
//! platform, plus the `VendorApi` trait the automation workflow is written
//! against. Field names follow the vendor's camelCase JSON.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::credential::Credential;
use crate::error::VendorError;

/// Opaque product (tracking) category identifier.
///
/// The vendor may send it as a string or a number; the raw JSON value is
/// kept so it is echoed back unchanged on create calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCategoryId(serde_json::Value);

impl ProductCategoryId {
    /// Returns `None` for values that carry no category: `null`, empty
    /// strings, zero, `false`.
    #[must_use]
    pub fn usable(self) -> Option<Self> {
        let blank = match &self.0 {
            serde_json::Value::Null => true,
            serde_json::Value::Bool(b) => !b,
            serde_json::Value::String(s) => s.trim().is_empty(),
            serde_json::Value::Number(n) => n.as_f64() == Some(0.0),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => false,
        };
        if blank { None } else { Some(self) }
    }
}

impl From<&str> for ProductCategoryId {
    fn from(value: &str) -> Self {
        Self(serde_json::Value::String(value.to_owned()))
    }
}

impl From<i64> for ProductCategoryId {
    fn from(value: i64) -> Self {
        Self(serde_json::Value::from(value))
    }
}

/// Filter for the list-creative-sets endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreativeSetQuery {
    /// Advertiser whose creative sets are listed.
    pub advertiser_id: String,
    /// When set, only direct children of this creative set are listed.
    pub parent_id: Option<Uuid>,
}

impl CreativeSetQuery {
    /// Lists the advertiser's creative sets.
    #[must_use]
    pub fn for_advertiser(advertiser_id: impl Into<String>) -> Self {
        Self {
            advertiser_id: advertiser_id.into(),
            parent_id: None,
        }
    }

    /// Lists the direct children of `parent_id`.
    #[must_use]
    pub fn children_of(advertiser_id: impl Into<String>, parent_id: Uuid) -> Self {
        Self {
            advertiser_id: advertiser_id.into(),
            parent_id: Some(parent_id),
        }
    }
}

/// One entry of the list-creative-sets response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeSetSummary {
    /// Creative set identifier.
    pub creative_set_id: Uuid,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// Detail record of a single creative set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeSetDetail {
    /// Creative set identifier.
    pub creative_set_id: Uuid,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Category the set was created with, if any.
    #[serde(default)]
    pub product_category_id: Option<ProductCategoryId>,
}

/// One entry of the find-tracking-categories response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingCategory {
    /// Category identifier.
    #[serde(default)]
    pub tracking_category_id: Option<ProductCategoryId>,
}

/// Body of the create-creative-set call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCreativeSet {
    /// Client-generated command identifier.
    pub command_id: Uuid,
    /// Client-generated identifier of the new set.
    pub creative_set_id: Uuid,
    /// Owning advertiser.
    pub advertiser_id: String,
    /// Parent set; absent for top-level folders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_creative_set_id: Option<Uuid>,
    /// Display name.
    pub name: String,
    /// Default target URL for creatives in this set.
    #[serde(rename = "defaultTargetURL")]
    pub default_target_url: String,
    /// Product category.
    pub product_category_id: ProductCategoryId,
}

/// Lifecycle status of a creative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreativeStatus {
    /// Creative is live.
    Active,
}

/// Body of the create-link-creative call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkCreative {
    /// Client-generated command identifier.
    pub command_id: Uuid,
    /// Client-generated identifier of the new creative.
    pub creative_id: Uuid,
    /// Set the creative is placed in.
    pub creative_set_id: Uuid,
    /// Display name.
    pub name: String,
    /// Link text content.
    pub content: String,
    /// Free-form note.
    pub description: String,
    /// Click-through URL.
    pub target_url: String,
    /// Initial status.
    pub status: CreativeStatus,
}

/// Account record behind a credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserInfo(pub serde_json::Value);

impl UserInfo {
    /// Best-effort human label for the account.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        ["login", "email", "name", "username"]
            .iter()
            .find_map(|key| self.0.get(key).and_then(serde_json::Value::as_str))
    }
}

/// The subset of the vendor API used by the automation workflow.
///
/// Implementations classify HTTP 401/403 as `VendorError::Unauthorized` and
/// any other unusable answer as `VendorError::Rejected`.
#[async_trait]
pub trait VendorApi: Send + Sync {
    /// Lists creative sets matching `query`.
    async fn list_creative_sets(
        &self,
        credential: &Credential,
        query: &CreativeSetQuery,
    ) -> Result<Vec<CreativeSetSummary>, VendorError>;

    /// Fetches one creative set's detail record.
    async fn get_creative_set(
        &self,
        credential: &Credential,
        creative_set_id: Uuid,
    ) -> Result<CreativeSetDetail, VendorError>;

    /// Creates a creative set (folder or subfolder).
    async fn create_creative_set(
        &self,
        credential: &Credential,
        command: &CreateCreativeSet,
    ) -> Result<(), VendorError>;

    /// Creates a link creative.
    async fn create_link_creative(
        &self,
        credential: &Credential,
        command: &CreateLinkCreative,
    ) -> Result<(), VendorError>;

    /// Returns the advertiser's tracking categories, default first.
    async fn find_tracking_categories(
        &self,
        credential: &Credential,
        advertiser_id: &str,
    ) -> Result<Vec<TrackingCategory>, VendorError>;

    /// Returns the account behind `credential`.
    async fn get_current_user(&self, credential: &Credential) -> Result<UserInfo, VendorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_category_id_usable_filters_blank_values() {
        assert!(ProductCategoryId::from("").usable().is_none());
        assert!(ProductCategoryId::from(0).usable().is_none());
        assert!(ProductCategoryId(serde_json::json!(0.0)).usable().is_none());
        assert!(ProductCategoryId(serde_json::json!(false)).usable().is_none());
        assert!(ProductCategoryId(serde_json::Value::Null).usable().is_none());
        assert_eq!(
            ProductCategoryId::from("cat-1").usable(),
            Some(ProductCategoryId::from("cat-1"))
        );
        assert!(ProductCategoryId::from(42).usable().is_some());
    }

    #[test]
    fn test_create_creative_set_serializes_vendor_field_names() {
        let command = CreateCreativeSet {
            command_id: Uuid::nil(),
            creative_set_id: Uuid::nil(),
            advertiser_id: "12345".to_owned(),
            parent_creative_set_id: None,
            name: "Link TXT".to_owned(),
            default_target_url: "https://example.com".to_owned(),
            product_category_id: ProductCategoryId::from(7),
        };

        let json = serde_json::to_value(&command).unwrap();

        assert_eq!(json["defaultTargetURL"], "https://example.com");
        assert_eq!(json["advertiserId"], "12345");
        assert_eq!(json["productCategoryId"], 7);
        assert!(json.get("parentCreativeSetId").is_none());
    }

    #[test]
    fn test_create_link_creative_serializes_active_status() {
        let command = CreateLinkCreative {
            command_id: Uuid::nil(),
            creative_id: Uuid::nil(),
            creative_set_id: Uuid::nil(),
            name: "LinkTXT - 1 - Sale".to_owned(),
            content: ".".to_owned(),
            description: "note".to_owned(),
            target_url: "https://example.com".to_owned(),
            status: CreativeStatus::Active,
        };

        let json = serde_json::to_value(&command).unwrap();

        assert_eq!(json["status"], "ACTIVE");
        assert_eq!(json["targetUrl"], "https://example.com");
        assert_eq!(json["creativeId"], Uuid::nil().to_string());
    }

    #[test]
    fn test_creative_set_detail_accepts_missing_category() {
        let detail: CreativeSetDetail = serde_json::from_value(serde_json::json!({
            "creativeSetId": Uuid::nil(),
            "name": "Link TXT"
        }))
        .unwrap();

        assert!(detail.product_category_id.is_none());
    }

    #[test]
    fn test_user_info_display_name_prefers_login() {
        let user = UserInfo(serde_json::json!({ "email": "a@b.pl", "login": "anna" }));
        assert_eq!(user.display_name(), Some("anna"));
        assert_eq!(UserInfo(serde_json::json!({})).display_name(), None);
    }
}
