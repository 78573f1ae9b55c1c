//! Test vendor: in-memory `VendorApi` implementation for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use linktxt_core::credential::Credential;
use linktxt_core::error::VendorError;
use linktxt_core::vendor::{
    CreateCreativeSet, CreateLinkCreative, CreativeSetDetail, CreativeSetQuery,
    CreativeSetSummary, ProductCategoryId, TrackingCategory, UserInfo, VendorApi,
};
use uuid::Uuid;

/// The vendor operations a `FakeVendorApi` can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VendorOperation {
    /// `list_creative_sets`
    ListCreativeSets,
    /// `get_creative_set`
    GetCreativeSet,
    /// `create_creative_set`
    CreateCreativeSet,
    /// `create_link_creative`
    CreateLinkCreative,
    /// `find_tracking_categories`
    FindTrackingCategories,
    /// `get_current_user`
    GetCurrentUser,
}

/// Failure injected for a `VendorOperation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeFailure {
    /// Answer with the given 401/403 status.
    Unauthorized(u16),
    /// Answer with the given non-success status.
    Rejected(u16),
    /// Fail before any response.
    Transport,
}

impl FakeFailure {
    fn to_error(&self) -> VendorError {
        match self {
            Self::Unauthorized(status) => VendorError::Unauthorized { status: *status },
            Self::Rejected(status) => VendorError::Rejected {
                status: *status,
                body: r#"{"errors":["rejected by fake"]}"#.to_owned(),
            },
            Self::Transport => VendorError::Transport("connection refused".to_owned()),
        }
    }
}

/// Every call the fake received, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    /// `list_creative_sets`
    ListCreativeSets(CreativeSetQuery),
    /// `get_creative_set`
    GetCreativeSet(Uuid),
    /// `create_creative_set`
    CreateCreativeSet(CreateCreativeSet),
    /// `create_link_creative`
    CreateLinkCreative(CreateLinkCreative),
    /// `find_tracking_categories`
    FindTrackingCategories(String),
    /// `get_current_user`
    GetCurrentUser,
}

impl RecordedCall {
    /// The operation this call was made to.
    #[must_use]
    pub fn operation(&self) -> VendorOperation {
        match self {
            Self::ListCreativeSets(_) => VendorOperation::ListCreativeSets,
            Self::GetCreativeSet(_) => VendorOperation::GetCreativeSet,
            Self::CreateCreativeSet(_) => VendorOperation::CreateCreativeSet,
            Self::CreateLinkCreative(_) => VendorOperation::CreateLinkCreative,
            Self::FindTrackingCategories(_) => VendorOperation::FindTrackingCategories,
            Self::GetCurrentUser => VendorOperation::GetCurrentUser,
        }
    }
}

/// A creative set held by the fake.
#[derive(Debug, Clone, PartialEq)]
pub struct FakeCreativeSet {
    /// Identifier.
    pub id: Uuid,
    /// Owning advertiser.
    pub advertiser_id: String,
    /// Display name.
    pub name: String,
    /// Parent set, if nested.
    pub parent_id: Option<Uuid>,
    /// Category reported by the detail endpoint.
    pub product_category_id: Option<ProductCategoryId>,
}

#[derive(Debug, Default)]
struct FakeState {
    sets: Vec<FakeCreativeSet>,
    creatives: Vec<CreateLinkCreative>,
    categories: HashMap<String, Vec<TrackingCategory>>,
    /// Failure per operation, with the number of calls still allowed to
    /// succeed before it applies.
    failures: HashMap<VendorOperation, (FakeFailure, usize)>,
    calls: Vec<RecordedCall>,
}

/// An in-memory vendor. Created creative sets become visible to later list
/// calls, like the real vendor. Listing without a parent returns top-level
/// sets only.
#[derive(Debug, Default)]
pub struct FakeVendorApi {
    state: Mutex<FakeState>,
}

impl FakeVendorApi {
    /// Create an empty vendor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `category` as the advertiser's default tracking category.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_default_category(self, advertiser_id: &str, category: &str) -> Self {
        self.state.lock().unwrap().categories.insert(
            advertiser_id.to_owned(),
            vec![TrackingCategory {
                tracking_category_id: Some(ProductCategoryId::from(category)),
            }],
        );
        self
    }

    /// Make every call of `operation` fail with `failure`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn failing_on(self, operation: VendorOperation, failure: FakeFailure) -> Self {
        self.failing_after(operation, 0, failure)
    }

    /// Let the first `successes` calls of `operation` through, then fail
    /// every later one with `failure`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn failing_after(
        self,
        operation: VendorOperation,
        successes: usize,
        failure: FakeFailure,
    ) -> Self {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert(operation, (failure, successes));
        self
    }

    /// Seed an existing creative set and return its id.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn add_creative_set(
        &self,
        advertiser_id: &str,
        name: &str,
        parent_id: Option<Uuid>,
        product_category_id: Option<&str>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.state.lock().unwrap().sets.push(FakeCreativeSet {
            id,
            advertiser_id: advertiser_id.to_owned(),
            name: name.to_owned(),
            parent_id,
            product_category_id: product_category_id.map(ProductCategoryId::from),
        });
        id
    }

    /// Returns a snapshot of all received calls.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Returns all creative sets, seeded and created.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn creative_sets(&self) -> Vec<FakeCreativeSet> {
        self.state.lock().unwrap().sets.clone()
    }

    /// Returns every creative created so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn creatives(&self) -> Vec<CreateLinkCreative> {
        self.state.lock().unwrap().creatives.clone()
    }

    fn begin(
        &self,
        operation: VendorOperation,
        call: RecordedCall,
    ) -> Result<std::sync::MutexGuard<'_, FakeState>, VendorError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if let Some((failure, successes)) = state.failures.get_mut(&operation) {
            if *successes == 0 {
                return Err(failure.to_error());
            }
            *successes -= 1;
        }
        Ok(state)
    }
}

#[async_trait]
impl VendorApi for FakeVendorApi {
    async fn list_creative_sets(
        &self,
        _credential: &Credential,
        query: &CreativeSetQuery,
    ) -> Result<Vec<CreativeSetSummary>, VendorError> {
        let state = self.begin(
            VendorOperation::ListCreativeSets,
            RecordedCall::ListCreativeSets(query.clone()),
        )?;
        Ok(state
            .sets
            .iter()
            .filter(|set| set.advertiser_id == query.advertiser_id)
            .filter(|set| set.parent_id == query.parent_id)
            .map(|set| CreativeSetSummary {
                creative_set_id: set.id,
                name: set.name.clone(),
            })
            .collect())
    }

    async fn get_creative_set(
        &self,
        _credential: &Credential,
        creative_set_id: Uuid,
    ) -> Result<CreativeSetDetail, VendorError> {
        let state = self.begin(
            VendorOperation::GetCreativeSet,
            RecordedCall::GetCreativeSet(creative_set_id),
        )?;
        state
            .sets
            .iter()
            .find(|set| set.id == creative_set_id)
            .map(|set| CreativeSetDetail {
                creative_set_id: set.id,
                name: set.name.clone(),
                product_category_id: set.product_category_id.clone(),
            })
            .ok_or_else(|| VendorError::Rejected {
                status: 404,
                body: "creative set not found".to_owned(),
            })
    }

    async fn create_creative_set(
        &self,
        _credential: &Credential,
        command: &CreateCreativeSet,
    ) -> Result<(), VendorError> {
        let mut state = self.begin(
            VendorOperation::CreateCreativeSet,
            RecordedCall::CreateCreativeSet(command.clone()),
        )?;
        state.sets.push(FakeCreativeSet {
            id: command.creative_set_id,
            advertiser_id: command.advertiser_id.clone(),
            name: command.name.clone(),
            parent_id: command.parent_creative_set_id,
            product_category_id: Some(command.product_category_id.clone()),
        });
        Ok(())
    }

    async fn create_link_creative(
        &self,
        _credential: &Credential,
        command: &CreateLinkCreative,
    ) -> Result<(), VendorError> {
        let mut state = self.begin(
            VendorOperation::CreateLinkCreative,
            RecordedCall::CreateLinkCreative(command.clone()),
        )?;
        state.creatives.push(command.clone());
        Ok(())
    }

    async fn find_tracking_categories(
        &self,
        _credential: &Credential,
        advertiser_id: &str,
    ) -> Result<Vec<TrackingCategory>, VendorError> {
        let state = self.begin(
            VendorOperation::FindTrackingCategories,
            RecordedCall::FindTrackingCategories(advertiser_id.to_owned()),
        )?;
        Ok(state
            .categories
            .get(advertiser_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_current_user(&self, _credential: &Credential) -> Result<UserInfo, VendorError> {
        let _state = self.begin(VendorOperation::GetCurrentUser, RecordedCall::GetCurrentUser)?;
        Ok(UserInfo(serde_json::json!({ "login": "fake-user" })))
    }
}
