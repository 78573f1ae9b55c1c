//! Row processor: one spreadsheet row to one link creative.
//!
//! The workflow issues its vendor calls strictly in sequence, since every
//! call depends on the previous one:
//!
//! 1. normalize the target URL,
//! 2. find the advertiser's Link TXT folder, or create it,
//! 3. read the folder's children to pick the next number,
//! 4. create the numbered subfolder,
//! 5. create the link creative inside it.
//!
//! The first failure ends the row. Nothing is rolled back: a subfolder whose
//! creative could not be created stays on the vendor side.
//!
//! A rejected folder or subfolder listing fails the row instead of being read
//! as "no Link TXT folder" or "no numbered subfolders", so a vendor hiccup
//! can neither duplicate the folder nor reuse a number.

use linktxt_core::credential::Credential;
use linktxt_core::error::VendorError;
use linktxt_core::id::IdGenerator;
use linktxt_core::vendor::{
    CreateCreativeSet, CreateLinkCreative, CreativeSetQuery, CreativeStatus, ProductCategoryId,
    VendorApi,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::domain::naming::{self, LINK_TXT_FOLDER_NAME};
use crate::domain::outcome::{CategorySource, RowFailure, RowResult};
use crate::domain::row::Row;
use crate::domain::target_url::normalize_target_url;

/// The folder numbered subfolders are created under.
#[derive(Debug, Clone, PartialEq)]
struct ParentFolder {
    id: Uuid,
    product_category_id: ProductCategoryId,
}

/// Returns a closure that logs a failed vendor call and maps it to the
/// failure for `step`.
fn step_failed(step: RowFailure) -> impl FnOnce(VendorError) -> RowFailure {
    move |err| {
        warn!(error = %err, step = step.code(), "vendor call failed");
        RowFailure::from_vendor(&err, step)
    }
}

/// Processes one validated row against the vendor.
///
/// `row_number` is the sheet line used in the result message. Every failure
/// is converted into a failed `RowResult`; this function does not return
/// errors.
#[instrument(
    skip_all,
    fields(row = row_number, advertiser_id = %row.advertiser_id, creative_name = %row.creative_name)
)]
pub async fn process_row(
    row_number: usize,
    row: &Row,
    credential: &Credential,
    vendor: &dyn VendorApi,
    ids: &dyn IdGenerator,
) -> RowResult {
    match run_workflow(row, credential, vendor, ids).await {
        Ok(creative_name) => {
            info!(creative = %creative_name, "creative created");
            RowResult::created(row_number, &creative_name)
        }
        Err(failure) => {
            warn!(error = %failure, "row failed");
            RowResult::failed(row_number, Some(&row.creative_name), &failure)
        }
    }
}

async fn run_workflow(
    row: &Row,
    credential: &Credential,
    vendor: &dyn VendorApi,
    ids: &dyn IdGenerator,
) -> Result<String, RowFailure> {
    let target_url = normalize_target_url(&row.advertiser_id, &row.target_url);

    let parent = resolve_parent_folder(row, &target_url, credential, vendor, ids).await?;

    let children = vendor
        .list_creative_sets(
            credential,
            &CreativeSetQuery::children_of(row.advertiser_id.as_str(), parent.id),
        )
        .await
        .map_err(step_failed(RowFailure::SequenceLookupFailed))?;
    let number = naming::next_sequence_number(children.iter().map(|set| set.name.as_str()));

    let subfolder_name = naming::subfolder_name(
        number,
        &row.creative_name,
        row.campaign_period.as_deref(),
    );
    let subfolder = CreateCreativeSet {
        command_id: ids.next_id(),
        creative_set_id: ids.next_id(),
        advertiser_id: row.advertiser_id.clone(),
        parent_creative_set_id: Some(parent.id),
        name: subfolder_name.clone(),
        default_target_url: target_url.clone(),
        product_category_id: parent.product_category_id,
    };
    vendor
        .create_creative_set(credential, &subfolder)
        .await
        .map_err(step_failed(RowFailure::SubfolderCreationFailed(
            subfolder_name.clone(),
        )))?;
    info!(subfolder = %subfolder_name, id = %subfolder.creative_set_id, "subfolder created");

    let creative_name = naming::creative_name(&subfolder_name);
    let creative = CreateLinkCreative {
        command_id: ids.next_id(),
        creative_id: ids.next_id(),
        creative_set_id: subfolder.creative_set_id,
        name: creative_name.clone(),
        content: naming::CREATIVE_CONTENT.to_owned(),
        description: naming::CREATIVE_DESCRIPTION.to_owned(),
        target_url,
        status: CreativeStatus::Active,
    };
    vendor
        .create_link_creative(credential, &creative)
        .await
        .map_err(step_failed(RowFailure::CreativeCreationFailed(
            creative_name.clone(),
        )))?;

    Ok(creative_name)
}

/// Finds the advertiser's Link TXT folder and its category, creating the
/// folder when none exists.
async fn resolve_parent_folder(
    row: &Row,
    target_url: &str,
    credential: &Credential,
    vendor: &dyn VendorApi,
    ids: &dyn IdGenerator,
) -> Result<ParentFolder, RowFailure> {
    let sets = vendor
        .list_creative_sets(
            credential,
            &CreativeSetQuery::for_advertiser(row.advertiser_id.as_str()),
        )
        .await
        .map_err(step_failed(RowFailure::FolderLookupFailed))?;

    if let Some(existing) = sets.into_iter().find(|set| naming::is_link_folder(&set.name)) {
        let missing_category = RowFailure::CategoryResolutionFailed(CategorySource::ExistingFolder);
        let detail = vendor
            .get_creative_set(credential, existing.creative_set_id)
            .await
            .map_err(step_failed(missing_category.clone()))?;
        let product_category_id = detail
            .product_category_id
            .and_then(ProductCategoryId::usable)
            .ok_or(missing_category)?;
        info!(folder = %existing.name, id = %existing.creative_set_id, "reusing Link TXT folder");
        return Ok(ParentFolder {
            id: existing.creative_set_id,
            product_category_id,
        });
    }

    let missing_category = RowFailure::CategoryResolutionFailed(CategorySource::AdvertiserDefault);
    let categories = vendor
        .find_tracking_categories(credential, &row.advertiser_id)
        .await
        .map_err(step_failed(missing_category.clone()))?;
    let product_category_id = categories
        .into_iter()
        .next()
        .and_then(|category| category.tracking_category_id)
        .and_then(ProductCategoryId::usable)
        .ok_or(missing_category)?;

    let folder = CreateCreativeSet {
        command_id: ids.next_id(),
        creative_set_id: ids.next_id(),
        advertiser_id: row.advertiser_id.clone(),
        parent_creative_set_id: None,
        name: LINK_TXT_FOLDER_NAME.to_owned(),
        default_target_url: target_url.to_owned(),
        product_category_id,
    };
    vendor
        .create_creative_set(credential, &folder)
        .await
        .map_err(step_failed(RowFailure::FolderCreationFailed))?;
    info!(id = %folder.creative_set_id, "Link TXT folder created");

    Ok(ParentFolder {
        id: folder.creative_set_id,
        product_category_id: folder.product_category_id,
    })
}
