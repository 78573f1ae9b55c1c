//! Target URL normalization.

/// Advertiser whose links get tracking parameters appended.
pub const UTM_ADVERTISER_ID: &str = "76829";

/// Tracking parameters appended for `UTM_ADVERTISER_ID`. The
/// `#{PARTNER_ID}` placeholder is expanded by the vendor.
pub const UTM_PARAMETERS: &str =
    "utm_source=pp&utm_medium=cps&utm_campaign=SalesMedia&utm_content=#{PARTNER_ID}";

/// Returns the URL used for folder and creative creation.
#[must_use]
pub fn normalize_target_url(advertiser_id: &str, target_url: &str) -> String {
    if advertiser_id != UTM_ADVERTISER_ID {
        return target_url.to_owned();
    }
    let separator = if target_url.contains('?') { '&' } else { '?' };
    format!("{target_url}{separator}{UTM_PARAMETERS}")
}
