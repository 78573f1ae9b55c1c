//! Folder and creative naming rules.

use std::sync::LazyLock;

use regex::Regex;

/// Name of the top-level folder created per advertiser.
pub const LINK_TXT_FOLDER_NAME: &str = "Link TXT";

/// Prefix of every creative name.
pub const CREATIVE_NAME_PREFIX: &str = "LinkTXT";

/// Content of every link creative.
pub const CREATIVE_CONTENT: &str = ".";

/// Note attached to every link creative.
pub const CREATIVE_DESCRIPTION: &str = "Created automatically by the Link TXT batch creator";

static LINK_FOLDER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)link").expect("valid regex"));

static LEADING_NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)").expect("valid regex"));

/// Whether a top-level folder counts as the advertiser's Link TXT folder.
#[must_use]
pub fn is_link_folder(name: &str) -> bool {
    LINK_FOLDER_PATTERN.is_match(name)
}

/// The run of ASCII digits a name starts with. Runs too long for `u64` are
/// ignored.
#[must_use]
pub fn leading_number(name: &str) -> Option<u64> {
    LEADING_NUMBER_PATTERN
        .captures(name)
        .and_then(|caps| caps[1].parse().ok())
}

/// Highest leading number among `names`, plus one. Starts at 1.
#[must_use]
pub fn next_sequence_number<'a>(names: impl IntoIterator<Item = &'a str>) -> u64 {
    names
        .into_iter()
        .filter_map(leading_number)
        .max()
        .unwrap_or(0)
        .saturating_add(1)
}

/// `"{n} - {creative}"`, or `"{n} - {creative} - {period}"` when a period is
/// given.
#[must_use]
pub fn subfolder_name(number: u64, creative_name: &str, campaign_period: Option<&str>) -> String {
    match campaign_period.filter(|period| !period.is_empty()) {
        Some(period) => format!("{number} - {creative_name} - {period}"),
        None => format!("{number} - {creative_name}"),
    }
}

/// Name of the creative placed in `subfolder_name`.
#[must_use]
pub fn creative_name(subfolder_name: &str) -> String {
    format!("{CREATIVE_NAME_PREFIX} - {subfolder_name}")
}
