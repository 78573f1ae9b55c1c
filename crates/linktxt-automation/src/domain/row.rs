//! Input rows.

use std::collections::HashMap;

/// Column holding the advertiser id.
pub const ADVERTISER_ID_COLUMN: &str = "advertiserId";
/// Column holding the creative name.
pub const CREATIVE_NAME_COLUMN: &str = "creativeName";
/// Optional column holding the campaign period.
pub const CAMPAIGN_PERIOD_COLUMN: &str = "campaignPeriod";
/// Column holding the target URL.
pub const TARGET_URL_COLUMN: &str = "targetUrl";

const REQUIRED_COLUMNS: [&str; 3] = [ADVERTISER_ID_COLUMN, CREATIVE_NAME_COLUMN, TARGET_URL_COLUMN];

/// One undecoded spreadsheet row: header name to cell text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowRecord {
    line: usize,
    cells: HashMap<String, String>,
}

impl RowRecord {
    /// Create a record for sheet line `line` (1-based, header included).
    pub fn new<K, V>(line: usize, cells: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            line,
            cells: cells
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// The sheet line this record came from.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Trimmed cell text, `None` when absent or blank.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .get(column)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }
}

/// Required columns absent from a record, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFields(pub Vec<&'static str>);

/// A validated row, ready for the automation workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Vendor advertiser id.
    pub advertiser_id: String,
    /// Creative name used in folder and creative names.
    pub creative_name: String,
    /// Optional campaign period appended to the subfolder name.
    pub campaign_period: Option<String>,
    /// Click-through URL as given in the sheet.
    pub target_url: String,
}

impl Row {
    /// Validates a record.
    ///
    /// # Errors
    ///
    /// Returns `MissingFields` listing every required column that is absent
    /// or blank.
    pub fn from_record(record: &RowRecord) -> Result<Self, MissingFields> {
        let missing: Vec<&'static str> = REQUIRED_COLUMNS
            .into_iter()
            .filter(|column| record.get(column).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(MissingFields(missing));
        }

        let text = |column: &str| record.get(column).unwrap_or_default().to_owned();
        Ok(Self {
            advertiser_id: text(ADVERTISER_ID_COLUMN),
            creative_name: text(CREATIVE_NAME_COLUMN),
            campaign_period: record.get(CAMPAIGN_PERIOD_COLUMN).map(str::to_owned),
            target_url: text(TARGET_URL_COLUMN),
        })
    }
}
