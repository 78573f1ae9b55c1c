//! Batch runner: validates and processes rows in input order.

use linktxt_core::clock::Clock;
use linktxt_core::credential::Credential;
use linktxt_core::id::IdGenerator;
use linktxt_core::vendor::VendorApi;
use tracing::{info, instrument, warn};

use crate::application::row_processor::process_row;
use crate::domain::outcome::{BatchReport, RowFailure, RowResult};
use crate::domain::row::{CREATIVE_NAME_COLUMN, Row, RowRecord};

/// Processes `records` one at a time, in order.
///
/// Records missing required columns get a failure result without any vendor
/// call. A failing row never stops the batch.
#[instrument(skip_all, fields(rows = records.len()))]
pub async fn run_batch(
    records: &[RowRecord],
    credential: &Credential,
    vendor: &dyn VendorApi,
    ids: &dyn IdGenerator,
    clock: &dyn Clock,
) -> BatchReport {
    let started_at = clock.now();
    let mut results = Vec::with_capacity(records.len());

    for record in records {
        let result = match Row::from_record(record) {
            Ok(row) => process_row(record.line(), &row, credential, vendor, ids).await,
            Err(missing) => {
                warn!(row = record.line(), missing = ?missing.0, "row rejected");
                RowResult::failed(
                    record.line(),
                    record.get(CREATIVE_NAME_COLUMN),
                    &RowFailure::MissingRequiredField(missing.0),
                )
            }
        };
        results.push(result);
    }

    let report = BatchReport {
        results,
        started_at,
        finished_at: clock.now(),
    };
    info!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        "batch finished"
    );
    report
}
