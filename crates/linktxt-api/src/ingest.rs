//! Spreadsheet decoding.
//!
//! Turns an uploaded `.xlsx` workbook (first worksheet) or `.csv` file into
//! [`RowRecord`]s keyed by the header row. Fully blank rows are skipped and
//! every record remembers the sheet line it came from.

use std::io::Cursor;

use calamine::{Data, DataType, Reader, Xlsx, open_workbook_from_rs};
use linktxt_automation::domain::row::RowRecord;
use thiserror::Error;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Why an upload produced no rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    /// The bytes are not a readable workbook or CSV file.
    #[error("The file could not be read as a spreadsheet: {0}")]
    Unreadable(String),

    /// No header row, or no data rows below it.
    #[error("The spreadsheet is empty or has no valid header row.")]
    Empty,
}

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    /// Office Open XML workbook.
    Xlsx,
    /// Comma-separated values.
    Csv,
}

impl SheetFormat {
    /// Picks the format from the file name, falling back to the content.
    #[must_use]
    pub fn detect(file_name: Option<&str>, bytes: &[u8]) -> Self {
        let extension = file_name
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("csv") => Self::Csv,
            Some("xlsx" | "xlsm") => Self::Xlsx,
            _ if bytes.starts_with(ZIP_MAGIC) => Self::Xlsx,
            _ => Self::Csv,
        }
    }
}

/// Decodes an uploaded spreadsheet.
///
/// # Errors
///
/// Returns `IngestError::Unreadable` when the bytes cannot be parsed and
/// `IngestError::Empty` when there is no header or no non-blank data row.
pub fn read_records(file_name: Option<&str>, bytes: &[u8]) -> Result<Vec<RowRecord>, IngestError> {
    let rows = match SheetFormat::detect(file_name, bytes) {
        SheetFormat::Xlsx => xlsx_rows(bytes)?,
        SheetFormat::Csv => csv_rows(bytes)?,
    };
    records_from_rows(rows)
}

/// Cell text as shown to the automation. Whole numbers lose the `.0`, dates
/// become `YYYY-MM-DD`.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_date()
            .map_or_else(|| cell.to_string(), |date| date.to_string()),
        other => other.to_string(),
    }
}

/// `(sheet line, cells)` pairs of the first worksheet.
fn xlsx_rows(bytes: &[u8]) -> Result<Vec<(usize, Vec<String>)>, IngestError> {
    let mut workbook = open_workbook_from_rs::<Xlsx<_>, _>(Cursor::new(bytes))
        .map_err(|e| IngestError::Unreadable(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(IngestError::Empty)?
        .map_err(|e| IngestError::Unreadable(e.to_string()))?;

    // Ranges start at the first used cell, not necessarily at A1.
    let first_line = range.start().map_or(1, |(row, _)| row as usize + 1);
    Ok(range
        .rows()
        .enumerate()
        .map(|(offset, cells)| (first_line + offset, cells.iter().map(cell_text).collect()))
        .collect())
}

fn csv_rows(bytes: &[u8]) -> Result<Vec<(usize, Vec<String>)>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    reader
        .records()
        .enumerate()
        .map(|(index, record)| {
            let record = record.map_err(|e| IngestError::Unreadable(e.to_string()))?;
            Ok((index + 1, record.iter().map(str::to_owned).collect()))
        })
        .collect()
}

fn records_from_rows(rows: Vec<(usize, Vec<String>)>) -> Result<Vec<RowRecord>, IngestError> {
    let mut rows = rows
        .into_iter()
        .filter(|(_, cells)| cells.iter().any(|cell| !cell.trim().is_empty()));

    let (_, header) = rows.next().ok_or(IngestError::Empty)?;
    let header: Vec<String> = header.iter().map(|name| name.trim().to_owned()).collect();

    let records: Vec<RowRecord> = rows
        .map(|(line, cells)| {
            let pairs = header
                .iter()
                .zip(cells)
                .filter(|(name, _)| !name.is_empty())
                .map(|(name, cell)| (name.clone(), cell));
            RowRecord::new(line, pairs)
        })
        .collect();

    if records.is_empty() {
        return Err(IngestError::Empty);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

    use super::*;

    const HEADER: &str = "advertiserId,creativeName,campaignPeriod,targetUrl";
    const COLUMNS: [&str; 4] = ["advertiserId", "creativeName", "campaignPeriod", "targetUrl"];

    /// Header on `header_row` (0-based), then a row with numeric cells and a
    /// row with a date-formatted campaign period.
    fn workbook_bytes(header_row: u32) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        let date_format = Format::new().set_num_format("yyyy-mm-dd");

        for (col, name) in (0u16..).zip(COLUMNS) {
            sheet.write_string(header_row, col, name).unwrap();
        }
        sheet.write_number(header_row + 1, 0, 76829.0).unwrap();
        sheet.write_string(header_row + 1, 1, "Sale").unwrap();
        sheet.write_number(header_row + 1, 2, 2024.0).unwrap();
        sheet.write_string(header_row + 1, 3, "https://shop.example.com").unwrap();
        sheet.write_number(header_row + 2, 0, 12345.0).unwrap();
        sheet.write_string(header_row + 2, 1, "Winter").unwrap();
        sheet
            .write_datetime_with_format(
                header_row + 2,
                2,
                &ExcelDateTime::from_ymd(2024, 7, 1).unwrap(),
                &date_format,
            )
            .unwrap();
        sheet.write_string(header_row + 2, 3, "https://example.com").unwrap();

        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_xlsx_numeric_cells_are_rendered_without_fraction() {
        let records = read_records(Some("batch.xlsx"), &workbook_bytes(0)).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line(), 2);
        assert_eq!(records[0].get("advertiserId"), Some("76829"));
        assert_eq!(records[0].get("creativeName"), Some("Sale"));
        assert_eq!(records[0].get("campaignPeriod"), Some("2024"));
        assert_eq!(records[0].get("targetUrl"), Some("https://shop.example.com"));
    }

    #[test]
    fn test_xlsx_date_cells_are_rendered_as_iso_dates() {
        let records = read_records(Some("batch.xlsx"), &workbook_bytes(0)).unwrap();

        assert_eq!(records[1].line(), 3);
        assert_eq!(records[1].get("advertiserId"), Some("12345"));
        assert_eq!(records[1].get("campaignPeriod"), Some("2024-07-01"));
    }

    #[test]
    fn test_xlsx_lines_follow_the_sheet_when_header_is_not_on_first_row() {
        let records = read_records(Some("batch.xlsx"), &workbook_bytes(2)).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line(), 4);
        assert_eq!(records[1].line(), 5);
        assert_eq!(records[0].get("advertiserId"), Some("76829"));
    }

    #[test]
    fn test_xlsx_is_detected_without_file_name() {
        let records = read_records(None, &workbook_bytes(0)).unwrap();
        assert_eq!(records[0].get("creativeName"), Some("Sale"));
    }

    #[test]
    fn test_csv_rows_are_keyed_by_header_with_sheet_lines() {
        let csv = format!(
            "{HEADER}\n12345,Summer Sale,2024-Q3,https://example.com/promo\n76829,Winter,,https://shop.example.com\n"
        );

        let records = read_records(Some("batch.csv"), csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line(), 2);
        assert_eq!(records[0].get("advertiserId"), Some("12345"));
        assert_eq!(records[0].get("campaignPeriod"), Some("2024-Q3"));
        assert_eq!(records[1].line(), 3);
        assert_eq!(records[1].get("campaignPeriod"), None);
        assert_eq!(records[1].get("targetUrl"), Some("https://shop.example.com"));
    }

    #[test]
    fn test_blank_rows_are_skipped_but_lines_are_kept() {
        let csv = format!("{HEADER}\n,,,\n12345,Sale,,https://example.com\n");

        let records = read_records(Some("batch.csv"), csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].line(), 3);
    }

    #[test]
    fn test_short_rows_leave_trailing_columns_absent() {
        let csv = format!("{HEADER}\n12345,Sale\n");

        let records = read_records(Some("batch.csv"), csv.as_bytes()).unwrap();

        assert_eq!(records[0].get("creativeName"), Some("Sale"));
        assert_eq!(records[0].get("targetUrl"), None);
    }

    #[test]
    fn test_header_only_is_empty() {
        let result = read_records(Some("batch.csv"), format!("{HEADER}\n").as_bytes());
        assert_eq!(result, Err(IngestError::Empty));
    }

    #[test]
    fn test_no_content_is_empty() {
        assert_eq!(read_records(Some("batch.csv"), b""), Err(IngestError::Empty));
    }

    #[test]
    fn test_garbage_workbook_is_unreadable() {
        let result = read_records(Some("batch.xlsx"), b"definitely not a zip archive");
        assert!(matches!(result, Err(IngestError::Unreadable(_))));
    }

    #[test]
    fn test_detect_prefers_extension_then_zip_magic() {
        assert_eq!(SheetFormat::detect(Some("a.CSV"), ZIP_MAGIC), SheetFormat::Csv);
        assert_eq!(SheetFormat::detect(Some("a.xlsx"), b""), SheetFormat::Xlsx);
        assert_eq!(SheetFormat::detect(None, b"PK\x03\x04rest"), SheetFormat::Xlsx);
        assert_eq!(SheetFormat::detect(Some("upload"), b"a,b"), SheetFormat::Csv);
    }

    #[test]
    fn test_cell_text_drops_trailing_zero_fraction() {
        assert_eq!(cell_text(&Data::Float(12345.0)), "12345");
        assert_eq!(cell_text(&Data::Int(76829)), "76829");
        assert_eq!(cell_text(&Data::String("Sale".into())), "Sale");
        assert_eq!(cell_text(&Data::Empty), "");
    }
}
