//! CSV ingest and normalization.
//!
//! This module turns the sales CSV into a clean, immutable `Vec<SalesRecord>`
//! that is safe to filter and chart.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Structural parsing only** (no business-rule validation; a negative
//!   sales figure is the data's problem, not ours)
//! - **Separation of concerns**: no filtering or chart logic here

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;

use crate::domain::{DatasetSummary, SalesRecord};
use crate::error::AppError;

const COL_DATE: &str = "date";
const COL_PRODUCT: &str = "product";
const COL_REGION: &str = "region";
const COL_SALES: &str = "sales";

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: normalized records + control-population summary + row errors.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub records: Vec<SalesRecord>,
    pub summary: DatasetSummary,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load and normalize the sales CSV at `path`.
///
/// Any failure here is fatal to startup: the server must not come up
/// without a dataset.
pub fn load_sales_csv(path: &Path) -> Result<IngestedData, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::Ingest(format!("Failed to open CSV '{}': {e}", path.display()))
    })?;
    read_sales_csv(file)
}

/// Parse sales records from any reader (file in production, string in tests).
pub fn read_sales_csv<R: Read>(input: R) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::Ingest(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map)?;

    let mut records = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &header_map) {
            Ok(rec) => records.push(rec),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    let rows_used = records.len();
    let summary = summarize(&records).ok_or_else(|| {
        AppError::NoData("No valid rows remain after parsing.".to_string())
    })?;

    Ok(IngestedData {
        records,
        summary,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header (e.g. "﻿Date"). If we don't strip it, schema validation
    // will incorrectly report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), AppError> {
    let missing: Vec<&str> = [COL_DATE, COL_PRODUCT, COL_REGION, COL_SALES]
        .into_iter()
        .filter(|col| !header_map.contains_key(*col))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Ingest(format!(
            "CSV is missing required column(s): {}",
            missing.join(", ")
        )))
    }
}

fn parse_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
) -> Result<SalesRecord, String> {
    let date_raw = field(record, header_map, COL_DATE)?;
    let product = field(record, header_map, COL_PRODUCT)?.to_string();
    let region = field(record, header_map, COL_REGION)?.to_string();
    let sales_raw = field(record, header_map, COL_SALES)?;

    let date = parse_date(date_raw).ok_or_else(|| format!("Invalid date '{date_raw}'"))?;

    if product.is_empty() {
        return Err("Empty product".to_string());
    }
    if region.is_empty() {
        return Err("Empty region".to_string());
    }

    let sales: f64 = sales_raw
        .parse()
        .map_err(|_| format!("Invalid sales value '{sales_raw}'"))?;
    if !sales.is_finite() {
        return Err(format!("Non-finite sales value '{sales_raw}'"));
    }

    Ok(SalesRecord {
        date,
        product,
        region,
        sales,
    })
}

fn field<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    col: &str,
) -> Result<&'a str, String> {
    let idx = *header_map
        .get(col)
        .ok_or_else(|| format!("Missing column '{col}'"))?;
    record
        .get(idx)
        .ok_or_else(|| format!("Row has no value for '{col}'"))
}

/// Parse an ISO-style date, tolerating a trailing time component.
///
/// Exports frequently write `2024-01-01 00:00:00` (or the `T` variant) into
/// date columns; the calendar-date prefix is all we need.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = raw.parse::<NaiveDate>() {
        return Some(date);
    }
    let prefix = raw.get(..10)?;
    prefix.parse::<NaiveDate>().ok()
}

/// Distinct products/regions + date span. `None` when `records` is empty.
fn summarize(records: &[SalesRecord]) -> Option<DatasetSummary> {
    let first = records.first()?;

    let mut products = BTreeSet::new();
    let mut regions = BTreeSet::new();
    let mut date_min = first.date;
    let mut date_max = first.date;

    for rec in records {
        products.insert(rec.product.clone());
        regions.insert(rec.region.clone());
        date_min = date_min.min(rec.date);
        date_max = date_max.max(rec.date);
    }

    Some(DatasetSummary {
        products: products.into_iter().collect(),
        regions: regions.into_iter().collect(),
        date_min,
        date_max,
        row_count: records.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_clean_csv() {
        let csv = "Date,Product,Region,Sales\n\
                   2024-01-01,Widget,East,10\n\
                   2024-01-02,Gadget,West,20.5\n";
        let data = read_sales_csv(csv.as_bytes()).unwrap();

        assert_eq!(data.rows_read, 2);
        assert_eq!(data.rows_used, 2);
        assert!(data.row_errors.is_empty());
        assert_eq!(data.records[0].product, "Widget");
        assert_eq!(data.records[1].sales, 20.5);

        assert_eq!(data.summary.products, vec!["Gadget", "Widget"]);
        assert_eq!(data.summary.regions, vec!["East", "West"]);
        assert_eq!(data.summary.date_min, "2024-01-01".parse().unwrap());
        assert_eq!(data.summary.date_max, "2024-01-02".parse().unwrap());
        assert_eq!(data.summary.row_count, 2);
    }

    #[test]
    fn headers_are_case_insensitive_and_bom_tolerant() {
        let csv = "\u{feff}DATE, product ,Region,SALES\n2024-03-05,Widget,North,7\n";
        let data = read_sales_csv(csv.as_bytes()).unwrap();
        assert_eq!(data.rows_used, 1);
        assert_eq!(data.records[0].region, "North");
    }

    #[test]
    fn datetime_suffix_in_date_column_is_accepted() {
        let csv = "Date,Product,Region,Sales\n2024-01-01 00:00:00,Widget,East,10\n";
        let data = read_sales_csv(csv.as_bytes()).unwrap();
        assert_eq!(data.records[0].date, "2024-01-01".parse().unwrap());
    }

    #[test]
    fn bad_rows_are_skipped_and_reported() {
        let csv = "Date,Product,Region,Sales\n\
                   2024-01-01,Widget,East,10\n\
                   not-a-date,Widget,East,10\n\
                   2024-01-03,Widget,East,lots\n\
                   2024-01-04,,East,10\n";
        let data = read_sales_csv(csv.as_bytes()).unwrap();

        assert_eq!(data.rows_read, 4);
        assert_eq!(data.rows_used, 1);
        assert_eq!(data.row_errors.len(), 3);
        // Line numbers are 1-based and account for the header row.
        assert_eq!(data.row_errors[0].line, 3);
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let csv = "Date,Product,Sales\n2024-01-01,Widget,10\n";
        let err = read_sales_csv(csv.as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("region"));
    }

    #[test]
    fn zero_valid_rows_is_fatal() {
        let csv = "Date,Product,Region,Sales\nnope,Widget,East,10\n";
        let err = read_sales_csv(csv.as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
