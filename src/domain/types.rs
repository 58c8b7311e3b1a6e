//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - held in-memory as the immutable base dataset
//! - sent over the wire between the page and the API handlers
//! - constructed literally in tests

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the base dataset.
///
/// Loaded once at startup and never mutated afterwards. `sales` is assumed
/// non-negative by the charts but this is not enforced beyond structural
/// parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub product: String,
    pub region: String,
    pub sales: f64,
}

/// The filter state chosen by the user at a point in time.
///
/// Constructed fresh on every control change; never stored server-side.
///
/// Conventions:
/// - an empty `products`/`regions` set means "no constraint" (all values)
/// - the date predicate applies only when **both** bounds are present
/// - `date_start > date_end` is a valid selection that matches nothing,
///   never an error
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default)]
    pub products: BTreeSet<String>,
    #[serde(default)]
    pub regions: BTreeSet<String>,
    #[serde(default)]
    pub date_start: Option<NaiveDate>,
    #[serde(default)]
    pub date_end: Option<NaiveDate>,
}

impl FilterSelection {
    /// True when the record passes every active predicate.
    ///
    /// The predicates are conjunctive, so evaluation order does not affect
    /// the result.
    pub fn matches(&self, record: &SalesRecord) -> bool {
        if !self.products.is_empty() && !self.products.contains(&record.product) {
            return false;
        }
        if !self.regions.is_empty() && !self.regions.contains(&record.region) {
            return false;
        }
        if let (Some(start), Some(end)) = (self.date_start, self.date_end) {
            if record.date < start || record.date > end {
                return false;
            }
        }
        true
    }
}

/// One point of the sales-over-time chart.
///
/// One per filtered record, unaggregated: duplicate `(date, product)` pairs
/// are deliberately kept distinct and left to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub product: String,
    pub sales: f64,
}

/// One datum of the sales-by-region grouped bar chart.
///
/// Same granularity as `TimeSeriesPoint`: one per filtered record, no
/// summation across duplicate `(region, product)` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionBarDatum {
    pub region: String,
    pub product: String,
    pub sales: f64,
}

/// Summary of the loaded dataset, used to populate the UI controls.
///
/// `products` and `regions` are the distinct values present in the data,
/// sorted; the date span is the default range for the date picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub products: Vec<String>,
    pub regions: Vec<String>,
    pub date_min: NaiveDate,
    pub date_max: NaiveDate,
    pub row_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, product: &str, region: &str, sales: f64) -> SalesRecord {
        SalesRecord {
            date: date.parse().unwrap(),
            product: product.to_string(),
            region: region.to_string(),
            sales,
        }
    }

    #[test]
    fn empty_selection_matches_everything() {
        let sel = FilterSelection::default();
        assert!(sel.matches(&record("2024-01-01", "Widget", "East", 10.0)));
        assert!(sel.matches(&record("1999-12-31", "Anything", "Nowhere", 0.0)));
    }

    #[test]
    fn single_date_bound_is_ignored() {
        let sel = FilterSelection {
            date_start: Some("2024-06-01".parse().unwrap()),
            ..Default::default()
        };
        // Only one bound present: the date predicate is skipped entirely.
        assert!(sel.matches(&record("2024-01-01", "Widget", "East", 10.0)));
    }

    #[test]
    fn inverted_date_range_matches_nothing() {
        let sel = FilterSelection {
            date_start: Some("2024-02-01".parse().unwrap()),
            date_end: Some("2024-01-01".parse().unwrap()),
            ..Default::default()
        };
        assert!(!sel.matches(&record("2024-01-15", "Widget", "East", 10.0)));
    }

    #[test]
    fn selection_deserializes_from_partial_json() {
        let sel: FilterSelection =
            serde_json::from_str(r#"{"products": ["Widget"]}"#).unwrap();
        assert!(sel.products.contains("Widget"));
        assert!(sel.regions.is_empty());
        assert_eq!(sel.date_start, None);
        assert_eq!(sel.date_end, None);
    }
}
