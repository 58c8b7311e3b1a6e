//! The filter/projection engine.
//!
//! This is the one piece of actual logic in the dashboard: a pure function
//! from (base dataset, filter selection) to the two chart-ready datasets.
//!
//! Design goals:
//! - **Strictly pure**: no side effects, no hidden state, idempotent
//! - **Never fails**: every well-typed selection is valid, including ones
//!   that match nothing (inverted date ranges, unknown products)
//! - **No aggregation**: duplicate `(date, product)` / `(region, product)`
//!   keys pass through untouched; visual grouping is the renderer's job
//! - **Order-preserving**: output order follows dataset order, so results
//!   are deterministic for a given dataset

use crate::domain::{FilterSelection, RegionBarDatum, SalesRecord, TimeSeriesPoint};

/// Filter the dataset by `selection` and project the survivors into the two
/// chart shapes.
///
/// A single linear pass over the dataset; each surviving record contributes
/// exactly one element to each output. An empty filtered set yields two
/// empty vectors.
pub fn compute(
    dataset: &[SalesRecord],
    selection: &FilterSelection,
) -> (Vec<TimeSeriesPoint>, Vec<RegionBarDatum>) {
    let mut series = Vec::new();
    let mut bars = Vec::new();

    for record in dataset.iter().filter(|r| selection.matches(r)) {
        series.push(TimeSeriesPoint {
            date: record.date,
            product: record.product.clone(),
            sales: record.sales,
        });
        bars.push(RegionBarDatum {
            region: record.region.clone(),
            product: record.product.clone(),
            sales: record.sales,
        });
    }

    (series, bars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn record(date: &str, product: &str, region: &str, sales: f64) -> SalesRecord {
        SalesRecord {
            date: date.parse().unwrap(),
            product: product.to_string(),
            region: region.to_string(),
            sales,
        }
    }

    fn two_record_dataset() -> Vec<SalesRecord> {
        vec![
            record("2024-01-01", "Widget", "East", 10.0),
            record("2024-01-02", "Gadget", "West", 20.0),
        ]
    }

    fn products(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_filters_covers_every_record_exactly_once() {
        let dataset = two_record_dataset();
        let (series, bars) = compute(&dataset, &FilterSelection::default());

        assert_eq!(series.len(), dataset.len());
        assert_eq!(bars.len(), dataset.len());
        for (point, rec) in series.iter().zip(&dataset) {
            assert_eq!(point.date, rec.date);
            assert_eq!(point.product, rec.product);
            assert_eq!(point.sales, rec.sales);
        }
        for (bar, rec) in bars.iter().zip(&dataset) {
            assert_eq!(bar.region, rec.region);
            assert_eq!(bar.product, rec.product);
            assert_eq!(bar.sales, rec.sales);
        }
    }

    #[test]
    fn product_filter_restricts_both_outputs() {
        let dataset = two_record_dataset();
        let sel = FilterSelection {
            products: products(&["Widget"]),
            ..Default::default()
        };
        let (series, bars) = compute(&dataset, &sel);

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].date, "2024-01-01".parse().unwrap());
        assert_eq!(series[0].product, "Widget");
        assert_eq!(series[0].sales, 10.0);

        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].region, "East");
        assert_eq!(bars[0].product, "Widget");
        assert_eq!(bars[0].sales, 10.0);
    }

    #[test]
    fn every_returned_product_is_in_the_selection() {
        let dataset = vec![
            record("2024-01-01", "Widget", "East", 10.0),
            record("2024-01-02", "Gadget", "West", 20.0),
            record("2024-01-03", "Widget", "West", 30.0),
            record("2024-01-04", "Doohickey", "East", 40.0),
        ];
        let sel = FilterSelection {
            products: products(&["Widget", "Gadget"]),
            ..Default::default()
        };
        let (series, bars) = compute(&dataset, &sel);

        assert_eq!(series.len(), 3);
        assert!(series.iter().all(|p| sel.products.contains(&p.product)));
        assert!(bars.iter().all(|b| sel.products.contains(&b.product)));
    }

    #[test]
    fn compute_is_idempotent() {
        let dataset = two_record_dataset();
        let sel = FilterSelection {
            regions: products(&["West"]),
            date_start: Some("2024-01-01".parse().unwrap()),
            date_end: Some("2024-01-02".parse().unwrap()),
            ..Default::default()
        };
        let first = compute(&dataset, &sel);
        let second = compute(&dataset, &sel);
        assert_eq!(first, second);
    }

    #[test]
    fn equal_date_bounds_keep_only_that_date() {
        let dataset = two_record_dataset();
        let day: chrono::NaiveDate = "2024-01-02".parse().unwrap();
        let sel = FilterSelection {
            date_start: Some(day),
            date_end: Some(day),
            ..Default::default()
        };
        let (series, bars) = compute(&dataset, &sel);

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].product, "Gadget");
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].region, "West");
    }

    #[test]
    fn inverted_date_bounds_yield_empty_outputs() {
        let dataset = two_record_dataset();
        let sel = FilterSelection {
            date_start: Some("2024-01-02".parse().unwrap()),
            date_end: Some("2024-01-01".parse().unwrap()),
            ..Default::default()
        };
        let (series, bars) = compute(&dataset, &sel);
        assert!(series.is_empty());
        assert!(bars.is_empty());
    }

    #[test]
    fn unknown_product_yields_empty_outputs_not_error() {
        let dataset = two_record_dataset();
        let sel = FilterSelection {
            products: products(&["NoSuchProduct"]),
            ..Default::default()
        };
        let (series, bars) = compute(&dataset, &sel);
        assert!(series.is_empty());
        assert!(bars.is_empty());
    }

    #[test]
    fn empty_dataset_yields_empty_outputs() {
        let (series, bars) = compute(&[], &FilterSelection::default());
        assert!(series.is_empty());
        assert!(bars.is_empty());
    }

    #[test]
    fn duplicate_keys_are_not_summed() {
        // Two records with the same (date, product) and (region, product)
        // keys must stay distinct in both projections.
        let dataset = vec![
            record("2024-01-01", "Widget", "East", 10.0),
            record("2024-01-01", "Widget", "East", 15.0),
        ];
        let (series, bars) = compute(&dataset, &FilterSelection::default());
        assert_eq!(series.len(), 2);
        assert_eq!(bars.len(), 2);
        assert_eq!(series[0].sales, 10.0);
        assert_eq!(series[1].sales, 15.0);
    }

    #[test]
    fn dataset_is_not_mutated() {
        let dataset = two_record_dataset();
        let before = dataset.clone();
        let _ = compute(&dataset, &FilterSelection::default());
        assert_eq!(dataset, before);
    }
}
