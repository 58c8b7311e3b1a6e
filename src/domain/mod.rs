//! Domain types used throughout the dashboard.
//!
//! This module defines:
//!
//! - the immutable base dataset rows (`SalesRecord`)
//! - the user's filter state (`FilterSelection`)
//! - chart-ready projections (`TimeSeriesPoint`, `RegionBarDatum`)
//! - the control-population summary (`DatasetSummary`)

pub mod types;

pub use types::*;
