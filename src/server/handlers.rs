//! Request handlers.
//!
//! The filter round trip mirrors the UI contract: every control change on
//! the page POSTs a fresh `FilterSelection` to `/api/charts`, the engine
//! recomputes both projections from the immutable base dataset, and the two
//! rendered SVGs go back for in-place swapping. No handler keeps state.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::Html;
use serde::Serialize;

use crate::chart;
use crate::domain::{DatasetSummary, FilterSelection};
use crate::engine;
use crate::error::AppError;

use super::AppState;

/// The interactive page, embedded at compile time.
const PAGE: &str = include_str!("page.html");

/// Response body for `POST /api/charts`.
#[derive(Debug, Serialize)]
pub struct ChartsResponse {
    /// "Sales Over Time" line chart as an SVG document.
    pub line_svg: String,
    /// "Sales by Region" grouped bar chart as an SVG document.
    pub bar_svg: String,
    /// Number of records that passed the filter (shown on the page).
    pub rows_matched: usize,
}

/// # GET /
pub async fn index() -> Html<&'static str> {
    Html(PAGE)
}

/// # GET /api/health
pub async fn health() -> &'static str {
    "OK"
}

/// # GET /api/meta
///
/// Control-population data: distinct products/regions and the dataset's
/// full date span (the date picker's default range).
pub async fn meta(State(state): State<Arc<AppState>>) -> Json<DatasetSummary> {
    Json(state.summary.clone())
}

/// # POST /api/charts
///
/// Accepts a `FilterSelection`, recomputes both chart datasets, renders
/// them to SVG. A selection matching nothing (including an inverted date
/// range) is not an error: it renders two empty charts.
pub async fn charts(
    State(state): State<Arc<AppState>>,
    Json(selection): Json<FilterSelection>,
) -> Result<Json<ChartsResponse>, AppError> {
    let (series, bars) = engine::compute(&state.records, &selection);
    let rows_matched = series.len();

    let line_svg = chart::render_time_series(&series)?;
    let bar_svg = chart::render_region_bars(&bars)?;

    Ok(Json(ChartsResponse {
        line_svg,
        bar_svg,
        rows_matched,
    }))
}
