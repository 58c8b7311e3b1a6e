//! Plotters-powered chart rendering.
//!
//! Why Plotters with the SVG backend instead of a browser-side JS library?
//! - chart logic stays in this crate and is unit testable
//! - the page script only swaps SVG markup, keeping the client trivial
//! - easy to extend later (PNG export, more chart kinds, annotations)
//!
//! Both charts encode product as color. Colors are assigned by the sorted
//! position of the product name, so the same product gets the same color in
//! the line chart and the bar chart for any given filtered dataset.

use std::collections::BTreeSet;

use plotters::style::{Palette, Palette99, PaletteColor};

pub mod bars;
pub mod line;

pub use bars::render_region_bars;
pub use line::render_time_series;

/// Rendered chart dimensions in pixels (SVG user units).
pub const CHART_WIDTH: u32 = 900;
pub const CHART_HEIGHT: u32 = 420;

/// Stable color for the product at sorted position `idx`.
pub(crate) fn product_color(idx: usize) -> PaletteColor<Palette99> {
    Palette99::pick(idx)
}

/// Sorted distinct values drawn from an iterator of names.
pub(crate) fn distinct_sorted<'a, I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let set: BTreeSet<&str> = names.into_iter().collect();
    set.into_iter().map(str::to_string).collect()
}
