//! The "Sales by Region" grouped bar chart.
//!
//! Regions are laid out along the x axis; within each region slot one bar is
//! drawn per distinct product, side by side (grouped, not stacked). Bars are
//! not aggregated: duplicate (region, product) pairs each draw their own bar
//! in the same sub-slot and simply overdraw.

use plotters::prelude::*;

use crate::domain::RegionBarDatum;
use crate::error::AppError;

use super::{CHART_HEIGHT, CHART_WIDTH, distinct_sorted, product_color};

/// Fraction of each region slot occupied by bars (the rest is gutter).
const GROUP_FILL: f64 = 0.8;

/// Render the grouped bar chart to an SVG document.
///
/// An empty `data` slice renders an empty (but valid) chart frame rather
/// than failing.
pub fn render_region_bars(data: &[RegionBarDatum]) -> Result<String, AppError> {
    let mut svg = String::new();
    draw(&mut svg, data).map_err(|e| AppError::Chart(e.to_string()))?;
    Ok(svg)
}

fn draw(svg: &mut String, data: &[RegionBarDatum]) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::with_string(svg, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let regions = distinct_sorted(data.iter().map(|d| d.region.as_str()));
    let products = distinct_sorted(data.iter().map(|d| d.product.as_str()));

    let x_max = regions.len().max(1) as f64;
    let mut y_max = data.iter().fold(0f64, |acc, d| acc.max(d.sales));
    if y_max <= 0.0 {
        y_max = 1.0;
    }
    let y_max = y_max * 1.05;

    let mut chart = ChartBuilder::on(&root)
        .caption("Sales by Region", ("sans-serif", 22))
        .margin(10)
        .set_label_area_size(LabelAreaPosition::Left, 50)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)?;

    let label_regions = regions.clone();
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Region")
        .y_desc("Sales")
        .x_labels(regions.len().max(1))
        .y_labels(6)
        .x_label_formatter(&move |v: &f64| {
            // Map a coordinate back to the region slot it falls in. Labels the
            // mesh places outside any slot (e.g. the right edge) stay blank.
            let idx = v.floor() as usize;
            label_regions.get(idx).cloned().unwrap_or_default()
        })
        .label_style(("sans-serif", 12))
        .draw()?;

    // One labeled series per product so the legend gets exactly one entry
    // per color, regardless of how many regions or duplicates there are.
    for (pi, product) in products.iter().enumerate() {
        let bar_width = GROUP_FILL / products.len() as f64;
        let gutter = (1.0 - GROUP_FILL) / 2.0;

        let bars: Vec<Rectangle<(f64, f64)>> = data
            .iter()
            .filter(|d| &d.product == product)
            .filter_map(|d| {
                let ri = regions.iter().position(|r| r == &d.region)?;
                let x0 = ri as f64 + gutter + pi as f64 * bar_width;
                let x1 = x0 + bar_width * 0.92;
                Some(Rectangle::new(
                    [(x0, 0.0), (x1, d.sales)],
                    product_color(pi).filled(),
                ))
            })
            .collect();

        chart
            .draw_series(bars)?
            .label(product.as_str())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 10, y + 5)], product_color(pi).filled())
            });
    }

    if !data.is_empty() {
        chart
            .configure_series_labels()
            .border_style(&BLACK)
            .background_style(&WHITE.mix(0.8))
            .label_font(("sans-serif", 13))
            .draw()?;
    }

    root.present()?;
    Ok(())
}
