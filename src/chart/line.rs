//! The "Sales Over Time" line chart.
//!
//! One line series per distinct product present in the (already filtered)
//! data, keyed by date. Points are not aggregated: if the data carries two
//! values for the same (date, product) pair, both are drawn and the line
//! simply passes through both.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use plotters::prelude::*;

use crate::domain::TimeSeriesPoint;
use crate::error::AppError;

use super::{CHART_HEIGHT, CHART_WIDTH, product_color};

/// Render the time-series chart to an SVG document.
///
/// An empty `points` slice renders an empty (but valid) chart frame rather
/// than failing.
pub fn render_time_series(points: &[TimeSeriesPoint]) -> Result<String, AppError> {
    let mut svg = String::new();
    draw(&mut svg, points).map_err(|e| AppError::Chart(e.to_string()))?;
    Ok(svg)
}

fn draw(svg: &mut String, points: &[TimeSeriesPoint]) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::with_string(svg, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_range, y_max) = bounds(points);

    let mut chart = ChartBuilder::on(&root)
        .caption("Sales Over Time", ("sans-serif", 22))
        .margin(10)
        .set_label_area_size(LabelAreaPosition::Left, 50)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(x_range, 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Date")
        .y_desc("Sales")
        .x_labels(8)
        .y_labels(6)
        .x_label_formatter(&|d: &NaiveDate| d.format("%Y-%m-%d").to_string())
        .label_style(("sans-serif", 12))
        .draw()?;

    // Group points into one series per product. BTreeMap keeps products in
    // sorted order, which is what keeps colors stable across both charts.
    let mut by_product: BTreeMap<&str, Vec<(NaiveDate, f64)>> = BTreeMap::new();
    for p in points {
        by_product
            .entry(p.product.as_str())
            .or_default()
            .push((p.date, p.sales));
    }

    for (idx, (product, mut series)) in by_product.into_iter().enumerate() {
        // Connect points left-to-right regardless of dataset order. The sort
        // is stable, so duplicate dates keep their relative order.
        series.sort_by_key(|(date, _)| *date);

        chart
            .draw_series(LineSeries::new(
                series.iter().copied(),
                product_color(idx).stroke_width(2),
            ))?
            .label(product)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 16, y)], product_color(idx).stroke_width(2))
            });

        // Mark the observations themselves so single-point series stay visible.
        chart.draw_series(
            series
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 3, product_color(idx).filled())),
        )?;
    }

    if !points.is_empty() {
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

/// X/Y bounds for the chart, with placeholder ranges for empty input and
/// padding so degenerate spans (single date, all-zero sales) still produce
/// a drawable coordinate system.
fn bounds(points: &[TimeSeriesPoint]) -> (std::ops::Range<NaiveDate>, f64) {
    let Some(first) = points.first() else {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        return (start..end, 1.0);
    };

    let mut date_min = first.date;
    let mut date_max = first.date;
    let mut y_max = 0f64;
    for p in points {
        date_min = date_min.min(p.date);
        date_max = date_max.max(p.date);
        y_max = y_max.max(p.sales);
    }

    if date_min == date_max {
        date_min = date_min - Duration::days(1);
        date_max = date_max + Duration::days(1);
    }
    if y_max <= 0.0 {
        y_max = 1.0;
    }

    (date_min..date_max, y_max * 1.05)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(date: &str, product: &str, sales: f64) -> TimeSeriesPoint {
        TimeSeriesPoint {
            date: date.parse().unwrap(),
            product: product.to_string(),
            sales,
        }
    }

    #[test]
    fn renders_empty_input_to_a_valid_chart() {
        let svg = render_time_series(&[]).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn renders_one_series_per_product() {
        let points = vec![
            point("2024-01-01", "Widget", 10.0),
            point("2024-01-02", "Widget", 12.0),
            point("2024-01-01", "Gadget", 20.0),
            point("2024-01-02", "Gadget", 18.0),
        ];
        let svg = render_time_series(&points).unwrap();
        // Legend entries carry the product names into the SVG text.
        assert!(svg.contains("Widget"));
        assert!(svg.contains("Gadget"));
    }

    #[test]
    fn single_point_dataset_renders() {
        let svg = render_time_series(&[point("2024-06-15", "Widget", 5.0)]).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn all_zero_sales_render() {
        let points = vec![
            point("2024-01-01", "Widget", 0.0),
            point("2024-01-02", "Widget", 0.0),
        ];
        let svg = render_time_series(&points).unwrap();
        assert!(svg.contains("<svg"));
    }
}
