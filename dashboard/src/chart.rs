mod comparison;
mod correlation;
mod scenarios;

pub(crate) use comparison::{render_response_size_chart, render_response_time_chart};
pub(crate) use correlation::render_correlation_chart;
pub(crate) use scenarios::render_scenario_chart;

use crate::frame::{column_values, filter_api_type};
use api_bench_measurement_model::ApiType;
use plotters::coord::Shift;
use plotters::prelude::*;
use polars::frame::DataFrame;

/// Colors for the two APIs, matching the rest of the experiment's tooling
pub(crate) const REST_COLOR: RGBColor = RGBColor(0x34, 0x98, 0xdb);
pub(crate) const GRAPHQL_COLOR: RGBColor = RGBColor(0xe7, 0x4c, 0x3c);

pub(crate) const FONT: &str = "sans-serif";
pub(crate) const HISTOGRAM_BINS: usize = 30;

/// X-axis labels for the segmented per-API panels
pub(crate) static API_LABELS: [&str; 2] = ["REST", "GraphQL"];

pub(crate) fn api_color(api_type: ApiType) -> RGBColor {
    match api_type {
        ApiType::Rest => REST_COLOR,
        ApiType::GraphQl => GRAPHQL_COLOR,
    }
}

pub(crate) fn api_label(api_type: ApiType) -> &'static &'static str {
    match api_type {
        ApiType::Rest => &API_LABELS[0],
        ApiType::GraphQl => &API_LABELS[1],
    }
}

/// Upper axis bound with a little headroom above the data
pub(crate) fn axis_max(values: &[f64]) -> f64 {
    let max = values.iter().cloned().fold(f64::MIN, f64::max);
    if !max.is_finite() || max <= 0.0 {
        1.0
    } else {
        max * 1.05
    }
}

#[derive(Debug, PartialEq)]
pub(crate) struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Bin values over `[min, max]` into `bin_count` equal-width bins.
///
/// The last bin is closed on both ends so the maximum value is always
/// counted.
pub(crate) fn histogram_bins(
    values: &[f64],
    min: f64,
    max: f64,
    bin_count: usize,
) -> Vec<HistogramBin> {
    if bin_count == 0 {
        return Vec::new();
    }

    let width = (max - min) / bin_count as f64;
    if width <= 0.0 {
        return vec![HistogramBin {
            start: min,
            end: min + 1.0,
            count: values.len(),
        }];
    }

    let mut bins = (0..bin_count)
        .map(|i| HistogramBin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect::<Vec<_>>();

    for &value in values {
        if value < min || value > max {
            continue;
        }
        let index = (((value - min) / width) as usize).min(bin_count - 1);
        bins[index].count += 1;
    }

    bins
}

/// The raw values of a measure column, split by API type
pub(crate) fn values_by_api(
    frame: &DataFrame,
    column: &str,
) -> anyhow::Result<Vec<(ApiType, Vec<f64>)>> {
    ApiType::ALL
        .iter()
        .map(|&api_type| {
            let api_frame = filter_api_type(frame, api_type)?;
            Ok((api_type, column_values(&api_frame, column)?))
        })
        .collect()
}

/// Draw a per-API box plot into one panel of a figure.
///
/// Shared between the metric comparison figures and the per-scenario grid.
/// APIs without values are skipped with a warning rather than failing the
/// whole figure.
pub(crate) fn draw_api_boxplot(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    caption: &str,
    y_desc: &str,
    values_by_api: &[(ApiType, Vec<f64>)],
) -> anyhow::Result<()> {
    let mut boxes = Vec::with_capacity(values_by_api.len());
    let mut y_max = f64::MIN;

    for (api_type, values) in values_by_api {
        if values.is_empty() {
            log::warn!("No {} values for panel: {}", api_type, caption);
            continue;
        }

        let quartiles = Quartiles::new(values);
        y_max = y_max.max(quartiles.values()[4] as f64);
        y_max = y_max.max(values.iter().cloned().fold(f64::MIN, f64::max));
        boxes.push((*api_type, quartiles));
    }

    if boxes.is_empty() {
        return Ok(());
    }
    let y_max = if y_max <= 0.0 { 1.0 } else { y_max * 1.05 };

    let mut chart = ChartBuilder::on(area)
        .caption(caption, (FONT, 22))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(70)
        .build_cartesian_2d(API_LABELS[..].into_segmented(), 0f32..y_max as f32)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc(y_desc)
        .axis_desc_style((FONT, 16))
        .label_style((FONT, 14))
        .draw()?;

    for (api_type, quartiles) in &boxes {
        chart.draw_series(std::iter::once(
            Boxplot::new_vertical(SegmentValue::CenterOf(api_label(*api_type)), quartiles)
                .width(60)
                .whisker_width(0.5)
                .style(api_color(*api_type)),
        ))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_max_adds_headroom() {
        assert!((axis_max(&[1.0, 2.0, 10.0]) - 10.5).abs() < 1e-9);
    }

    #[test]
    fn axis_max_of_empty_values_is_one() {
        assert_eq!(axis_max(&[]), 1.0);
    }

    #[test]
    fn histogram_bins_cover_the_range_and_preserve_the_count() {
        let values = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 5.0, 10.0];
        let bins = histogram_bins(&values, 0.0, 10.0, 5);

        assert_eq!(bins.len(), 5);
        assert_eq!(bins[0].start, 0.0);
        assert_eq!(bins[4].end, 10.0);

        let total: usize = bins.iter().map(|b| b.count).sum();
        assert_eq!(total, values.len());

        // 0 and 1 land in [0, 2), the maximum lands in the last bin
        assert_eq!(bins[0].count, 2);
        assert_eq!(bins[4].count, 1);
    }

    #[test]
    fn histogram_of_constant_values_is_a_single_bin() {
        let values = vec![3.0, 3.0, 3.0];
        let bins = histogram_bins(&values, 3.0, 3.0, 30);

        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 3);
    }

    #[test]
    fn api_colors_are_distinct() {
        let rest = api_color(ApiType::Rest);
        let graphql = api_color(ApiType::GraphQl);
        assert_ne!((rest.0, rest.1, rest.2), (graphql.0, graphql.1, graphql.2));
    }
}
