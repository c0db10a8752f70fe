use crate::analyze::column_mean;
use crate::chart::{
    api_color, api_label, axis_max, draw_api_boxplot, histogram_bins, values_by_api,
    API_LABELS, FONT, GRAPHQL_COLOR, HISTOGRAM_BINS, REST_COLOR,
};
use crate::frame::filter_api_type;
use crate::model::MetricComparison;
use crate::partition::partition_by_column;
use api_bench_measurement_model::ApiType;
use itertools::{Itertools, MinMaxResult};
use plotters::coord::Shift;
use plotters::prelude::*;
use polars::frame::DataFrame;
use std::path::{Path, PathBuf};

pub(crate) struct MetricSpec {
    column: &'static str,
    axis_label: &'static str,
    title: &'static str,
    file_name: &'static str,
}

const RESPONSE_TIME: MetricSpec = MetricSpec {
    column: "responseTime",
    axis_label: "Response Time (ms)",
    title: "RQ1: Response Time - GraphQL vs REST",
    file_name: "response_time_comparison.png",
};

const RESPONSE_SIZE: MetricSpec = MetricSpec {
    column: "responseSize",
    axis_label: "Response Size (bytes)",
    title: "RQ2: Response Size - GraphQL vs REST",
    file_name: "response_size_comparison.png",
};

pub(crate) fn render_response_time_chart(
    frame: &DataFrame,
    comparison: &MetricComparison,
    output_dir: &Path,
) -> anyhow::Result<PathBuf> {
    render_comparison_chart(frame, comparison, output_dir, &RESPONSE_TIME)
}

pub(crate) fn render_response_size_chart(
    frame: &DataFrame,
    comparison: &MetricComparison,
    output_dir: &Path,
) -> anyhow::Result<PathBuf> {
    render_comparison_chart(frame, comparison, output_dir, &RESPONSE_SIZE)
}

/// Render one research-question figure: box plot, mean with standard
/// deviation, per-scenario means and a frequency histogram in a 2x2 grid.
fn render_comparison_chart(
    frame: &DataFrame,
    comparison: &MetricComparison,
    output_dir: &Path,
    spec: &MetricSpec,
) -> anyhow::Result<PathBuf> {
    let path = output_dir.join(spec.file_name);

    let backend_path = path.clone();
    let root = BitMapBackend::new(&backend_path, (1600, 1200)).into_drawing_area();
    root.fill(&WHITE)?;
    let titled = root.titled(spec.title, (FONT, 34))?;
    let panels = titled.split_evenly((2, 2));

    let values = values_by_api(frame, spec.column)?;

    draw_api_boxplot(
        &panels[0],
        "Distribution by API type",
        spec.axis_label,
        &values,
    )?;
    draw_mean_std_panel(&panels[1], spec.axis_label, comparison)?;
    draw_scenario_means_panel(&panels[2], frame, spec)?;
    draw_histogram_panel(&panels[3], spec.axis_label, &values)?;

    root.present()?;
    log::info!("Chart saved: {}", path.display());

    Ok(path)
}

/// Mean with a one-standard-deviation error bar, per API type
fn draw_mean_std_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    y_desc: &str,
    comparison: &MetricComparison,
) -> anyhow::Result<()> {
    let stats = [
        (ApiType::Rest, &comparison.rest),
        (ApiType::GraphQl, &comparison.graphql),
    ];

    let y_low = stats
        .iter()
        .map(|(_, s)| s.mean - s.std)
        .fold(0f64, f64::min);
    let y_high = axis_max(&stats.iter().map(|(_, s)| s.mean + s.std).collect::<Vec<_>>());

    let mut chart = ChartBuilder::on(area)
        .caption("Mean and standard deviation", (FONT, 22))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(70)
        .build_cartesian_2d(API_LABELS[..].into_segmented(), y_low..y_high)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc(y_desc)
        .axis_desc_style((FONT, 16))
        .label_style((FONT, 14))
        .draw()?;

    for (api_type, s) in &stats {
        if s.count == 0 {
            continue;
        }

        chart.draw_series(std::iter::once(ErrorBar::new_vertical(
            SegmentValue::CenterOf(api_label(*api_type)),
            s.mean - s.std,
            s.mean,
            s.mean + s.std,
            ShapeStyle::from(api_color(*api_type)).stroke_width(3),
            20,
        )))?;
    }

    Ok(())
}

/// Grouped bars of the per-scenario means, one pair of bars per scenario
fn draw_scenario_means_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    frame: &DataFrame,
    spec: &MetricSpec,
) -> anyhow::Result<()> {
    let mut data = Vec::new();
    for (scenario, scenario_frame) in partition_by_column(frame, "scenario")? {
        let rest = filter_api_type(&scenario_frame, ApiType::Rest)?;
        let graphql = filter_api_type(&scenario_frame, ApiType::GraphQl)?;
        data.push((
            scenario,
            column_mean(&rest, spec.column)?,
            column_mean(&graphql, spec.column)?,
        ));
    }

    if data.is_empty() {
        return Ok(());
    }

    let y_max = axis_max(
        &data
            .iter()
            .flat_map(|(_, rest, graphql)| [*rest, *graphql])
            .collect::<Vec<_>>(),
    );
    let x_max = (data.len() * 3) as f64 - 0.5;

    let mut chart = ChartBuilder::on(area)
        .caption("Mean per scenario", (FONT, 22))
        .margin(10)
        .x_label_area_size(150)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5f64..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_x_axis()
        .y_desc(spec.axis_label)
        .axis_desc_style((FONT, 16))
        .label_style((FONT, 14))
        .draw()?;

    chart
        .draw_series(data.iter().enumerate().map(|(idx, (_, rest_mean, _))| {
            let x_orig = (idx * 3) as f64;
            let mut bar =
                Rectangle::new([(x_orig, 0.0), (x_orig + 1.0, *rest_mean)], REST_COLOR.filled());
            bar.set_margin(0, 0, 2, 2);
            bar
        }))?
        .label("REST")
        .legend(|(x, y)| Rectangle::new([(x, y - 6), (x + 12, y + 6)], REST_COLOR.filled()));

    chart
        .draw_series(
            data.iter().enumerate().map(|(idx, (_, _, graphql_mean))| {
                let x_orig = (idx * 3) as f64;
                let mut bar = Rectangle::new(
                    [(x_orig + 1.0, 0.0), (x_orig + 2.0, *graphql_mean)],
                    GRAPHQL_COLOR.filled(),
                );
                bar.set_margin(0, 0, 2, 2);
                bar
            }),
        )?
        .label("GraphQL")
        .legend(|(x, y)| Rectangle::new([(x, y - 6), (x + 12, y + 6)], GRAPHQL_COLOR.filled()));

    // Scenario names run downwards below the axis, into the label area
    for (idx, (scenario, _, _)) in data.iter().enumerate() {
        let x_orig = (idx * 3) as f64;
        chart.plotting_area().draw(&Text::new(
            scenario.clone(),
            (x_orig + 0.7, -y_max * 0.02),
            (FONT, 13).into_font().transform(FontTransform::Rotate90),
        ))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font((FONT, 14))
        .draw()?;

    Ok(())
}

/// Overlaid frequency histograms for both API types
fn draw_histogram_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    x_desc: &str,
    values_by_api: &[(ApiType, Vec<f64>)],
) -> anyhow::Result<()> {
    let (min, max) = match values_by_api
        .iter()
        .flat_map(|(_, values)| values.iter().cloned())
        .minmax()
    {
        MinMaxResult::NoElements => return Ok(()),
        MinMaxResult::OneElement(value) => (value, value),
        MinMaxResult::MinMax(min, max) => (min, max),
    };
    let x_max = if max > min { max } else { min + 1.0 };

    let binned = values_by_api
        .iter()
        .map(|(api_type, values)| {
            (
                *api_type,
                histogram_bins(values, min, max, HISTOGRAM_BINS),
            )
        })
        .collect::<Vec<_>>();

    let y_max = binned
        .iter()
        .flat_map(|(_, bins)| bins.iter().map(|bin| bin.count))
        .max()
        .unwrap_or(0) as f64
        * 1.1;
    let y_max = if y_max <= 0.0 { 1.0 } else { y_max };

    let mut chart = ChartBuilder::on(area)
        .caption("Frequency distribution", (FONT, 22))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(min..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(x_desc)
        .y_desc("Frequency")
        .axis_desc_style((FONT, 16))
        .label_style((FONT, 14))
        .draw()?;

    for (api_type, bins) in &binned {
        let color = api_color(*api_type);
        chart
            .draw_series(bins.iter().filter(|bin| bin.count > 0).map(|bin| {
                Rectangle::new(
                    [(bin.start, 0.0), (bin.end, bin.count as f64)],
                    color.mix(0.6).filled(),
                )
            }))?
            .label(api_type.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 12, y + 6)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font((FONT, 14))
        .draw()?;

    Ok(())
}
