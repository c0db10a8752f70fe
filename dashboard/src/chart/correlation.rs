use crate::analyze::pearson_correlation;
use crate::chart::{api_color, axis_max, FONT};
use crate::frame::{column_values, filter_api_type};
use api_bench_measurement_model::ApiType;
use plotters::coord::Shift;
use plotters::prelude::*;
use polars::frame::DataFrame;
use std::path::{Path, PathBuf};

/// Render the size-against-time scatter plots, one panel per API type, each
/// annotated with its Pearson correlation coefficient.
pub(crate) fn render_correlation_chart(
    frame: &DataFrame,
    output_dir: &Path,
) -> anyhow::Result<PathBuf> {
    let path = output_dir.join("correlation_analysis.png");

    let backend_path = path.clone();
    let root = BitMapBackend::new(&backend_path, (1600, 650)).into_drawing_area();
    root.fill(&WHITE)?;
    let titled = root.titled("Correlation: Response Time vs Response Size", (FONT, 34))?;
    let panels = titled.split_evenly((1, 2));

    for (panel, api_type) in panels.iter().zip(ApiType::ALL) {
        let api_frame = filter_api_type(frame, api_type)?;
        let correlation = pearson_correlation(&api_frame, "responseSize", "responseTime")?;
        draw_scatter_panel(panel, api_type, &api_frame, correlation)?;
    }

    root.present()?;
    log::info!("Chart saved: {}", path.display());

    Ok(path)
}

fn draw_scatter_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    api_type: ApiType,
    api_frame: &DataFrame,
    correlation: f64,
) -> anyhow::Result<()> {
    let sizes = column_values(api_frame, "responseSize")?;
    let times = column_values(api_frame, "responseTime")?;
    if sizes.is_empty() {
        log::warn!("No {} measurements to plot", api_type);
        return Ok(());
    }

    let x_max = axis_max(&sizes);
    let y_max = axis_max(&times);
    let color = api_color(api_type);

    let mut chart = ChartBuilder::on(area)
        .caption(format!("{} API", api_type), (FONT, 24))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Response Size (bytes)")
        .y_desc("Response Time (ms)")
        .axis_desc_style((FONT, 16))
        .label_style((FONT, 14))
        .draw()?;

    chart
        .draw_series(
            sizes
                .iter()
                .zip(times.iter())
                .map(|(&x, &y)| Circle::new((x, y), 3, color.mix(0.6).filled())),
        )?
        .label(api_type.as_str())
        .legend(move |(x, y)| Circle::new((x + 6, y), 4, color.filled()));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font((FONT, 14))
        .draw()?;

    chart.plotting_area().draw(&Text::new(
        format!("Correlation: {:.3}", correlation),
        (x_max * 0.04, y_max * 0.96),
        (FONT, 18),
    ))?;

    Ok(())
}
