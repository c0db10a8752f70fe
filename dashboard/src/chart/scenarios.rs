use crate::chart::{draw_api_boxplot, values_by_api, FONT};
use crate::frame::first_str;
use crate::partition::partition_by_column;
use anyhow::Context;
use plotters::prelude::*;
use polars::frame::DataFrame;
use std::path::{Path, PathBuf};

/// Render the per-scenario grid: one row per scenario, response time box
/// plots on the left and response size box plots on the right.
pub(crate) fn render_scenario_chart(
    frame: &DataFrame,
    output_dir: &Path,
) -> anyhow::Result<PathBuf> {
    let partitions = partition_by_column(frame, "scenario")?;
    if partitions.is_empty() {
        anyhow::bail!("No scenarios to plot");
    }

    let rows = partitions.len();
    let path = output_dir.join("scenario_analysis.png");

    let backend_path = path.clone();
    let root = BitMapBackend::new(&backend_path, (1600, 400 * rows as u32 + 60)).into_drawing_area();
    root.fill(&WHITE)?;
    let titled = root.titled("Per-Scenario Analysis", (FONT, 34))?;
    let panels = titled.split_evenly((rows, 2));

    for (idx, (scenario, scenario_frame)) in partitions.iter().enumerate() {
        let description = first_str(scenario_frame, "description")
            .with_context(|| format!("Description for {}", scenario))?;

        let times = values_by_api(scenario_frame, "responseTime")?;
        draw_api_boxplot(
            &panels[idx * 2],
            &format!("Response Time: {}", description),
            "Time (ms)",
            &times,
        )?;

        let sizes = values_by_api(scenario_frame, "responseSize")?;
        draw_api_boxplot(
            &panels[idx * 2 + 1],
            &format!("Response Size: {}", description),
            "Size (bytes)",
            &sizes,
        )?;
    }

    root.present()?;
    log::info!("Chart saved: {}", path.display());

    Ok(path)
}
