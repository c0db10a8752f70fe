use crate::model::DashboardReport;
use anyhow::Context;
use api_bench_measurement_model::{
    load_analysis_results, load_measurements, AnalysisResults, ApiType, MeasurementRecord,
};
use polars::frame::DataFrame;
use std::path::{Path, PathBuf};

mod aggregator;
mod analyze;
mod chart;
mod frame;
pub mod model;
mod partition;
mod report;

/// Where the dashboard reads its inputs and writes its charts
pub struct DashboardConfig {
    pub measurements_path: PathBuf,
    pub analysis_path: PathBuf,
    pub chart_output_dir: PathBuf,
}

/// Derive the full dashboard report from measurement records.
///
/// This is the compute-only half of the pipeline: no printing and no chart
/// rendering, so the returned report has an empty chart list. Failed
/// measurements are filtered out before any statistics are taken.
pub fn build_dashboard_report(records: &[MeasurementRecord]) -> anyhow::Result<DashboardReport> {
    let frame = frame::successful_frame(records).context("Build measurement frame")?;
    report_for_frame(&frame, records.len())
}

fn report_for_frame(frame: &DataFrame, total_records: usize) -> anyhow::Result<DashboardReport> {
    let rest_count = frame::filter_api_type(frame, ApiType::Rest)?.height();
    let graphql_count = frame::filter_api_type(frame, ApiType::GraphQl)?.height();

    Ok(DashboardReport {
        measurement_count: frame.height(),
        discarded_count: total_records - frame.height(),
        rest_count,
        graphql_count,
        response_time: aggregator::metric_comparison(frame, "responseTime")
            .context("Response time stats")?,
        response_size: aggregator::metric_comparison(frame, "responseSize")
            .context("Response size stats")?,
        scenarios: aggregator::scenario_summaries(frame).context("Scenario summaries")?,
        size_time_correlation: aggregator::correlation_summary(frame)
            .context("Correlation summary")?,
        charts: Vec::new(),
    })
}

/// Run the whole dashboard: load the inputs, print the summary tables and
/// the statistical analysis, render the four charts and return the derived
/// report.
pub fn run_dashboard(config: &DashboardConfig) -> anyhow::Result<DashboardReport> {
    let records = load_measurements(config.measurements_path.clone())
        .context("Load measurement data")?;
    log::debug!("Loaded {} raw measurements", records.len());

    let frame = frame::successful_frame(&records).context("Build measurement frame")?;
    let mut report = report_for_frame(&frame, records.len())?;

    report::print_loaded_counts(&report);
    report::print_summary_tables(&report.response_time, &report.response_size);
    report::print_scenario_table(&report.scenarios);

    if let Some(analysis) = load_optional_analysis(&config.analysis_path) {
        report::print_analysis_summary(&analysis);
    }

    report::print_chart_header();
    std::fs::create_dir_all(&config.chart_output_dir)
        .context("Create chart output directory")?;
    report.charts = vec![
        chart::render_response_time_chart(&frame, &report.response_time, &config.chart_output_dir)
            .context("Response time chart")?,
        chart::render_response_size_chart(&frame, &report.response_size, &config.chart_output_dir)
            .context("Response size chart")?,
        chart::render_scenario_chart(&frame, &config.chart_output_dir)
            .context("Scenario chart")?,
        chart::render_correlation_chart(&frame, &config.chart_output_dir)
            .context("Correlation chart")?,
    ];
    for chart in &report.charts {
        println!("\u{2713} Chart saved: {}", chart.display());
    }

    Ok(report)
}

/// The statistical analysis is optional input: when it is missing or
/// unreadable the summary section is skipped and the run carries on.
fn load_optional_analysis(path: &Path) -> Option<AnalysisResults> {
    if !path.exists() {
        println!("\nWarning: analysis results not found at {}", path.display());
        println!("Run the experiment's analysis step first to include the statistical summary.");
        return None;
    }

    match load_analysis_results(path.to_path_buf()) {
        Ok(analysis) => Some(analysis),
        Err(e) => {
            log::warn!("Failed to load analysis results: {:?}", e);
            println!(
                "\nWarning: could not parse analysis results at {}; skipping the statistical summary.",
                path.display()
            );
            None
        }
    }
}
