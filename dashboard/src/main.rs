use anyhow::Context;
use api_bench_dashboard::{run_dashboard, DashboardConfig};
use chrono::Utc;
use log::debug;
use std::fs::File;
use std::path::PathBuf;

/// Environment variable name to set a custom measurement file path
const MEASUREMENTS_PATH_ENV: &str = "MEASUREMENTS_PATH";
/// Default path for the measurement file
const DEFAULT_MEASUREMENTS_PATH: &str = "data/experiment-results.json";
/// Environment variable name to set a custom analysis results path
const ANALYSIS_PATH_ENV: &str = "ANALYSIS_PATH";
/// Default path for the precomputed analysis results
const DEFAULT_ANALYSIS_PATH: &str = "data/analysis-results.json";
/// Environment variable name to set where the charts are written
const CHART_OUTPUT_DIR_ENV: &str = "CHART_OUTPUT_DIR";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig {
        measurements_path: env_path(MEASUREMENTS_PATH_ENV, DEFAULT_MEASUREMENTS_PATH),
        analysis_path: env_path(ANALYSIS_PATH_ENV, DEFAULT_ANALYSIS_PATH),
        chart_output_dir: env_path(CHART_OUTPUT_DIR_ENV, "."),
    };
    debug!(
        "Reading measurements from {}",
        config.measurements_path.display()
    );

    println!("{}", "=".repeat(80));
    println!("API COMPARISON DASHBOARD - GraphQL vs REST");
    println!("{}", "=".repeat(80));

    if !config.measurements_path.exists() {
        eprintln!(
            "Error: measurement data not found at {}",
            config.measurements_path.display()
        );
        eprintln!("Run the experiment's data collection step before generating the dashboard.");
        std::process::exit(1);
    }

    let report = run_dashboard(&config)?;

    let report_path = format!(
        "dashboard-report-{}.json",
        Utc::now().format("%Y-%m-%dT%H.%M.%S%.fZ")
    );
    let report_file = File::create_new(&report_path).context("Create dashboard report file")?;
    serde_json::to_writer_pretty(report_file, &report)?;

    println!("\n{}", "=".repeat(80));
    println!("DASHBOARD COMPLETE");
    println!("{}", "=".repeat(80));
    println!("\nCharts rendered:");
    for chart in &report.charts {
        println!("  - {}", chart.display());
    }
    println!("\nReport written to {}", report_path);

    Ok(())
}

fn env_path(var: &str, default: &str) -> PathBuf {
    std::env::var(var)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}
