mod tables;

use crate::model::{DashboardReport, MetricComparison, ScenarioSummary};
use crate::report::tables::{MetricStatsRow, ScenarioMeanRow};
use api_bench_measurement_model::{AnalysisResults, AnalysisStats, ApiType, MetricAnalysis};
use std::collections::BTreeMap;
use tabled::settings::Style;
use tabled::Table;

const SECTION_WIDTH: usize = 80;

fn section_header(title: &str) {
    println!("\n{}", "=".repeat(SECTION_WIDTH));
    println!("{}", title);
    println!("{}", "=".repeat(SECTION_WIDTH));
}

pub(crate) fn print_chart_header() {
    section_header("GENERATING CHARTS");
}

pub(crate) fn print_loaded_counts(report: &DashboardReport) {
    println!(
        "\n\u{2713} {} measurements loaded ({} discarded as failed)",
        report.measurement_count, report.discarded_count
    );
    println!("  - REST: {} measurements", report.rest_count);
    println!("  - GraphQL: {} measurements", report.graphql_count);
}

pub(crate) fn print_summary_tables(
    response_time: &MetricComparison,
    response_size: &MetricComparison,
) {
    section_header("SUMMARY - DESCRIPTIVE STATISTICS");

    println!("\nResponse Time (ms):");
    print_metric_table(response_time);

    println!("\nResponse Size (bytes):");
    print_metric_table(response_size);
}

fn print_metric_table(comparison: &MetricComparison) {
    let rows = vec![
        MetricStatsRow::new(ApiType::Rest, &comparison.rest),
        MetricStatsRow::new(ApiType::GraphQl, &comparison.graphql),
    ];

    let mut table = Table::new(&rows);
    table.with(Style::modern());

    println!("{}", table);
}

pub(crate) fn print_scenario_table(scenarios: &BTreeMap<String, ScenarioSummary>) {
    section_header("MEAN VALUES BY SCENARIO");

    let rows = scenarios
        .iter()
        .map(|(scenario, summary)| ScenarioMeanRow::new(scenario, summary))
        .collect::<Vec<_>>();

    let mut table = Table::new(&rows);
    table.with(Style::modern());

    println!("{}", table);
}

/// Print the RQ1/RQ2 summary of the precomputed statistical analysis.
///
/// Effect sizes and significance verdicts come straight from the analysis
/// file; the confidence intervals are derived from its stored mean, standard
/// deviation and count.
pub(crate) fn print_analysis_summary(analysis: &AnalysisResults) {
    section_header("STATISTICAL ANALYSIS SUMMARY");

    println!("\nRQ1: Response Time");
    println!("{}", "-".repeat(SECTION_WIDTH));
    print_metric_analysis(&analysis.overall.response_time, "ms");

    println!("\nRQ2: Response Size");
    println!("{}", "-".repeat(SECTION_WIDTH));
    print_metric_analysis(&analysis.overall.response_size, "bytes");

    let scenario_count = analysis.scenarios.len();
    let faster = analysis
        .scenarios
        .values()
        .filter(|s| s.response_time.graphql.mean < s.response_time.rest.mean)
        .count();
    let smaller = analysis
        .scenarios
        .values()
        .filter(|s| s.response_size.graphql.mean < s.response_size.rest.mean)
        .count();

    println!(
        "\nGraphQL was faster in {} out of {} scenarios",
        faster, scenario_count
    );
    println!(
        "GraphQL had smaller responses in {} out of {} scenarios",
        smaller, scenario_count
    );
}

fn print_metric_analysis(metric: &MetricAnalysis, unit: &str) {
    println!("REST - Mean: {:.2} {}", metric.rest.mean, unit);
    println!("GraphQL - Mean: {:.2} {}", metric.graphql.mean, unit);
    println!("Effect Size (Cohen's d): {:.3}", metric.effect_size);
    println!(
        "Significant Difference: {}",
        if metric.significant { "YES" } else { "NO" }
    );

    let (lo, hi) = confidence_interval(&metric.rest);
    println!("REST 95% CI: [{:.2}, {:.2}] {}", lo, hi, unit);
    let (lo, hi) = confidence_interval(&metric.graphql);
    println!("GraphQL 95% CI: [{:.2}, {:.2}] {}", lo, hi, unit);
}

/// 95% confidence interval around the mean, from the stored moments
fn confidence_interval(stats: &AnalysisStats) -> (f64, f64) {
    if stats.count == 0 {
        return (0.0, 0.0);
    }

    let standard_error = stats.std_dev / (stats.count as f64).sqrt();
    let margin = 1.96 * standard_error;

    (stats.mean - margin, stats.mean + margin)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(count: usize, mean: f64, std_dev: f64) -> AnalysisStats {
        AnalysisStats {
            count,
            mean,
            median: mean,
            std_dev,
            min: 0.0,
            max: 0.0,
            q1: 0.0,
            q3: 0.0,
        }
    }

    #[test]
    fn confidence_interval_matches_hand_computed_values() {
        // se = 2 / sqrt(100) = 0.2, margin = 0.392
        let (lo, hi) = confidence_interval(&stats(100, 10.0, 2.0));
        assert!((lo - 9.608).abs() < 1e-9);
        assert!((hi - 10.392).abs() < 1e-9);
    }

    #[test]
    fn confidence_interval_of_empty_stats_is_zero() {
        assert_eq!(confidence_interval(&stats(0, 0.0, 0.0)), (0.0, 0.0));
    }
}
