use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Descriptive statistics derived from the measurement frame
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub q3: f64,
}

impl DescriptiveStats {
    /// The stats reported for a slice with no measurements
    pub fn empty() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            median: 0.0,
            std: 0.0,
            min: 0.0,
            max: 0.0,
            q1: 0.0,
            q3: 0.0,
        }
    }
}

/// One metric, described for both API types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricComparison {
    pub rest: DescriptiveStats,
    pub graphql: DescriptiveStats,
}

/// Everything derived for a single scenario
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioSummary {
    pub description: String,
    pub response_time: MetricComparison,
    pub response_size: MetricComparison,
}

/// Pearson correlation between response size and response time, per API type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CorrelationSummary {
    pub rest: f64,
    pub graphql: f64,
}

/// The dashboard's complete derived output
///
/// This is what gets serialized to the timestamped report file at the end of
/// a run, alongside the stdout tables and the PNG charts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardReport {
    /// Number of successful measurements analyzed
    pub measurement_count: usize,
    /// Number of measurements discarded as failed
    pub discarded_count: usize,
    pub rest_count: usize,
    pub graphql_count: usize,
    /// RQ1: response time in milliseconds
    pub response_time: MetricComparison,
    /// RQ2: response size in bytes
    pub response_size: MetricComparison,
    /// Per-scenario breakdown, keyed by scenario identifier
    pub scenarios: BTreeMap<String, ScenarioSummary>,
    pub size_time_correlation: CorrelationSummary,
    /// Chart files rendered during the run
    pub charts: Vec<PathBuf>,
}
