use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::io::{Read, Write};
use std::path::PathBuf;

/// The API style a measurement was taken against
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ApiType {
    /// Request/response endpoints returning fixed resource representations
    #[serde(rename = "REST")]
    Rest,
    /// Query-based endpoint where the client chooses the response shape
    #[serde(rename = "GraphQL")]
    GraphQl,
}

impl ApiType {
    /// Both API types, in the order they are reported
    pub const ALL: [ApiType; 2] = [ApiType::Rest, ApiType::GraphQl];

    /// The label used in the measurement files and in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiType::Rest => "REST",
            ApiType::GraphQl => "GraphQL",
        }
    }
}

impl fmt::Display for ApiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded measurement from the experiment
///
/// The collection step records one of these per request, for both API types,
/// across every scenario. Failed requests are kept in the file with
/// [MeasurementRecord::success] set to `false` and must be filtered out
/// before analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementRecord {
    /// Scenario identifier, e.g. `simple_user`
    pub scenario: String,
    /// Human-readable scenario description
    pub description: String,
    /// Which API style this measurement was taken against
    pub api_type: ApiType,
    /// 1-based iteration counter within the scenario
    #[serde(default)]
    pub iteration: u32,
    /// Response time in milliseconds
    pub response_time: f64,
    /// Response body size in bytes
    ///
    /// Zero for failed requests.
    pub response_size: u64,
    /// Whether the request completed with a success status
    pub success: bool,
    /// HTTP status code of the response, 0 if the request never completed
    #[serde(default)]
    pub status_code: u16,
}

/// Descriptive statistics as computed by the external analysis step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub q3: f64,
}

/// Precomputed comparison of one metric between the two API types
///
/// The effect size is Cohen's d for GraphQL relative to REST and the
/// significance verdict comes from the external analysis step's t-test. This
/// tool only displays these values, it never recomputes them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricAnalysis {
    pub rest: AnalysisStats,
    pub graphql: AnalysisStats,
    pub effect_size: f64,
    pub significant: bool,
}

/// Analysis of both research-question metrics for one slice of the data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSection {
    /// RQ1: response time in milliseconds
    pub response_time: MetricAnalysis,
    /// RQ2: response size in bytes
    pub response_size: MetricAnalysis,
}

/// The full contents of the precomputed analysis file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResults {
    /// Analysis across all scenarios combined
    pub overall: AnalysisSection,
    /// Per-scenario analysis, keyed by scenario identifier
    pub scenarios: BTreeMap<String, AnalysisSection>,
}

/// Load measurement records from a file
///
/// The file holds a single JSON array with one object per measurement. This
/// is the format produced by the experiment's collection step.
pub fn load_measurements(path: PathBuf) -> anyhow::Result<Vec<MeasurementRecord>> {
    let file = std::fs::File::open(path)?;
    load_measurements_from(file)
}

/// Load measurement records from a reader
pub fn load_measurements_from<R: Read>(reader: R) -> anyhow::Result<Vec<MeasurementRecord>> {
    let reader = std::io::BufReader::new(reader);
    let records: Vec<MeasurementRecord> = serde_json::from_reader(reader)?;
    Ok(records)
}

/// Serialize measurement records to a writer as a JSON array
pub fn store_measurements<W: Write>(
    records: &[MeasurementRecord],
    writer: &mut W,
) -> anyhow::Result<()> {
    serde_json::to_writer(writer, records)?;
    Ok(())
}

/// Load the precomputed analysis results from a file
pub fn load_analysis_results(path: PathBuf) -> anyhow::Result<AnalysisResults> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    let results: AnalysisResults = serde_json::from_reader(reader)?;
    Ok(results)
}
