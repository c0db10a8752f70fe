use crate::model::{DescriptiveStats, ScenarioSummary};
use api_bench_measurement_model::ApiType;
use tabled::Tabled;

#[derive(Tabled)]
pub struct MetricStatsRow {
    #[tabled(rename = "API Type")]
    pub api_type: &'static str,
    #[tabled(rename = "Count")]
    pub count: usize,
    #[tabled(rename = "Mean", display = "float2")]
    pub mean: f64,
    #[tabled(rename = "Median", display = "float2")]
    pub median: f64,
    #[tabled(rename = "Std Dev", display = "float2")]
    pub std: f64,
    #[tabled(rename = "Min", display = "float2")]
    pub min: f64,
    #[tabled(rename = "Max", display = "float2")]
    pub max: f64,
}

impl MetricStatsRow {
    pub fn new(api_type: ApiType, stats: &DescriptiveStats) -> Self {
        Self {
            api_type: api_type.as_str(),
            count: stats.count,
            mean: stats.mean,
            median: stats.median,
            std: stats.std,
            min: stats.min,
            max: stats.max,
        }
    }
}

#[derive(Tabled)]
pub struct ScenarioMeanRow {
    #[tabled(rename = "Scenario")]
    pub scenario: String,
    #[tabled(rename = "Description")]
    pub description: String,
    #[tabled(rename = "REST Time (ms)", display = "float2")]
    pub rest_mean_time: f64,
    #[tabled(rename = "GraphQL Time (ms)", display = "float2")]
    pub graphql_mean_time: f64,
    #[tabled(rename = "REST Size (B)", display = "float2")]
    pub rest_mean_size: f64,
    #[tabled(rename = "GraphQL Size (B)", display = "float2")]
    pub graphql_mean_size: f64,
}

impl ScenarioMeanRow {
    pub fn new(scenario: &str, summary: &ScenarioSummary) -> Self {
        Self {
            scenario: scenario.to_string(),
            description: summary.description.clone(),
            rest_mean_time: summary.response_time.rest.mean,
            graphql_mean_time: summary.response_time.graphql.mean,
            rest_mean_size: summary.response_size.rest.mean,
            graphql_mean_size: summary.response_size.graphql.mean,
        }
    }
}

fn float2(n: &f64) -> String {
    format!("{:.2}", n)
}
