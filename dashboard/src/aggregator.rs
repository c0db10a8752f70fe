use crate::analyze::{descriptive_stats, pearson_correlation};
use crate::frame::{filter_api_type, first_str};
use crate::model::{CorrelationSummary, MetricComparison, ScenarioSummary};
use crate::partition::partition_by_column;
use anyhow::Context;
use api_bench_measurement_model::ApiType;
use polars::frame::DataFrame;
use std::collections::BTreeMap;

/// Describe one measure column for both API types
pub(crate) fn metric_comparison(
    frame: &DataFrame,
    column: &str,
) -> anyhow::Result<MetricComparison> {
    let rest = filter_api_type(frame, ApiType::Rest)?;
    let graphql = filter_api_type(frame, ApiType::GraphQl)?;

    Ok(MetricComparison {
        rest: descriptive_stats(&rest, column)
            .with_context(|| format!("REST stats for {}", column))?,
        graphql: descriptive_stats(&graphql, column)
            .with_context(|| format!("GraphQL stats for {}", column))?,
    })
}

/// Describe both measures for every scenario in the frame
pub(crate) fn scenario_summaries(
    frame: &DataFrame,
) -> anyhow::Result<BTreeMap<String, ScenarioSummary>> {
    let mut summaries = BTreeMap::new();

    for (scenario, scenario_frame) in partition_by_column(frame, "scenario")? {
        log::debug!("Summarizing scenario {}", scenario);

        let summary = ScenarioSummary {
            description: first_str(&scenario_frame, "description")
                .with_context(|| format!("Description for {}", scenario))?,
            response_time: metric_comparison(&scenario_frame, "responseTime")
                .with_context(|| format!("Response time for {}", scenario))?,
            response_size: metric_comparison(&scenario_frame, "responseSize")
                .with_context(|| format!("Response size for {}", scenario))?,
        };

        summaries.insert(scenario, summary);
    }

    Ok(summaries)
}

/// Correlate response size against response time, per API type
pub(crate) fn correlation_summary(frame: &DataFrame) -> anyhow::Result<CorrelationSummary> {
    let rest = filter_api_type(frame, ApiType::Rest)?;
    let graphql = filter_api_type(frame, ApiType::GraphQl)?;

    Ok(CorrelationSummary {
        rest: pearson_correlation(&rest, "responseSize", "responseTime")
            .context("REST correlation")?,
        graphql: pearson_correlation(&graphql, "responseSize", "responseTime")
            .context("GraphQL correlation")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::successful_frame;
    use api_bench_measurement_model::MeasurementRecord;

    fn record(
        scenario: &str,
        api_type: ApiType,
        response_time: f64,
        response_size: u64,
    ) -> MeasurementRecord {
        MeasurementRecord {
            scenario: scenario.to_string(),
            description: format!("Scenario {}", scenario),
            api_type,
            iteration: 1,
            response_time,
            response_size,
            success: true,
            status_code: 200,
        }
    }

    #[test]
    fn grouped_means_equal_hand_computed_values() -> anyhow::Result<()> {
        let records = vec![
            record("simple_user", ApiType::Rest, 10.0, 100),
            record("simple_user", ApiType::Rest, 14.0, 100),
            record("simple_user", ApiType::GraphQl, 20.0, 80),
            record("simple_user", ApiType::GraphQl, 30.0, 80),
            record("simple_post", ApiType::Rest, 40.0, 400),
            record("simple_post", ApiType::GraphQl, 8.0, 200),
        ];
        let frame = successful_frame(&records)?;

        let overall = metric_comparison(&frame, "responseTime")?;
        assert_eq!(overall.rest.count, 3);
        assert!((overall.rest.mean - 64.0 / 3.0).abs() < 1e-9);
        assert_eq!(overall.graphql.count, 3);
        assert!((overall.graphql.mean - 58.0 / 3.0).abs() < 1e-9);

        let scenarios = scenario_summaries(&frame)?;
        assert_eq!(scenarios.len(), 2);

        let simple_user = &scenarios["simple_user"];
        assert_eq!(simple_user.description, "Scenario simple_user");
        assert!((simple_user.response_time.rest.mean - 12.0).abs() < 1e-9);
        assert!((simple_user.response_time.graphql.mean - 25.0).abs() < 1e-9);
        assert!((simple_user.response_size.rest.mean - 100.0).abs() < 1e-9);
        assert!((simple_user.response_size.graphql.mean - 80.0).abs() < 1e-9);

        let simple_post = &scenarios["simple_post"];
        assert_eq!(simple_post.response_time.rest.count, 1);
        assert!((simple_post.response_time.rest.mean - 40.0).abs() < 1e-9);

        Ok(())
    }

    #[test]
    fn scenario_with_a_single_api_type_reports_empty_stats_for_the_other() -> anyhow::Result<()> {
        let records = vec![
            record("rest_only", ApiType::Rest, 10.0, 100),
            record("rest_only", ApiType::Rest, 12.0, 100),
        ];
        let frame = successful_frame(&records)?;

        let scenarios = scenario_summaries(&frame)?;
        let summary = &scenarios["rest_only"];
        assert_eq!(summary.response_time.rest.count, 2);
        assert_eq!(summary.response_time.graphql.count, 0);
        assert_eq!(summary.response_time.graphql.mean, 0.0);

        Ok(())
    }

    #[test]
    fn correlation_tracks_size_against_time() -> anyhow::Result<()> {
        // REST times scale linearly with size, GraphQL times are inverted
        let records = vec![
            record("s", ApiType::Rest, 10.0, 100),
            record("s", ApiType::Rest, 20.0, 200),
            record("s", ApiType::Rest, 30.0, 300),
            record("s", ApiType::GraphQl, 30.0, 100),
            record("s", ApiType::GraphQl, 20.0, 200),
            record("s", ApiType::GraphQl, 10.0, 300),
        ];
        let frame = successful_frame(&records)?;

        let correlation = correlation_summary(&frame)?;
        assert!((correlation.rest - 1.0).abs() < 1e-9);
        assert!((correlation.graphql + 1.0).abs() < 1e-9);

        Ok(())
    }
}
