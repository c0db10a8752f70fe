use api_bench_measurement_model::{ApiType, MeasurementRecord};
use polars::prelude::*;
use std::io::Write;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("No successful measurements to analyze")]
    NoSuccessfulMeasurements,
}

/// Build a [`DataFrame`] from the successful measurement records.
///
/// Failed measurements are dropped here so every downstream aggregation only
/// ever sees successful requests. The measure columns are cast to `Float64`
/// because the file stores response sizes as integers.
pub(crate) fn successful_frame(records: &[MeasurementRecord]) -> anyhow::Result<DataFrame> {
    let successful: Vec<&MeasurementRecord> = records.iter().filter(|r| r.success).collect();
    if successful.is_empty() {
        return Err(LoadError::NoSuccessfulMeasurements.into());
    }

    let mut f = tempfile::tempfile()?;
    f.write_all(serde_json::to_string(&successful)?.as_bytes())?;

    let mut frame = JsonReader::new(f).finish()?;
    frame = frame
        .clone()
        .lazy()
        .with_columns([
            col("responseTime").cast(DataType::Float64),
            col("responseSize").cast(DataType::Float64),
        ])
        .collect()?;

    Ok(frame)
}

/// The rows measured against one API type
pub(crate) fn filter_api_type(frame: &DataFrame, api_type: ApiType) -> anyhow::Result<DataFrame> {
    Ok(frame
        .clone()
        .lazy()
        .filter(col("apiType").eq(lit(api_type.as_str())))
        .collect()?)
}

/// All values of a `Float64` column, nulls skipped
pub(crate) fn column_values(frame: &DataFrame, column: &str) -> anyhow::Result<Vec<f64>> {
    Ok(frame.column(column)?.f64()?.into_iter().flatten().collect())
}

/// The first value of a string column
pub(crate) fn first_str(frame: &DataFrame, column: &str) -> anyhow::Result<String> {
    frame
        .column(column)?
        .str()?
        .get(0)
        .map(|s| s.to_string())
        .ok_or_else(|| anyhow::anyhow!("No values in column: {}", column))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(api_type: ApiType, response_time: f64, success: bool) -> MeasurementRecord {
        MeasurementRecord {
            scenario: "simple_user".to_string(),
            description: "Get single user".to_string(),
            api_type,
            iteration: 1,
            response_time,
            response_size: if success { 100 } else { 0 },
            success,
            status_code: if success { 200 } else { 500 },
        }
    }

    #[test]
    fn failed_measurements_are_dropped() -> anyhow::Result<()> {
        let records = vec![
            record(ApiType::Rest, 10.0, true),
            record(ApiType::Rest, 11.0, false),
            record(ApiType::GraphQl, 12.0, true),
            record(ApiType::GraphQl, 13.0, true),
        ];

        let frame = successful_frame(&records)?;
        assert_eq!(frame.height(), 3);

        let rest = filter_api_type(&frame, ApiType::Rest)?;
        assert_eq!(rest.height(), 1);
        let graphql = filter_api_type(&frame, ApiType::GraphQl)?;
        assert_eq!(graphql.height(), 2);

        Ok(())
    }

    #[test]
    fn measure_columns_are_float64() -> anyhow::Result<()> {
        let records = vec![record(ApiType::Rest, 10.0, true)];

        let frame = successful_frame(&records)?;
        assert_eq!(frame.column("responseTime")?.dtype(), &DataType::Float64);
        assert_eq!(frame.column("responseSize")?.dtype(), &DataType::Float64);

        let values = column_values(&frame, "responseSize")?;
        assert_eq!(values, vec![100.0]);

        Ok(())
    }

    #[test]
    fn all_failed_measurements_is_an_error() {
        let records = vec![record(ApiType::Rest, 10.0, false)];

        let result = successful_frame(&records);
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err().downcast_ref::<LoadError>(),
            Some(LoadError::NoSuccessfulMeasurements)
        ));
    }

    #[test]
    fn first_str_reads_the_description() -> anyhow::Result<()> {
        let records = vec![record(ApiType::Rest, 10.0, true)];

        let frame = successful_frame(&records)?;
        assert_eq!(first_str(&frame, "description")?, "Get single user");

        Ok(())
    }
}
