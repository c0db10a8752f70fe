use crate::model::DescriptiveStats;
use anyhow::Context;
use polars::frame::DataFrame;
use polars::prelude::*;

/// Descriptive statistics for one measure column.
///
/// The standard deviation is the sample standard deviation (ddof 1) and the
/// quartiles use linear interpolation. An empty column yields all-zero stats
/// rather than an error, so a scenario that only ever ran against one API
/// type still produces a row.
pub(crate) fn descriptive_stats(
    frame: &DataFrame,
    column: &str,
) -> anyhow::Result<DescriptiveStats> {
    let value_series = frame.column(column)?.as_materialized_series().clone();

    let count = value_series.len() - value_series.null_count();
    if count == 0 {
        return Ok(DescriptiveStats::empty());
    }

    let mean = value_series.mean().context("Mean")?;
    let std = if count > 1 {
        value_series.std(1).context("Std")?
    } else {
        0.0
    };
    let min = value_series
        .min::<f64>()
        .context("Min")?
        .context("Missing min")?;
    let max = value_series
        .max::<f64>()
        .context("Max")?
        .context("Missing max")?;

    let out = frame
        .clone()
        .lazy()
        .select([
            col(column).median().alias("median"),
            col(column)
                .quantile(lit(0.25), QuantileMethod::Linear)
                .alias("q1"),
            col(column)
                .quantile(lit(0.75), QuantileMethod::Linear)
                .alias("q3"),
        ])
        .collect()?;

    Ok(DescriptiveStats {
        count,
        mean,
        median: first_f64(&out, "median")?,
        std,
        min,
        max,
        q1: first_f64(&out, "q1")?,
        q3: first_f64(&out, "q3")?,
    })
}

/// Mean of a measure column, 0.0 when the column is empty
pub(crate) fn column_mean(frame: &DataFrame, column: &str) -> anyhow::Result<f64> {
    Ok(frame.column(column)?.as_materialized_series().mean().unwrap_or(0.0))
}

/// Pearson correlation coefficient between two measure columns.
///
/// Computed from population moments, which keeps the ddof choice out of the
/// result. Returns 0.0 when either column is constant or has fewer than two
/// values, matching how the degenerate case is reported elsewhere in the
/// experiment's tooling.
pub(crate) fn pearson_correlation(
    frame: &DataFrame,
    x_column: &str,
    y_column: &str,
) -> anyhow::Result<f64> {
    let x = frame.column(x_column)?.as_materialized_series().clone();
    let y = frame.column(y_column)?.as_materialized_series().clone();

    if x.len() < 2 {
        return Ok(0.0);
    }

    let mean_x = x.mean().context("Mean x")?;
    let mean_y = y.mean().context("Mean y")?;
    let std_x = x.std(0).context("Std x")?;
    let std_y = y.std(0).context("Std y")?;

    if std_x == 0.0 || std_y == 0.0 {
        return Ok(0.0);
    }

    let out = frame
        .clone()
        .lazy()
        .select([((col(x_column) - lit(mean_x)) * (col(y_column) - lit(mean_y)))
            .mean()
            .alias("cov")])
        .collect()?;
    let cov = first_f64(&out, "cov")?;

    Ok(cov / (std_x * std_y))
}

fn first_f64(frame: &DataFrame, column: &str) -> anyhow::Result<f64> {
    frame
        .column(column)?
        .f64()?
        .get(0)
        .with_context(|| format!("Missing {}", column))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::df;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn stats_match_hand_computed_values() -> anyhow::Result<()> {
        let frame = df! [
            "value" => [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0],
        ]?;

        let stats = descriptive_stats(&frame, "value")?;

        assert_eq!(stats.count, 8);
        assert_close(stats.mean, 5.0);
        assert_close(stats.median, 4.5);
        // Sample variance of the classic 2..9 set is 32/7
        assert_close(stats.std, (32.0f64 / 7.0).sqrt());
        assert_close(stats.min, 2.0);
        assert_close(stats.max, 9.0);
        assert_close(stats.q1, 4.0);
        assert_close(stats.q3, 5.5);

        Ok(())
    }

    #[test]
    fn empty_column_yields_zero_stats() -> anyhow::Result<()> {
        let frame = df! [
            "value" => Vec::<f64>::new(),
        ]?;

        let stats = descriptive_stats(&frame, "value")?;
        assert_eq!(stats, DescriptiveStats::empty());

        Ok(())
    }

    #[test]
    fn single_value_has_zero_std() -> anyhow::Result<()> {
        let frame = df! [
            "value" => [42.0],
        ]?;

        let stats = descriptive_stats(&frame, "value")?;
        assert_eq!(stats.count, 1);
        assert_close(stats.mean, 42.0);
        assert_close(stats.std, 0.0);

        Ok(())
    }

    #[test]
    fn correlation_of_linear_data_is_one() -> anyhow::Result<()> {
        let frame = df! [
            "x" => [1.0, 2.0, 3.0, 4.0, 5.0],
            "y" => [10.0, 20.0, 30.0, 40.0, 50.0],
        ]?;

        assert_close(pearson_correlation(&frame, "x", "y")?, 1.0);

        Ok(())
    }

    #[test]
    fn correlation_of_inverted_data_is_minus_one() -> anyhow::Result<()> {
        let frame = df! [
            "x" => [1.0, 2.0, 3.0, 4.0],
            "y" => [8.0, 6.0, 4.0, 2.0],
        ]?;

        assert_close(pearson_correlation(&frame, "x", "y")?, -1.0);

        Ok(())
    }

    #[test]
    fn correlation_of_constant_data_is_zero() -> anyhow::Result<()> {
        let frame = df! [
            "x" => [1.0, 2.0, 3.0],
            "y" => [5.0, 5.0, 5.0],
        ]?;

        assert_close(pearson_correlation(&frame, "x", "y")?, 0.0);

        Ok(())
    }

    #[test]
    fn column_mean_of_empty_column_is_zero() -> anyhow::Result<()> {
        let frame = df! [
            "value" => Vec::<f64>::new(),
        ]?;

        assert_close(column_mean(&frame, "value")?, 0.0);

        Ok(())
    }
}
