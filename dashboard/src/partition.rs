use polars::prelude::{col, lit, DataFrame, IntoLazy, UniqueKeepStrategy};
use std::collections::BTreeMap;

/// Split the measurement frame into one sub-frame per unique value of a
/// string column.
///
/// Returns the sub-frames keyed by column value in a [`BTreeMap`] so that
/// scenario iteration order is stable across runs.
pub(crate) fn partition_by_column(
    frame: &DataFrame,
    column: &str,
) -> anyhow::Result<BTreeMap<String, DataFrame>> {
    let selectors = frame
        .clone()
        .lazy()
        .select([col(column)])
        .unique(Some(vec![column.to_string()]), UniqueKeepStrategy::Any)
        .collect()?;

    let keys: Vec<String> = selectors
        .column(column)?
        .str()?
        .iter()
        .flatten()
        .map(|key| key.to_string())
        .collect();

    let mut partitioned = BTreeMap::new();
    for key in keys {
        log::debug!("Partition for {}={}", column, key);

        let filtered = frame
            .clone()
            .lazy()
            .select([col("*")])
            .filter(col(column).eq(lit(key.clone())))
            .collect()?;

        partitioned.insert(key, filtered);
    }

    Ok(partitioned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::df;

    fn create_test_dataframe() -> DataFrame {
        df! [
            "scenario" => ["simple_user", "simple_user", "simple_post", "simple_post", "simple_user"],
            "apiType"  => ["REST", "GraphQL", "REST", "GraphQL", "REST"],
            "responseTime" => [1., 2., 3., 4., 5.],
        ]
        .unwrap()
    }

    #[test]
    fn partitions_by_scenario() -> anyhow::Result<()> {
        let frame = create_test_dataframe();
        let partitioned = partition_by_column(&frame, "scenario")?;

        assert_eq!(partitioned.len(), 2);
        assert_eq!(partitioned["simple_user"].height(), 3);
        assert_eq!(partitioned["simple_post"].height(), 2);

        let values: Vec<f64> = partitioned["simple_user"]
            .column("responseTime")?
            .f64()?
            .into_iter()
            .map(|v| v.unwrap())
            .collect();
        assert_eq!(values, vec![1., 2., 5.]);

        Ok(())
    }

    #[test]
    fn partitions_are_ordered_by_key() -> anyhow::Result<()> {
        let frame = create_test_dataframe();
        let partitioned = partition_by_column(&frame, "scenario")?;

        let keys: Vec<&String> = partitioned.keys().collect();
        assert_eq!(keys, vec!["simple_post", "simple_user"]);

        Ok(())
    }

    #[test]
    fn partition_by_nonexistent_column_is_an_error() {
        let frame = create_test_dataframe();
        assert!(partition_by_column(&frame, "nonexistent").is_err());
    }
}
