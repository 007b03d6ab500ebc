//! Statistics Calculator Module
//! Descriptive statistics over the numeric columns of the dataset.

use std::collections::HashMap;

use polars::prelude::*;

/// Descriptive statistics for a single numeric column.
#[derive(Debug, Clone)]
pub struct ColumnStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    /// Most frequent value(s), ascending.
    pub modes: Vec<f64>,
}

impl Default for ColumnStats {
    fn default() -> Self {
        Self {
            count: 0,
            mean: f64::NAN,
            median: f64::NAN,
            std: f64::NAN,
            modes: Vec::new(),
        }
    }
}

pub struct StatsCalculator;

impl StatsCalculator {
    /// Numeric column names, in dataset order.
    pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
        df.get_columns()
            .iter()
            .filter(|col| {
                matches!(
                    col.dtype(),
                    DataType::Float32
                        | DataType::Float64
                        | DataType::Int8
                        | DataType::Int16
                        | DataType::Int32
                        | DataType::Int64
                        | DataType::UInt8
                        | DataType::UInt16
                        | DataType::UInt32
                        | DataType::UInt64
                )
            })
            .map(|col| col.name().to_string())
            .collect()
    }

    /// Non-null values of a column, cast to f64.
    pub fn column_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<f64>> {
        let column = df.column(name)?;
        let casted = column.cast(&DataType::Float64)?;
        let ca = casted.f64()?;
        Ok(ca.into_iter().flatten().collect())
    }

    /// Compute descriptive statistics for an array of values. Standard
    /// deviation is the sample (n-1) form.
    pub fn compute_descriptive_stats(values: &[f64]) -> ColumnStats {
        let n = values.len();
        if n == 0 {
            return ColumnStats::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mean = values.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };

        let variance = if n > 1 {
            values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };

        ColumnStats {
            count: n,
            mean,
            median,
            std: variance.sqrt(),
            modes: Self::modal_values(values),
        }
    }

    /// All values tied for the highest frequency, ascending. NaNs are skipped.
    fn modal_values(values: &[f64]) -> Vec<f64> {
        let mut freq: HashMap<u64, (f64, usize)> = HashMap::new();
        for &v in values {
            if v.is_nan() {
                continue;
            }
            let entry = freq.entry(v.to_bits()).or_insert((v, 0));
            entry.1 += 1;
        }

        let max = freq.values().map(|&(_, count)| count).max().unwrap_or(0);
        let mut modes: Vec<f64> = freq
            .values()
            .filter(|&&(_, count)| count == max)
            .map(|&(v, _)| v)
            .collect();
        modes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        modes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn stats_for_small_sample() {
        let stats = StatsCalculator::compute_descriptive_stats(&[1.0, 2.0, 2.0, 3.0, 4.0]);

        assert_eq!(stats.count, 5);
        assert!((stats.mean - 2.4).abs() < 1e-12);
        assert_eq!(stats.median, 2.0);
        assert!((stats.std - 1.3f64.sqrt()).abs() < 1e-12);
        assert_eq!(stats.modes, vec![2.0]);
    }

    #[rstest]
    fn multimodal_column_lists_all_modes_ascending() {
        let stats = StatsCalculator::compute_descriptive_stats(&[2.0, 1.0, 1.0, 2.0, 3.0]);
        assert_eq!(stats.modes, vec![1.0, 2.0]);
    }

    #[rstest]
    fn all_distinct_values_are_all_modes() {
        let stats = StatsCalculator::compute_descriptive_stats(&[1.0, 2.0, 3.0]);
        // Every value occurs once; the caller suppresses the mode line when
        // the mode count reaches the row count.
        assert_eq!(stats.modes.len(), 3);
    }

    #[rstest]
    fn empty_input_yields_default() {
        let stats = StatsCalculator::compute_descriptive_stats(&[]);
        assert_eq!(stats.count, 0);
        assert!(stats.mean.is_nan());
        assert!(stats.modes.is_empty());
    }

    #[rstest]
    fn numeric_columns_filter_by_dtype() {
        let df = DataFrame::new(vec![
            Column::new("Name".into(), vec!["Ana", "Bia"]),
            Column::new("Age".into(), vec![18i64, 22]),
            Column::new("Final_Score".into(), vec![75.5f64, 88.0]),
        ])
        .unwrap();

        assert_eq!(
            StatsCalculator::numeric_columns(&df),
            vec!["Age".to_string(), "Final_Score".to_string()]
        );
    }

    #[rstest]
    fn column_values_skip_nulls_and_cast() {
        let df = DataFrame::new(vec![Column::new(
            "Age".into(),
            vec![Some(18i64), None, Some(25)],
        )])
        .unwrap();

        let values = StatsCalculator::column_values(&df, "Age").unwrap();
        assert_eq!(values, vec![18.0, 25.0]);
    }
}
