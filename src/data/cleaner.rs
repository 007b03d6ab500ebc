//! Data Cleaner Module
//! Drops rows missing the parental education level and imputes attendance
//! nulls with the column median.

use log::debug;
use polars::prelude::*;
use thiserror::Error;

use crate::data::columns::{ATTENDANCE, PARENT_EDUCATION};

#[derive(Error, Debug)]
pub enum CleanerError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Outcome of a cleaning pass. `None` fields mark steps skipped because the
/// column is absent (or, for the median, had no values).
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanReport {
    pub rows_dropped: Option<usize>,
    pub fill_median: Option<f64>,
    pub rows_remaining: usize,
}

pub struct DataCleaner;

impl DataCleaner {
    /// Drop rows with a null `Parent_Education_Level`, then fill nulls in
    /// `Attendance (%)` with that column's median. Order matters: the median
    /// comes from the already-reduced table.
    pub fn clean(df: DataFrame) -> Result<(DataFrame, CleanReport), CleanerError> {
        let mut df = df;
        let mut report = CleanReport::default();

        if df.column(PARENT_EDUCATION).is_ok() {
            let before = df.height();
            df = df
                .lazy()
                .filter(col(PARENT_EDUCATION).is_not_null())
                .collect()?;
            report.rows_dropped = Some(before - df.height());
        }

        if df.column(ATTENDANCE).is_ok() {
            report.fill_median = df.column(ATTENDANCE)?.as_materialized_series().median();
            if let Some(median) = report.fill_median {
                df = df
                    .lazy()
                    .with_column(col(ATTENDANCE).fill_null(lit(median)))
                    .collect()?;
            }
        }

        report.rows_remaining = df.height();
        debug!("limpeza concluída: {report:?}");
        Ok((df, report))
    }
}
