//! Dataset Summary Module
//! Fixed descriptive counts over the well-known student columns.

use polars::prelude::*;

use crate::data::columns::{ATTENDANCE, GENDER, PARENT_EDUCATION};

/// Exact-match counts of the two expected gender labels. Any other label is
/// counted by neither bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenderCounts {
    pub male: usize,
    pub female: usize,
}

/// Summary of the three fixed columns; `None` marks an absent column.
#[derive(Debug, Clone, Default)]
pub struct DatasetSummary {
    pub total_rows: usize,
    pub gender: Option<GenderCounts>,
    pub missing_parent_education: Option<usize>,
    pub mean_attendance: Option<f64>,
}

pub struct Summarizer;

impl Summarizer {
    pub fn summarize(df: &DataFrame) -> DatasetSummary {
        DatasetSummary {
            total_rows: df.height(),
            gender: df.column(GENDER).ok().map(Self::gender_counts),
            missing_parent_education: df
                .column(PARENT_EDUCATION)
                .ok()
                .map(|col| col.null_count()),
            mean_attendance: df
                .column(ATTENDANCE)
                .ok()
                .map(|col| col.as_materialized_series().mean().unwrap_or(f64::NAN)),
        }
    }

    fn gender_counts(column: &Column) -> GenderCounts {
        let mut counts = GenderCounts::default();
        if let Ok(ca) = column.as_materialized_series().str() {
            for value in ca.into_iter().flatten() {
                match value {
                    "Male" => counts.male += 1,
                    "Female" => counts.female += 1,
                    _ => {}
                }
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn summarizes_all_three_columns() {
        let df = DataFrame::new(vec![
            Column::new(
                GENDER.into(),
                vec![Some("Male"), Some("Female"), Some("Male"), Some("Other"), None],
            ),
            Column::new(
                PARENT_EDUCATION.into(),
                vec![Some("College"), None, None, Some("Master"), Some("College")],
            ),
            Column::new(
                ATTENDANCE.into(),
                vec![Some(80.0), None, Some(90.0), Some(70.0), Some(100.0)],
            ),
        ])
        .unwrap();

        let summary = Summarizer::summarize(&df);
        assert_eq!(summary.total_rows, 5);
        assert_eq!(summary.gender, Some(GenderCounts { male: 2, female: 1 }));
        assert_eq!(summary.missing_parent_education, Some(2));
        assert_eq!(summary.mean_attendance, Some(85.0));
    }

    #[rstest]
    fn absent_columns_become_none() {
        let df = DataFrame::new(vec![Column::new("Final_Score".into(), vec![75.0, 88.0])])
            .unwrap();

        let summary = Summarizer::summarize(&df);
        assert_eq!(summary.total_rows, 2);
        assert!(summary.gender.is_none());
        assert!(summary.missing_parent_education.is_none());
        assert!(summary.mean_attendance.is_none());
    }

    #[rstest]
    fn gender_match_is_exact() {
        let df = DataFrame::new(vec![Column::new(
            GENDER.into(),
            vec!["male", "FEMALE", "Male "],
        )])
        .unwrap();

        let summary = Summarizer::summarize(&df);
        assert_eq!(summary.gender, Some(GenderCounts::default()));
    }
}
