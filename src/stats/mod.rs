//! Stats module - descriptive statistics and the fixed dataset summary

mod calculator;
mod summary;

pub use calculator::{ColumnStats, StatsCalculator};
pub use summary::{DatasetSummary, GenderCounts, Summarizer};
