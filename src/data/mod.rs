//! Data module - dataset loading and cleaning

mod cleaner;
mod loader;

pub use cleaner::{CleanReport, CleanerError, DataCleaner};
pub use loader::{DataLoader, FileFormat, LoaderError};

/// Well-known column names of the student dataset. The schema is never
/// validated; absent columns degrade to warnings downstream.
pub mod columns {
    pub const GENDER: &str = "Gender";
    pub const PARENT_EDUCATION: &str = "Parent_Education_Level";
    pub const ATTENDANCE: &str = "Attendance (%)";
    pub const SLEEP_HOURS: &str = "Sleep_Hours_per_Night";
    pub const FINAL_SCORE: &str = "Final_Score";
    pub const AGE: &str = "Age";
    pub const MIDTERM_SCORE: &str = "Midterm_Score";
}
