//! Key layout of the local key-value store.

use course_core::LevelId;

pub const USER: &str = "user";
pub const PROGRESS: &str = "progress";

/// Prefix shared by every per-level study record.
pub const STUDY_PREFIX: &str = "study-";
/// Prefix shared by every per-level exercise record.
pub const EXERCISES_PREFIX: &str = "exercises-";

#[must_use]
pub fn study_completed(level: LevelId) -> String {
    format!("{STUDY_PREFIX}{level}-completed")
}

#[must_use]
pub fn exercises_completed(level: LevelId) -> String {
    format!("{EXERCISES_PREFIX}{level}-completed")
}

#[must_use]
pub fn exercises_scores(level: LevelId) -> String {
    format!("{EXERCISES_PREFIX}{level}-scores")
}
