mod exercise;
mod level;
mod progress;
mod study;
mod user;

pub use exercise::{ExerciseKind, ParseExerciseKindError, Score, ScoreError};
pub use level::{LEVEL_COUNT, LEVEL_SEQUENCE, LevelId, ParseLevelError, SubLevel, Tier};
pub use progress::UserProgress;
pub use study::{ParseSectionError, StudySection};
pub use user::User;
