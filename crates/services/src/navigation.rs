//! Screens as data.

use std::fmt;

use course_core::LevelId;
use course_core::progression::LevelState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Auth,
    Dashboard,
    Levels,
    Study(LevelId),
    Exercise(LevelId),
}

impl Screen {
    /// Where selecting a level leads, or `None` for a locked level.
    ///
    /// Study is the entry point until the notes are done; after that the
    /// exercises are. A completed level reopens its study notes for review.
    #[must_use]
    pub fn for_level(level: LevelId, state: LevelState) -> Option<Self> {
        match state {
            LevelState::Locked => None,
            LevelState::StudyPending | LevelState::Completed => Some(Screen::Study(level)),
            LevelState::ExercisesPending => Some(Screen::Exercise(level)),
        }
    }

    #[must_use]
    pub fn level(&self) -> Option<LevelId> {
        match self {
            Screen::Study(level) | Screen::Exercise(level) => Some(*level),
            _ => None,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Auth => f.write_str("auth"),
            Screen::Dashboard => f.write_str("dashboard"),
            Screen::Levels => f.write_str("levels"),
            Screen::Study(level) => write!(f, "study/{level}"),
            Screen::Exercise(level) => write!(f, "exercise/{level}"),
        }
    }
}
