//! Presentation-agnostic view data derived from `UserProgress`.
//!
//! Everything here is a pure function of the progress record (and the catalog
//! for titles). Views read these instead of recomputing unlock rules.

use course_core::model::{LEVEL_COUNT, Tier};
use course_core::progression::{LevelState, level_state};
use course_core::{Catalog, LevelId, Score, UserProgress};

/// Dashboard totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressOverview {
    pub completed: usize,
    pub study_completed: usize,
    pub total: usize,
    pub completion_percent: Score,
    pub study_percent: Score,
    pub current_level: LevelId,
    pub current_tier: Tier,
}

impl ProgressOverview {
    #[must_use]
    pub fn from_progress(progress: &UserProgress) -> Self {
        let current_level = progress.current_level();
        Self {
            completed: progress.completed_count(),
            study_completed: progress.study_completed_count(),
            total: LEVEL_COUNT,
            completion_percent: progress.completion_percent(),
            study_percent: progress.study_percent(),
            current_level,
            current_tier: current_level.tier(),
        }
    }
}

/// Label of the button on a level card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelAction {
    Review,
    Exercises,
    Study,
    Start,
}

impl LevelAction {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            LevelAction::Review => "Review",
            LevelAction::Exercises => "Exercises",
            LevelAction::Study => "Study",
            LevelAction::Start => "Start",
        }
    }
}

/// Status line under a level id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelStatus {
    Completed,
    ReadyForExercises,
    StudyNotesAvailable,
    Available,
    Locked,
}

impl LevelStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            LevelStatus::Completed => "Completed",
            LevelStatus::ReadyForExercises => "Ready for Exercises",
            LevelStatus::StudyNotesAvailable => "Study Notes Available",
            LevelStatus::Available => "Available",
            LevelStatus::Locked => "Locked",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelCard {
    pub level: LevelId,
    pub title: String,
    pub state: LevelState,
    pub is_current: bool,
    pub study_completed: bool,
    pub score: Option<Score>,
    pub action: LevelAction,
    pub status: LevelStatus,
}

impl LevelCard {
    #[must_use]
    pub fn build(progress: &UserProgress, catalog: &Catalog, level: LevelId) -> Self {
        let state = level_state(progress, level);
        let completed = state == LevelState::Completed;
        let study_completed = progress.is_study_completed(level);
        let is_current = progress.current_level() == level;

        let action = if completed {
            LevelAction::Review
        } else if study_completed {
            LevelAction::Exercises
        } else if is_current {
            LevelAction::Study
        } else {
            LevelAction::Start
        };

        let status = match state {
            LevelState::Completed => LevelStatus::Completed,
            LevelState::Locked => LevelStatus::Locked,
            _ if is_current && study_completed => LevelStatus::ReadyForExercises,
            _ if is_current => LevelStatus::StudyNotesAvailable,
            _ => LevelStatus::Available,
        };

        Self {
            level,
            title: catalog.level_title(level).to_owned(),
            state,
            is_current,
            study_completed,
            score: progress.score_for(level),
            action,
            status,
        }
    }

    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        self.state.is_unlocked()
    }

    /// Show the "✓ Study Notes Complete" marker.
    #[must_use]
    pub fn shows_study_badge(&self) -> bool {
        self.study_completed && self.state != LevelState::Completed
    }
}

/// One tier with the cards of its two levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierGroup {
    pub tier: Tier,
    pub cards: Vec<LevelCard>,
}

#[must_use]
pub fn tier_groups(progress: &UserProgress, catalog: &Catalog) -> Vec<TierGroup> {
    Tier::ALL
        .into_iter()
        .map(|tier| TierGroup {
            tier,
            cards: tier
                .levels()
                .into_iter()
                .map(|level| LevelCard::build(progress, catalog, level))
                .collect(),
        })
        .collect()
}
