use std::collections::BTreeMap;

use crate::model::exercise::Score;
use crate::model::level::{LEVEL_COUNT, LevelId};

/// Aggregate learner progress, one record per signed-in identity.
///
/// Mutation goes through [`crate::progression`]; everything else reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProgress {
    completed_levels: Vec<LevelId>,
    completed_study_notes: Vec<LevelId>,
    current_level: LevelId,
    exercise_progress: BTreeMap<LevelId, Score>,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl UserProgress {
    /// Fresh record: positioned on the first level, nothing completed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            completed_levels: Vec::new(),
            completed_study_notes: Vec::new(),
            current_level: LevelId::FIRST,
            exercise_progress: BTreeMap::new(),
        }
    }

    /// Rebuild a record from persisted parts, repairing what can be repaired.
    ///
    /// Duplicates are dropped, scores for levels that are not completed are
    /// dropped, a completed level without a score scores 0, and
    /// `current_level` is raised to the furthest completed level when it lags
    /// behind.
    #[must_use]
    pub fn from_persisted(
        completed_levels: Vec<LevelId>,
        completed_study_notes: Vec<LevelId>,
        current_level: LevelId,
        exercise_progress: BTreeMap<LevelId, Score>,
    ) -> Self {
        let completed_levels = dedup_in_order(completed_levels);
        let completed_study_notes = dedup_in_order(completed_study_notes);
        let mut exercise_progress: BTreeMap<LevelId, Score> = exercise_progress
            .into_iter()
            .filter(|(level, _)| completed_levels.contains(level))
            .collect();
        for level in &completed_levels {
            exercise_progress.entry(*level).or_insert(Score::ZERO);
        }
        let furthest_completed = completed_levels.iter().max().copied();
        let current_level = match furthest_completed {
            Some(level) if level > current_level => level,
            _ => current_level,
        };

        Self {
            completed_levels,
            completed_study_notes,
            current_level,
            exercise_progress,
        }
    }

    // Accessors
    #[must_use]
    pub fn completed_levels(&self) -> &[LevelId] {
        &self.completed_levels
    }

    #[must_use]
    pub fn completed_study_notes(&self) -> &[LevelId] {
        &self.completed_study_notes
    }

    #[must_use]
    pub fn current_level(&self) -> LevelId {
        self.current_level
    }

    #[must_use]
    pub fn exercise_progress(&self) -> &BTreeMap<LevelId, Score> {
        &self.exercise_progress
    }

    #[must_use]
    pub fn is_level_completed(&self, level: LevelId) -> bool {
        self.completed_levels.contains(&level)
    }

    #[must_use]
    pub fn is_study_completed(&self, level: LevelId) -> bool {
        self.completed_study_notes.contains(&level)
    }

    #[must_use]
    pub fn score_for(&self, level: LevelId) -> Option<Score> {
        self.exercise_progress.get(&level).copied()
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed_levels.len()
    }

    #[must_use]
    pub fn study_completed_count(&self) -> usize {
        self.completed_study_notes.len()
    }

    /// Share of all levels completed, as a rounded percentage.
    #[must_use]
    pub fn completion_percent(&self) -> Score {
        Score::from_ratio(self.completed_count(), LEVEL_COUNT)
    }

    #[must_use]
    pub fn study_percent(&self) -> Score {
        Score::from_ratio(self.study_completed_count(), LEVEL_COUNT)
    }

    pub(crate) fn push_study_note(&mut self, level: LevelId) -> bool {
        if self.completed_study_notes.contains(&level) {
            return false;
        }
        self.completed_study_notes.push(level);
        true
    }

    pub(crate) fn push_completed_level(&mut self, level: LevelId) -> bool {
        if self.completed_levels.contains(&level) {
            return false;
        }
        self.completed_levels.push(level);
        true
    }

    pub(crate) fn set_score(&mut self, level: LevelId, score: Score) {
        self.exercise_progress.insert(level, score);
    }

    /// Moves `current_level` forward; never backward.
    pub(crate) fn raise_current_level(&mut self, level: LevelId) -> bool {
        if level > self.current_level {
            self.current_level = level;
            true
        } else {
            false
        }
    }
}

fn dedup_in_order(levels: Vec<LevelId>) -> Vec<LevelId> {
    let mut seen = Vec::with_capacity(levels.len());
    for level in levels {
        if !seen.contains(&level) {
            seen.push(level);
        }
    }
    seen
}
