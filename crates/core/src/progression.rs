//! Level unlock, study and exercise gating, and level advancement.
//!
//! Everything here is a pure function over [`UserProgress`] and the per-level
//! records. Callers own persistence; a transition mutates the in-memory record
//! and the caller writes it back in one piece.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::model::{ExerciseKind, LevelId, Score, StudySection, UserProgress};

//
// ─── LEVEL STATE ───────────────────────────────────────────────────────────────
//

/// Derived per-level state; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelState {
    Locked,
    StudyPending,
    ExercisesPending,
    Completed,
}

impl LevelState {
    #[must_use]
    pub fn is_unlocked(self) -> bool {
        !matches!(self, LevelState::Locked)
    }
}

#[must_use]
pub fn level_state(progress: &UserProgress, level: LevelId) -> LevelState {
    if progress.is_level_completed(level) {
        LevelState::Completed
    } else if level > progress.current_level() {
        LevelState::Locked
    } else if progress.is_study_completed(level) {
        LevelState::ExercisesPending
    } else {
        LevelState::StudyPending
    }
}

/// Every level at or before the current level stays unlocked, completed or not.
#[must_use]
pub fn is_unlocked(progress: &UserProgress, level: LevelId) -> bool {
    level_state(progress, level).is_unlocked()
}

//
// ─── GATES ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("level {0} is locked")]
    Locked(LevelId),

    #[error("study notes for {0} are not complete")]
    StudyIncomplete(LevelId),

    #[error("{completed} of {required} exercises completed for {level}")]
    ExercisesIncomplete {
        level: LevelId,
        completed: usize,
        required: usize,
    },
}

/// # Errors
///
/// Returns `GateError::Locked` if the level is not unlocked.
pub fn check_study_access(
    progress: &UserProgress,
    level: LevelId,
) -> Result<LevelState, GateError> {
    match level_state(progress, level) {
        LevelState::Locked => Err(GateError::Locked(level)),
        state => Ok(state),
    }
}

/// Exercises open once the study notes are complete, and stay open for review
/// after the level is completed.
///
/// # Errors
///
/// Returns `GateError::Locked` for a locked level and
/// `GateError::StudyIncomplete` while study notes are pending.
pub fn check_exercise_access(
    progress: &UserProgress,
    level: LevelId,
) -> Result<LevelState, GateError> {
    match level_state(progress, level) {
        LevelState::Locked => Err(GateError::Locked(level)),
        LevelState::StudyPending => Err(GateError::StudyIncomplete(level)),
        state => Ok(state),
    }
}

/// Checks that `level` may be advanced and returns the completion to apply.
///
/// # Errors
///
/// Returns the exercise-access errors, or `GateError::ExercisesIncomplete`
/// when the scorecard does not yet cover `required`.
pub fn check_advance(
    progress: &UserProgress,
    scorecard: &ExerciseScorecard,
    required: &[ExerciseKind],
) -> Result<LevelCompletion, GateError> {
    let level = scorecard.level();
    check_exercise_access(progress, level)?;
    scorecard
        .level_completion(required)
        .ok_or(GateError::ExercisesIncomplete {
            level,
            completed: required
                .iter()
                .filter(|kind| scorecard.is_completed(**kind))
                .count(),
            required: required.len(),
        })
}

//
// ─── STUDY ─────────────────────────────────────────────────────────────────────
//

/// Study sections marked as read for one level, in the order they were read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyChecklist {
    level: LevelId,
    sections: Vec<StudySection>,
}

impl StudyChecklist {
    #[must_use]
    pub fn new(level: LevelId) -> Self {
        Self {
            level,
            sections: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_persisted(level: LevelId, sections: impl IntoIterator<Item = StudySection>) -> Self {
        let mut checklist = Self::new(level);
        for section in sections {
            checklist.mark(section);
        }
        checklist
    }

    #[must_use]
    pub fn level(&self) -> LevelId {
        self.level
    }

    #[must_use]
    pub fn sections(&self) -> &[StudySection] {
        &self.sections
    }

    #[must_use]
    pub fn contains(&self, section: StudySection) -> bool {
        self.sections.contains(&section)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Returns `false` if the section was already marked.
    pub fn mark(&mut self, section: StudySection) -> bool {
        if self.contains(section) {
            return false;
        }
        self.sections.push(section);
        true
    }

    #[must_use]
    pub fn covers(&self, required: &[StudySection]) -> bool {
        required.iter().all(|section| self.contains(*section))
    }

    /// Rounded share of `required` sections read.
    #[must_use]
    pub fn percent(&self, required: &[StudySection]) -> Score {
        let done = required.iter().filter(|s| self.contains(**s)).count();
        Score::from_ratio(done, required.len())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyOutcome {
    /// Newly marked; the level still has unread sections.
    SectionRecorded,
    /// Nothing changed.
    AlreadyRecorded,
    /// The last required section was read; the level's study notes are done.
    StudyCompleted,
}

/// Marks `section` read and completes the level's study notes once every
/// `required` section is covered. Does not touch `currentLevel`.
pub fn complete_study_section(
    progress: &mut UserProgress,
    checklist: &mut StudyChecklist,
    section: StudySection,
    required: &[StudySection],
) -> StudyOutcome {
    let newly_marked = checklist.mark(section);
    if checklist.covers(required) && progress.push_study_note(checklist.level()) {
        return StudyOutcome::StudyCompleted;
    }
    if newly_marked {
        StudyOutcome::SectionRecorded
    } else {
        StudyOutcome::AlreadyRecorded
    }
}

//
// ─── EXERCISES ─────────────────────────────────────────────────────────────────
//

/// Exercise kinds completed for one level with their latest scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseScorecard {
    level: LevelId,
    completed: Vec<ExerciseKind>,
    scores: BTreeMap<ExerciseKind, Score>,
}

impl ExerciseScorecard {
    #[must_use]
    pub fn new(level: LevelId) -> Self {
        Self {
            level,
            completed: Vec::new(),
            scores: BTreeMap::new(),
        }
    }

    /// Rebuild from the two persisted halves. A completed kind without a score
    /// counts as 0; a score without a completion mark is dropped.
    #[must_use]
    pub fn from_persisted(
        level: LevelId,
        completed: impl IntoIterator<Item = ExerciseKind>,
        scores: &BTreeMap<ExerciseKind, Score>,
    ) -> Self {
        let mut card = Self::new(level);
        for kind in completed {
            let score = scores.get(&kind).copied().unwrap_or(Score::ZERO);
            card.record(kind, score);
        }
        card
    }

    #[must_use]
    pub fn level(&self) -> LevelId {
        self.level
    }

    #[must_use]
    pub fn completed(&self) -> &[ExerciseKind] {
        &self.completed
    }

    #[must_use]
    pub fn scores(&self) -> &BTreeMap<ExerciseKind, Score> {
        &self.scores
    }

    #[must_use]
    pub fn is_completed(&self, kind: ExerciseKind) -> bool {
        self.completed.contains(&kind)
    }

    #[must_use]
    pub fn score(&self, kind: ExerciseKind) -> Option<Score> {
        self.scores.get(&kind).copied()
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Overwrites any earlier score for `kind`.
    pub fn record(&mut self, kind: ExerciseKind, score: Score) {
        if !self.completed.contains(&kind) {
            self.completed.push(kind);
        }
        self.scores.insert(kind, score);
    }

    /// Rounded mean over the kinds completed so far.
    #[must_use]
    pub fn running_average(&self) -> Score {
        let scores: Vec<Score> = self.scores.values().copied().collect();
        Score::mean(&scores)
    }

    #[must_use]
    pub fn total_points(&self) -> u32 {
        self.scores.values().map(|s| u32::from(s.value())).sum()
    }

    /// `Some` once every `required` kind has a score.
    #[must_use]
    pub fn level_completion(&self, required: &[ExerciseKind]) -> Option<LevelCompletion> {
        let scores: Option<Vec<Score>> = required.iter().map(|kind| self.score(*kind)).collect();
        let scores = scores?;
        Some(LevelCompletion {
            level: self.level,
            average: Score::mean(&scores),
        })
    }
}

/// A level whose exercises are all done, ready to be advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelCompletion {
    pub level: LevelId,
    pub average: Score,
}

//
// ─── ADVANCE ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceOutcome {
    pub level: LevelId,
    pub average: Score,
    pub current_level: LevelId,
    /// `false` on replay of an already completed level.
    pub newly_completed: bool,
}

/// Records `completion` on `progress` and moves the current level on.
///
/// `currentLevel` only moves forward, so replaying an advance is a no-op and
/// the last level stays current once reached. A level's score is written
/// once, when it is first completed.
pub fn advance(progress: &mut UserProgress, completion: &LevelCompletion) -> AdvanceOutcome {
    let level = completion.level;
    let newly_completed = progress.push_completed_level(level);
    let average = match progress.score_for(level) {
        Some(kept) if !newly_completed => kept,
        _ => {
            progress.set_score(level, completion.average);
            completion.average
        }
    };
    let next = level.next().unwrap_or(level);
    progress.raise_current_level(next);

    AdvanceOutcome {
        level,
        average,
        current_level: progress.current_level(),
        newly_completed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(raw: &str) -> LevelId {
        raw.parse().unwrap()
    }

    fn score(value: u32) -> Score {
        Score::new(value).unwrap()
    }

    fn completion(raw: &str, avg: u32) -> LevelCompletion {
        LevelCompletion {
            level: level(raw),
            average: score(avg),
        }
    }

    fn progress_at(current: &str) -> UserProgress {
        UserProgress::from_persisted(Vec::new(), Vec::new(), level(current), BTreeMap::new())
    }

    #[test]
    fn fresh_progress_unlocks_only_first_level() {
        let progress = UserProgress::new();
        assert_eq!(level_state(&progress, level("C1.1")), LevelState::StudyPending);
        for other in LevelId::all().skip(1) {
            assert_eq!(level_state(&progress, other), LevelState::Locked, "{other}");
        }
    }

    #[test]
    fn unlock_is_monotonic_over_the_sequence() {
        for current in LevelId::all() {
            let progress = progress_at(&current.to_string());
            for candidate in LevelId::all() {
                if is_unlocked(&progress, candidate) {
                    for earlier in LevelId::all().take(candidate.index()) {
                        assert!(is_unlocked(&progress, earlier), "{earlier} before {candidate}");
                    }
                }
            }
        }
    }

    #[test]
    fn skipped_levels_stay_unlocked() {
        let progress = progress_at("B1.1");
        assert_eq!(level_state(&progress, level("C1.2")), LevelState::StudyPending);
        assert_eq!(level_state(&progress, level("B1.2")), LevelState::Locked);
    }

    #[test]
    fn study_done_moves_to_exercises_pending() {
        let progress = UserProgress::from_persisted(
            Vec::new(),
            vec![level("C1.1")],
            level("C1.1"),
            BTreeMap::new(),
        );
        assert_eq!(level_state(&progress, level("C1.1")), LevelState::ExercisesPending);
    }

    #[test]
    fn gates_reject_locked_and_unstudied_levels() {
        let progress = UserProgress::new();
        assert_eq!(
            check_study_access(&progress, level("C1.2")),
            Err(GateError::Locked(level("C1.2")))
        );
        assert_eq!(
            check_exercise_access(&progress, level("C1.2")),
            Err(GateError::Locked(level("C1.2")))
        );
        assert_eq!(
            check_exercise_access(&progress, level("C1.1")),
            Err(GateError::StudyIncomplete(level("C1.1")))
        );
        assert_eq!(
            check_study_access(&progress, level("C1.1")),
            Ok(LevelState::StudyPending)
        );
    }

    #[test]
    fn completed_level_stays_open_for_review() {
        let mut progress = UserProgress::new();
        advance(&mut progress, &completion("C1.1", 70));
        assert_eq!(
            check_exercise_access(&progress, level("C1.1")),
            Ok(LevelState::Completed)
        );
    }

    #[test]
    fn four_of_five_sections_do_not_complete_study() {
        let mut progress = UserProgress::new();
        let mut checklist = StudyChecklist::new(level("C1.1"));
        let required = StudySection::ALL;

        for section in &required[..4] {
            let outcome = complete_study_section(&mut progress, &mut checklist, *section, &required);
            assert_eq!(outcome, StudyOutcome::SectionRecorded);
        }
        assert!(progress.completed_study_notes().is_empty());
        assert_eq!(checklist.percent(&required).value(), 80);

        let outcome =
            complete_study_section(&mut progress, &mut checklist, required[4], &required);
        assert_eq!(outcome, StudyOutcome::StudyCompleted);
        assert_eq!(progress.completed_study_notes(), &[level("C1.1")]);
        assert_eq!(progress.current_level(), level("C1.1"));

        let outcome =
            complete_study_section(&mut progress, &mut checklist, required[4], &required);
        assert_eq!(outcome, StudyOutcome::AlreadyRecorded);
        assert_eq!(progress.completed_study_notes().len(), 1);
    }

    #[test]
    fn scorecard_needs_every_required_kind() {
        let mut card = ExerciseScorecard::new(level("C1.1"));
        let values = [100, 0, 100, 85, 67, 75, 50];
        for (kind, value) in ExerciseKind::ALL.iter().zip(values).take(6) {
            card.record(*kind, score(value));
        }
        assert_eq!(card.level_completion(&ExerciseKind::ALL), None);

        let progress = UserProgress::from_persisted(
            Vec::new(),
            vec![level("C1.1")],
            level("C1.1"),
            BTreeMap::new(),
        );
        assert_eq!(
            check_advance(&progress, &card, &ExerciseKind::ALL),
            Err(GateError::ExercisesIncomplete {
                level: level("C1.1"),
                completed: 6,
                required: 7,
            })
        );

        card.record(ExerciseKind::CulturalQuiz, score(50));
        // (100 + 0 + 100 + 85 + 67 + 75 + 50) / 7 = 68.14
        let done = card.level_completion(&ExerciseKind::ALL).unwrap();
        assert_eq!(done.average.value(), 68);
        assert_eq!(check_advance(&progress, &card, &ExerciseKind::ALL), Ok(done));
    }

    #[test]
    fn rerecording_overwrites_score() {
        let mut card = ExerciseScorecard::new(level("C1.1"));
        card.record(ExerciseKind::Writing, score(40));
        card.record(ExerciseKind::Writing, score(90));
        assert_eq!(card.completed(), &[ExerciseKind::Writing]);
        assert_eq!(card.score(ExerciseKind::Writing), Some(score(90)));
        assert_eq!(card.total_points(), 90);
    }

    #[test]
    fn persisted_scorecard_treats_missing_scores_as_zero() {
        let mut scores = BTreeMap::new();
        scores.insert(ExerciseKind::Flashcards, score(80));
        scores.insert(ExerciseKind::Writing, score(60));
        let card = ExerciseScorecard::from_persisted(
            level("C1.2"),
            [ExerciseKind::Flashcards, ExerciseKind::Listening],
            &scores,
        );
        assert_eq!(card.completed(), &[ExerciseKind::Flashcards, ExerciseKind::Listening]);
        assert_eq!(card.score(ExerciseKind::Listening), Some(Score::ZERO));
        assert_eq!(card.score(ExerciseKind::Writing), None);
        assert_eq!(card.running_average().value(), 40);
    }

    #[test]
    fn advancing_first_level_moves_to_second() {
        let mut progress = UserProgress::new();
        let outcome = advance(&mut progress, &completion("C1.1", 80));

        assert_eq!(progress.completed_levels(), &[level("C1.1")]);
        assert_eq!(progress.score_for(level("C1.1")), Some(score(80)));
        assert_eq!(progress.exercise_progress().len(), 1);
        assert_eq!(progress.current_level(), level("C1.2"));
        assert!(outcome.newly_completed);
        assert_eq!(outcome.current_level, level("C1.2"));
    }

    #[test]
    fn advance_is_idempotent() {
        let mut once = UserProgress::new();
        advance(&mut once, &completion("C1.1", 80));

        let mut twice = UserProgress::new();
        advance(&mut twice, &completion("C1.1", 80));
        let replay = advance(&mut twice, &completion("C1.1", 80));

        assert_eq!(once, twice);
        assert!(!replay.newly_completed);
    }

    #[test]
    fn replay_keeps_the_first_score() {
        let mut progress = UserProgress::new();
        advance(&mut progress, &completion("C1.1", 80));
        let replay = advance(&mut progress, &completion("C1.1", 45));

        assert_eq!(progress.score_for(level("C1.1")), Some(score(80)));
        assert_eq!(replay.average, score(80));
        assert!(!replay.newly_completed);
    }

    #[test]
    fn replaying_an_earlier_level_does_not_regress() {
        let mut progress = UserProgress::new();
        advance(&mut progress, &completion("C1.1", 80));
        advance(&mut progress, &completion("C1.2", 90));
        advance(&mut progress, &completion("C1.1", 80));
        assert_eq!(progress.current_level(), level("C2.1"));
        assert_eq!(progress.completed_levels(), &[level("C1.1"), level("C1.2")]);
    }

    #[test]
    fn last_level_is_terminal() {
        let mut progress = progress_at("A2.2");
        let outcome = advance(&mut progress, &completion("A2.2", 90));
        assert_eq!(progress.current_level(), level("A2.2"));
        assert_eq!(outcome.current_level, level("A2.2"));

        advance(&mut progress, &completion("A2.2", 90));
        let count = progress
            .completed_levels()
            .iter()
            .filter(|l| **l == level("A2.2"))
            .count();
        assert_eq!(count, 1);
        assert_eq!(progress.current_level(), level("A2.2"));
    }

    #[test]
    fn scores_exist_exactly_for_completed_levels() {
        let mut progress = UserProgress::new();
        for (raw, avg) in [("C1.1", 70), ("C1.2", 88), ("C2.1", 95)] {
            advance(&mut progress, &completion(raw, avg));
        }
        let scored: Vec<LevelId> = progress.exercise_progress().keys().copied().collect();
        let mut completed = progress.completed_levels().to_vec();
        completed.sort();
        assert_eq!(scored, completed);
        assert_eq!(progress.current_level(), level("C2.2"));
    }
}
