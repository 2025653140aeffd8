use std::fmt;
use std::str::FromStr;

use thiserror::Error;

//
// ─── EXERCISE KINDS ────────────────────────────────────────────────────────────
//

/// The seven graded activity formats of a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExerciseKind {
    FillBlanks,
    MatchFollowing,
    CompleteSentences,
    Flashcards,
    Writing,
    Listening,
    CulturalQuiz,
}

impl ExerciseKind {
    pub const ALL: [ExerciseKind; 7] = [
        ExerciseKind::FillBlanks,
        ExerciseKind::MatchFollowing,
        ExerciseKind::CompleteSentences,
        ExerciseKind::Flashcards,
        ExerciseKind::Writing,
        ExerciseKind::Listening,
        ExerciseKind::CulturalQuiz,
    ];

    /// Stable identifier used in persisted completion records.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            ExerciseKind::FillBlanks => "fill-blanks",
            ExerciseKind::MatchFollowing => "match-following",
            ExerciseKind::CompleteSentences => "complete-sentences",
            ExerciseKind::Flashcards => "flashcards",
            ExerciseKind::Writing => "writing",
            ExerciseKind::Listening => "listening",
            ExerciseKind::CulturalQuiz => "cultural",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ExerciseKind::FillBlanks => "Fill in Blanks",
            ExerciseKind::MatchFollowing => "Match Following",
            ExerciseKind::CompleteSentences => "Complete Sentences",
            ExerciseKind::Flashcards => "Flashcard Review",
            ExerciseKind::Writing => "Writing Practice",
            ExerciseKind::Listening => "Listening",
            ExerciseKind::CulturalQuiz => "Cultural Quiz",
        }
    }

    /// Pass/fail kinds report 100 or 0 instead of a proportional score.
    #[must_use]
    pub fn is_pass_fail(self) -> bool {
        matches!(
            self,
            ExerciseKind::FillBlanks | ExerciseKind::MatchFollowing | ExerciseKind::CompleteSentences
        )
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown exercise kind: {0:?}")]
pub struct ParseExerciseKindError(pub String);

impl FromStr for ExerciseKind {
    type Err = ParseExerciseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExerciseKind::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| ParseExerciseKindError(s.to_owned()))
    }
}

//
// ─── SCORES ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("score must be between 0 and 100, got {0}")]
pub struct ScoreError(pub u32);

/// Integer percentage in `0..=100`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Score(u8);

impl Score {
    pub const ZERO: Score = Score(0);
    pub const FULL: Score = Score(100);

    /// # Errors
    ///
    /// Returns `ScoreError` if `value` exceeds 100.
    pub fn new(value: u32) -> Result<Self, ScoreError> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= 100)
            .map(Self)
            .ok_or(ScoreError(value))
    }

    /// Clamps out-of-range values to 100.
    #[must_use]
    pub fn saturating(value: u32) -> Self {
        Self::new(value).unwrap_or(Self::FULL)
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// `100` for a pass, `0` for a fail.
    #[must_use]
    pub fn from_pass(passed: bool) -> Self {
        if passed { Self::FULL } else { Self::ZERO }
    }

    /// `round(correct / total * 100)`, halves rounding up. A zero total scores 0.
    #[must_use]
    pub fn from_ratio(correct: usize, total: usize) -> Self {
        if total == 0 {
            return Self::ZERO;
        }
        let correct = correct.min(total) as u64;
        let total = total as u64;
        let rounded = (200 * correct + total) / (2 * total);
        Self::saturating(u32::try_from(rounded).unwrap_or(100))
    }

    /// Rounded arithmetic mean, halves rounding up. An empty slice scores 0.
    #[must_use]
    pub fn mean(scores: &[Score]) -> Self {
        if scores.is_empty() {
            return Self::ZERO;
        }
        let n = scores.len() as u64;
        let sum: u64 = scores.iter().map(|s| u64::from(s.0)).sum();
        let rounded = (2 * sum + n) / (2 * n);
        Self::saturating(u32::try_from(rounded).unwrap_or(100))
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
