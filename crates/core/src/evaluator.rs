//! Scoring for the seven exercise formats.
//!
//! Each format pairs a borrowed [`ExerciseSet`] from the catalog with the
//! learner's [`ExerciseResponse`]. Evaluation is pure: the same set and
//! response always produce the same [`Evaluation`].

use std::collections::BTreeMap;

use thiserror::Error;

use crate::catalog::{
    ChoiceQuestion, FillBlanksSet, Flashcard, ListeningPassage, MatchSet, WritingPrompt,
};
use crate::model::{ExerciseKind, Score};

/// Correct gaps needed to pass fill-in-blanks.
pub const FILL_BLANKS_PASS: usize = 2;
/// Correct pairs needed to pass matching.
pub const MATCH_PASS: usize = 3;
/// Correct selections needed to pass sentence completion.
pub const SENTENCES_PASS: usize = 2;
/// A writing answer counts once its trimmed text is longer than this.
pub const WRITING_MIN_CHARS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("a {found} response cannot be scored against a {expected} exercise")]
    KindMismatch {
        expected: ExerciseKind,
        found: ExerciseKind,
    },
}

/// One level's content for one exercise kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseSet<'a> {
    FillBlanks(&'a FillBlanksSet),
    MatchFollowing(&'a MatchSet),
    CompleteSentences(&'a [ChoiceQuestion]),
    Flashcards(&'a [Flashcard]),
    Writing(&'a [WritingPrompt]),
    Listening(&'a [ListeningPassage]),
    CulturalQuiz(&'a [ChoiceQuestion]),
}

impl ExerciseSet<'_> {
    #[must_use]
    pub fn kind(&self) -> ExerciseKind {
        match self {
            ExerciseSet::FillBlanks(_) => ExerciseKind::FillBlanks,
            ExerciseSet::MatchFollowing(_) => ExerciseKind::MatchFollowing,
            ExerciseSet::CompleteSentences(_) => ExerciseKind::CompleteSentences,
            ExerciseSet::Flashcards(_) => ExerciseKind::Flashcards,
            ExerciseSet::Writing(_) => ExerciseKind::Writing,
            ExerciseSet::Listening(_) => ExerciseKind::Listening,
            ExerciseSet::CulturalQuiz(_) => ExerciseKind::CulturalQuiz,
        }
    }

    /// Number of scored items in the set.
    #[must_use]
    pub fn item_count(&self) -> usize {
        match self {
            ExerciseSet::FillBlanks(set) => set.blanks.len(),
            ExerciseSet::MatchFollowing(set) => set.left.len(),
            ExerciseSet::CompleteSentences(questions) | ExerciseSet::CulturalQuiz(questions) => {
                questions.len()
            }
            ExerciseSet::Flashcards(cards) => cards.len(),
            ExerciseSet::Writing(prompts) => prompts.len(),
            ExerciseSet::Listening(passages) => passages.iter().map(|p| p.questions.len()).sum(),
        }
    }
}

/// Learner input for one exercise kind. Missing entries count as wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExerciseResponse {
    /// Typed word per gap.
    FillBlanks(Vec<String>),
    MatchFollowing(MatchBoard),
    /// Selected option per sentence.
    CompleteSentences(Vec<Option<usize>>),
    /// Self-graded `known` flag per card.
    Flashcards(Vec<bool>),
    /// Free text per prompt.
    Writing(Vec<String>),
    /// Selected option keyed by `(passage, question)`.
    Listening(BTreeMap<(usize, usize), usize>),
    /// Selected option per question.
    CulturalQuiz(Vec<Option<usize>>),
}

impl ExerciseResponse {
    #[must_use]
    pub fn kind(&self) -> ExerciseKind {
        match self {
            ExerciseResponse::FillBlanks(_) => ExerciseKind::FillBlanks,
            ExerciseResponse::MatchFollowing(_) => ExerciseKind::MatchFollowing,
            ExerciseResponse::CompleteSentences(_) => ExerciseKind::CompleteSentences,
            ExerciseResponse::Flashcards(_) => ExerciseKind::Flashcards,
            ExerciseResponse::Writing(_) => ExerciseKind::Writing,
            ExerciseResponse::Listening(_) => ExerciseKind::Listening,
            ExerciseResponse::CulturalQuiz(_) => ExerciseKind::CulturalQuiz,
        }
    }
}

/// Outcome of scoring one response.
///
/// `passed` only gates pass/fail kinds; proportional kinds always pass once
/// submitted and carry their grade in `score`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub kind: ExerciseKind,
    pub correct: usize,
    pub total: usize,
    pub passed: bool,
    pub score: Score,
}

/// Score `response` against `set`.
///
/// # Errors
///
/// Returns `EvaluationError::KindMismatch` if the response is for a different
/// exercise kind than the set.
pub fn evaluate(
    set: ExerciseSet<'_>,
    response: &ExerciseResponse,
) -> Result<Evaluation, EvaluationError> {
    let kind = set.kind();
    let total = set.item_count();
    let correct = match (set, response) {
        (ExerciseSet::FillBlanks(set), ExerciseResponse::FillBlanks(answers)) => {
            count_fill_blanks(set, answers)
        }
        (ExerciseSet::MatchFollowing(set), ExerciseResponse::MatchFollowing(board)) => {
            board.correct_pairs(set)
        }
        (ExerciseSet::CompleteSentences(qs), ExerciseResponse::CompleteSentences(picks))
        | (ExerciseSet::CulturalQuiz(qs), ExerciseResponse::CulturalQuiz(picks)) => {
            count_choices(qs, picks)
        }
        (ExerciseSet::Flashcards(cards), ExerciseResponse::Flashcards(known)) => {
            known.iter().take(cards.len()).filter(|k| **k).count()
        }
        (ExerciseSet::Writing(prompts), ExerciseResponse::Writing(answers)) => answers
            .iter()
            .take(prompts.len())
            .filter(|answer| answer.trim().chars().count() > WRITING_MIN_CHARS)
            .count(),
        (ExerciseSet::Listening(passages), ExerciseResponse::Listening(picks)) => {
            count_listening(passages, picks)
        }
        _ => {
            return Err(EvaluationError::KindMismatch {
                expected: kind,
                found: response.kind(),
            });
        }
    };

    let (passed, score) = match kind {
        ExerciseKind::FillBlanks => pass_fail(correct, FILL_BLANKS_PASS, total),
        ExerciseKind::MatchFollowing => pass_fail(correct, MATCH_PASS, total),
        ExerciseKind::CompleteSentences => pass_fail(correct, SENTENCES_PASS, total),
        _ => (true, Score::from_ratio(correct, total)),
    };

    Ok(Evaluation {
        kind,
        correct,
        total,
        passed,
        score,
    })
}

// Thresholds are capped at the set size so shorter sets stay passable.
fn pass_fail(correct: usize, threshold: usize, total: usize) -> (bool, Score) {
    let passed = correct >= threshold.min(total);
    (passed, Score::from_pass(passed))
}

fn normalize_answer(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn count_fill_blanks(set: &FillBlanksSet, answers: &[String]) -> usize {
    set.blanks
        .iter()
        .zip(answers)
        .filter(|(expected, given)| normalize_answer(expected) == normalize_answer(given))
        .count()
}

fn count_choices(questions: &[ChoiceQuestion], picks: &[Option<usize>]) -> usize {
    questions
        .iter()
        .zip(picks)
        .filter(|(question, pick)| **pick == Some(question.correct))
        .count()
}

fn count_listening(
    passages: &[ListeningPassage],
    picks: &BTreeMap<(usize, usize), usize>,
) -> usize {
    passages
        .iter()
        .enumerate()
        .flat_map(|(p, passage)| {
            passage
                .questions
                .iter()
                .enumerate()
                .map(move |(q, question)| ((p, q), question.correct))
        })
        .filter(|(key, correct)| picks.get(key) == Some(correct))
        .count()
}

//
// ─── MATCHING ──────────────────────────────────────────────────────────────────
//

/// Left-to-right pairings chosen so far in a matching exercise.
///
/// Each right item is used at most once: pairing a right item that is already
/// taken releases it from its previous left item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchBoard {
    pairs: BTreeMap<usize, usize>,
}

impl MatchBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pair(&mut self, left: usize, right: usize) {
        self.pairs.retain(|_, r| *r != right);
        self.pairs.insert(left, right);
    }

    pub fn unpair(&mut self, left: usize) -> Option<usize> {
        self.pairs.remove(&left)
    }

    #[must_use]
    pub fn right_for(&self, left: usize) -> Option<usize> {
        self.pairs.get(&left).copied()
    }

    #[must_use]
    pub fn left_for(&self, right: usize) -> Option<usize> {
        self.pairs
            .iter()
            .find_map(|(l, r)| (*r == right).then_some(*l))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pairs.iter().map(|(l, r)| (*l, *r))
    }

    #[must_use]
    pub fn correct_pairs(&self, set: &MatchSet) -> usize {
        self.pairs
            .iter()
            .filter(|(left, right)| set.correct.get(**left) == Some(*right))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::model::LevelId;

    fn catalog() -> Catalog {
        Catalog::embedded().unwrap()
    }

    fn set(catalog: &Catalog, kind: ExerciseKind) -> ExerciseSet<'_> {
        catalog.exercise_set(LevelId::FIRST, kind).unwrap()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn fill_blanks_ignores_case_and_whitespace() {
        let catalog = catalog();
        // C1.1 expects heiße / komme / spreche
        let response = ExerciseResponse::FillBlanks(strings(&[" Heiße ", "KOMME", "sprich"]));
        let eval = evaluate(set(&catalog, ExerciseKind::FillBlanks), &response).unwrap();
        assert_eq!((eval.correct, eval.total), (2, 3));
        assert!(eval.passed);
        assert_eq!(eval.score, Score::FULL);
    }

    #[test]
    fn fill_blanks_fails_below_two_correct() {
        let catalog = catalog();
        let response = ExerciseResponse::FillBlanks(strings(&["heiße"]));
        let eval = evaluate(set(&catalog, ExerciseKind::FillBlanks), &response).unwrap();
        assert_eq!(eval.correct, 1);
        assert!(!eval.passed);
        assert_eq!(eval.score, Score::ZERO);
    }

    #[test]
    fn matching_needs_three_of_four() {
        let catalog = catalog();
        let ExerciseSet::MatchFollowing(matching) = set(&catalog, ExerciseKind::MatchFollowing)
        else {
            panic!("wrong set");
        };

        let mut board = MatchBoard::new();
        for (left, right) in matching.correct.iter().enumerate().take(2) {
            board.pair(left, *right);
        }
        let response = ExerciseResponse::MatchFollowing(board.clone());
        let eval = evaluate(ExerciseSet::MatchFollowing(matching), &response).unwrap();
        assert_eq!(eval.correct, 2);
        assert!(!eval.passed);

        board.pair(2, matching.correct[2]);
        let response = ExerciseResponse::MatchFollowing(board);
        let eval = evaluate(ExerciseSet::MatchFollowing(matching), &response).unwrap();
        assert_eq!(eval.correct, 3);
        assert_eq!(eval.score, Score::FULL);
    }

    #[test]
    fn match_board_releases_reused_right_item() {
        let mut board = MatchBoard::new();
        board.pair(0, 2);
        board.pair(1, 2);
        assert_eq!(board.right_for(0), None);
        assert_eq!(board.right_for(1), Some(2));
        assert_eq!(board.left_for(2), Some(1));
        assert_eq!(board.len(), 1);

        board.pair(1, 3);
        assert_eq!(board.left_for(2), None);
        assert_eq!(board.unpair(1), Some(3));
        assert!(board.is_empty());
    }

    #[test]
    fn sentences_pass_at_two_of_three() {
        let catalog = catalog();
        // C1.1 answer key is 0, 2, 3
        let response = ExerciseResponse::CompleteSentences(vec![Some(0), Some(1), Some(3)]);
        let eval = evaluate(set(&catalog, ExerciseKind::CompleteSentences), &response).unwrap();
        assert_eq!(eval.correct, 2);
        assert!(eval.passed);

        let response = ExerciseResponse::CompleteSentences(vec![Some(0), None, None]);
        let eval = evaluate(set(&catalog, ExerciseKind::CompleteSentences), &response).unwrap();
        assert!(!eval.passed);
        assert_eq!(eval.score, Score::ZERO);
    }

    #[test]
    fn flashcards_score_known_share() {
        let catalog = catalog();
        let deck = set(&catalog, ExerciseKind::Flashcards);
        let total = deck.item_count();
        let known: Vec<bool> = (0..total).map(|i| i % 4 != 0).collect();
        let expected = known.iter().filter(|k| **k).count();

        let eval = evaluate(deck, &ExerciseResponse::Flashcards(known)).unwrap();
        assert_eq!(eval.correct, expected);
        assert_eq!(eval.score, Score::from_ratio(expected, total));
        assert!(eval.passed);
    }

    #[test]
    fn writing_counts_answers_longer_than_ten_chars() {
        let catalog = catalog();
        let prompts = set(&catalog, ExerciseKind::Writing);
        let total = prompts.item_count();
        let mut answers = vec![String::new(); total];
        answers[0] = "Ich heiße Anna und komme aus Berlin.".to_owned();
        if total > 1 {
            // exactly ten characters after trimming does not count
            answers[1] = "   abcdefghij   ".to_owned();
        }

        let eval = evaluate(prompts, &ExerciseResponse::Writing(answers)).unwrap();
        assert_eq!(eval.correct, 1);
        assert_eq!(eval.score, Score::from_ratio(1, total));
    }

    #[test]
    fn listening_scores_across_passages() {
        let catalog = catalog();
        let ExerciseSet::Listening(passages) = set(&catalog, ExerciseKind::Listening) else {
            panic!("wrong set");
        };
        let mut picks = BTreeMap::new();
        for (p, passage) in passages.iter().enumerate() {
            for (q, question) in passage.questions.iter().enumerate() {
                picks.insert((p, q), question.correct);
            }
        }
        // spoil one answer
        if let Some(first) = picks.get_mut(&(0, 0)) {
            *first += 1;
        }
        let total: usize = passages.iter().map(|p| p.questions.len()).sum();

        let eval = evaluate(
            ExerciseSet::Listening(passages),
            &ExerciseResponse::Listening(picks),
        )
        .unwrap();
        assert_eq!((eval.correct, eval.total), (total - 1, total));
        assert_eq!(eval.score, Score::from_ratio(total - 1, total));
    }

    #[test]
    fn cultural_quiz_is_proportional() {
        let catalog = catalog();
        let ExerciseSet::CulturalQuiz(questions) = set(&catalog, ExerciseKind::CulturalQuiz) else {
            panic!("wrong set");
        };
        let picks = vec![Some(questions[0].correct)];
        let eval = evaluate(
            ExerciseSet::CulturalQuiz(questions),
            &ExerciseResponse::CulturalQuiz(picks),
        )
        .unwrap();
        assert_eq!(eval.correct, 1);
        assert_eq!(eval.score, Score::from_ratio(1, questions.len()));
    }

    #[test]
    fn mismatched_kind_is_rejected() {
        let catalog = catalog();
        let err = evaluate(
            set(&catalog, ExerciseKind::Writing),
            &ExerciseResponse::Flashcards(vec![true]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            EvaluationError::KindMismatch {
                expected: ExerciseKind::Writing,
                found: ExerciseKind::Flashcards,
            }
        );
    }

    #[test]
    fn evaluation_is_deterministic() {
        let catalog = catalog();
        let response = ExerciseResponse::CompleteSentences(vec![Some(0), Some(2), None]);
        let first = evaluate(set(&catalog, ExerciseKind::CompleteSentences), &response);
        let second = evaluate(set(&catalog, ExerciseKind::CompleteSentences), &response);
        assert_eq!(first, second);
    }
}
