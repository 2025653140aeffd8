//! Static course content keyed by level.
//!
//! The content ships as a JSON asset compiled into the binary. Levels that do
//! not author a given study section or exercise set borrow it from the
//! fallback level, so every level resolves to a complete set of material.

mod content;

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use crate::evaluator::ExerciseSet;
use crate::model::{ExerciseKind, LevelId, StudySection};

pub use content::{
    ChoiceQuestion, CultureSection, CultureTopic, ExerciseSets, FillBlanksSet, Flashcard,
    GrammarSection, GrammarTopic, LevelContent, ListeningPassage, MatchSet, PracticeDrill,
    PracticeSection, ReadingQuestion, ReadingSection, ReadingText, SectionContent,
    StudyMaterial, TranslationPair, VocabularyCategory, VocabularySection, VocabularyWord,
    WritingPrompt,
};

const EMBEDDED_CATALOG: &str = include_str!("../../data/catalog.json");

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("fallback level {level} has no content")]
    MissingFallback { level: LevelId },

    #[error("no {part} content for {level} and none on the fallback level")]
    Incomplete { level: LevelId, part: &'static str },

    #[error("{kind} answer key for {level} is invalid: {detail}")]
    InvalidAnswerKey {
        level: LevelId,
        kind: ExerciseKind,
        detail: String,
    },
}

#[derive(Deserialize)]
struct RawCatalog {
    fallback_level: LevelId,
    levels: BTreeMap<LevelId, LevelContent>,
}

/// Read-only content for all twelve levels.
#[derive(Debug, Clone)]
pub struct Catalog {
    fallback: LevelId,
    levels: BTreeMap<LevelId, LevelContent>,
}

impl Catalog {
    /// Load the catalog compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the asset is malformed or incomplete.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Parse, resolve fallbacks and validate a catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the JSON is malformed, the fallback level is
    /// missing content, or an answer key points outside its options.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(raw)?;
        let fallback = raw
            .levels
            .get(&raw.fallback_level)
            .cloned()
            .ok_or(CatalogError::MissingFallback {
                level: raw.fallback_level,
            })?;

        let mut levels = BTreeMap::new();
        for level in LevelId::all() {
            let authored = raw.levels.get(&level).cloned().unwrap_or_default();
            let resolved = resolve(level, authored, &fallback)?;
            validate_answer_keys(level, &resolved.exercises)?;
            levels.insert(level, resolved);
        }

        Ok(Self {
            fallback: raw.fallback_level,
            levels,
        })
    }

    #[must_use]
    pub fn fallback_level(&self) -> LevelId {
        self.fallback
    }

    /// Authored title, or the tier description when the level has none.
    #[must_use]
    pub fn level_title(&self, level: LevelId) -> &str {
        self.levels
            .get(&level)
            .and_then(|content| content.title.as_deref())
            .unwrap_or_else(|| level.tier().description())
    }

    /// Study sections a learner must read before the level's study notes count
    /// as complete.
    #[must_use]
    pub fn study_sections(&self, level: LevelId) -> Vec<StudySection> {
        StudySection::ALL
            .into_iter()
            .filter(|section| self.section(level, *section).is_some())
            .collect()
    }

    /// Exercise kinds a learner must finish before the level can be advanced.
    #[must_use]
    pub fn exercise_kinds(&self, level: LevelId) -> Vec<ExerciseKind> {
        ExerciseKind::ALL
            .into_iter()
            .filter(|kind| self.exercise_set(level, *kind).is_some())
            .collect()
    }

    #[must_use]
    pub fn section(&self, level: LevelId, section: StudySection) -> Option<SectionContent<'_>> {
        let study = &self.levels.get(&level)?.study;
        match section {
            StudySection::Vocabulary => study.vocabulary.as_ref().map(SectionContent::Vocabulary),
            StudySection::Grammar => study.grammar.as_ref().map(SectionContent::Grammar),
            StudySection::Culture => study.culture.as_ref().map(SectionContent::Culture),
            StudySection::Reading => study.reading.as_ref().map(SectionContent::Reading),
            StudySection::Practice => study.practice.as_ref().map(SectionContent::Practice),
        }
    }

    #[must_use]
    pub fn exercise_set(&self, level: LevelId, kind: ExerciseKind) -> Option<ExerciseSet<'_>> {
        let sets = &self.levels.get(&level)?.exercises;
        match kind {
            ExerciseKind::FillBlanks => sets.fill_blanks.as_ref().map(ExerciseSet::FillBlanks),
            ExerciseKind::MatchFollowing => sets.matching.as_ref().map(ExerciseSet::MatchFollowing),
            ExerciseKind::CompleteSentences => sets
                .sentences
                .as_deref()
                .map(ExerciseSet::CompleteSentences),
            ExerciseKind::Flashcards => sets.flashcards.as_deref().map(ExerciseSet::Flashcards),
            ExerciseKind::Writing => sets.writing.as_deref().map(ExerciseSet::Writing),
            ExerciseKind::Listening => sets.listening.as_deref().map(ExerciseSet::Listening),
            ExerciseKind::CulturalQuiz => {
                sets.cultural_quiz.as_deref().map(ExerciseSet::CulturalQuiz)
            }
        }
    }
}

fn resolve(
    level: LevelId,
    authored: LevelContent,
    fallback: &LevelContent,
) -> Result<LevelContent, CatalogError> {
    fn pick<T: Clone>(
        level: LevelId,
        part: &'static str,
        own: Option<T>,
        fallback: Option<&T>,
    ) -> Result<Option<T>, CatalogError> {
        own.or_else(|| fallback.cloned())
            .map(Some)
            .ok_or(CatalogError::Incomplete { level, part })
    }

    let (own, base) = (authored.study, &fallback.study);
    let study = StudyMaterial {
        vocabulary: pick(level, "vocabulary", own.vocabulary, base.vocabulary.as_ref())?,
        grammar: pick(level, "grammar", own.grammar, base.grammar.as_ref())?,
        culture: pick(level, "culture", own.culture, base.culture.as_ref())?,
        reading: pick(level, "reading", own.reading, base.reading.as_ref())?,
        practice: pick(level, "practice", own.practice, base.practice.as_ref())?,
    };

    let (own, base) = (authored.exercises, &fallback.exercises);
    let exercises = ExerciseSets {
        fill_blanks: pick(level, "fill-blanks", own.fill_blanks, base.fill_blanks.as_ref())?,
        matching: pick(level, "matching", own.matching, base.matching.as_ref())?,
        sentences: pick(level, "sentences", own.sentences, base.sentences.as_ref())?,
        flashcards: pick(level, "flashcards", own.flashcards, base.flashcards.as_ref())?,
        writing: pick(level, "writing", own.writing, base.writing.as_ref())?,
        listening: pick(level, "listening", own.listening, base.listening.as_ref())?,
        cultural_quiz: pick(level, "cultural", own.cultural_quiz, base.cultural_quiz.as_ref())?,
    };

    Ok(LevelContent {
        title: authored.title,
        study,
        exercises,
    })
}

fn validate_answer_keys(level: LevelId, sets: &ExerciseSets) -> Result<(), CatalogError> {
    let invalid = |kind: ExerciseKind, detail: String| CatalogError::InvalidAnswerKey {
        level,
        kind,
        detail,
    };

    if let Some(fill) = &sets.fill_blanks {
        let gaps = fill.fragments().len().saturating_sub(1);
        if gaps != fill.blanks.len() {
            return Err(invalid(
                ExerciseKind::FillBlanks,
                format!("{gaps} gaps but {} answers", fill.blanks.len()),
            ));
        }
    }

    if let Some(matching) = &sets.matching {
        if matching.correct.len() != matching.left.len() {
            return Err(invalid(
                ExerciseKind::MatchFollowing,
                format!(
                    "{} keys for {} items",
                    matching.correct.len(),
                    matching.left.len()
                ),
            ));
        }
        if let Some(bad) = matching.correct.iter().find(|r| **r >= matching.right.len()) {
            return Err(invalid(
                ExerciseKind::MatchFollowing,
                format!("right index {bad} out of range"),
            ));
        }
    }

    let check_choices = |kind: ExerciseKind, questions: &[ChoiceQuestion]| {
        questions
            .iter()
            .position(|q| q.correct_option().is_none())
            .map_or(Ok(()), |idx| {
                let detail = format!("question {idx} has no option {}", questions[idx].correct);
                Err(invalid(kind, detail))
            })
    };

    if let Some(sentences) = &sets.sentences {
        check_choices(ExerciseKind::CompleteSentences, sentences)?;
    }
    if let Some(quiz) = &sets.cultural_quiz {
        check_choices(ExerciseKind::CulturalQuiz, quiz)?;
    }
    if let Some(passages) = &sets.listening {
        for passage in passages {
            check_choices(ExerciseKind::Listening, &passage.questions)?;
        }
    }

    Ok(())
}
