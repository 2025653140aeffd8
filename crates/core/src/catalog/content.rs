//! Typed shapes of the embedded course content.

use serde::Deserialize;

//
// ─── STUDY MATERIAL ────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VocabularyWord {
    pub german: String,
    pub english: String,
    pub example: String,
    pub pronunciation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VocabularyCategory {
    pub category: String,
    pub words: Vec<VocabularyWord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VocabularySection {
    pub title: String,
    pub categories: Vec<VocabularyCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GrammarTopic {
    pub topic: String,
    pub explanation: String,
    #[serde(default)]
    pub rules: Vec<String>,
    #[serde(default)]
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GrammarSection {
    pub title: String,
    pub topics: Vec<GrammarTopic>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CultureTopic {
    pub topic: String,
    pub description: String,
    #[serde(default)]
    pub points: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CultureSection {
    pub title: String,
    pub topics: Vec<CultureTopic>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReadingQuestion {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReadingText {
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub questions: Vec<ReadingQuestion>,
}

impl ReadingText {
    /// Non-empty paragraphs of the text.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n').map(str::trim).filter(|p| !p.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReadingSection {
    pub title: String,
    pub texts: Vec<ReadingText>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TranslationPair {
    pub english: String,
    pub german: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PracticeDrill {
    pub kind: String,
    pub instructions: String,
    pub questions: Vec<TranslationPair>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PracticeSection {
    pub title: String,
    pub drills: Vec<PracticeDrill>,
}

/// Study material as authored for one level. Any section may be absent and
/// is then resolved from the fallback level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StudyMaterial {
    pub vocabulary: Option<VocabularySection>,
    pub grammar: Option<GrammarSection>,
    pub culture: Option<CultureSection>,
    pub reading: Option<ReadingSection>,
    pub practice: Option<PracticeSection>,
}

/// One resolved study section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionContent<'a> {
    Vocabulary(&'a VocabularySection),
    Grammar(&'a GrammarSection),
    Culture(&'a CultureSection),
    Reading(&'a ReadingSection),
    Practice(&'a PracticeSection),
}

impl SectionContent<'_> {
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            SectionContent::Vocabulary(s) => &s.title,
            SectionContent::Grammar(s) => &s.title,
            SectionContent::Culture(s) => &s.title,
            SectionContent::Reading(s) => &s.title,
            SectionContent::Practice(s) => &s.title,
        }
    }
}

//
// ─── EXERCISE SETS ─────────────────────────────────────────────────────────────
//

/// A passage with `_____` gaps and the expected word for each gap.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FillBlanksSet {
    pub text: String,
    pub blanks: Vec<String>,
    pub translation: String,
}

impl FillBlanksSet {
    pub const GAP: &'static str = "_____";

    /// Text fragments around the gaps; always `blanks.len() + 1` long for
    /// well-formed content.
    #[must_use]
    pub fn fragments(&self) -> Vec<&str> {
        self.text.split(Self::GAP).collect()
    }
}

/// `correct[left] == right` is the answer key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MatchSet {
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub correct: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChoiceQuestion {
    #[serde(alias = "sentence")]
    pub question: String,
    pub options: Vec<String>,
    pub correct: usize,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl ChoiceQuestion {
    #[must_use]
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Flashcard {
    pub german: String,
    pub english: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WritingPrompt {
    pub prompt: String,
    #[serde(default)]
    pub hints: Vec<String>,
    pub sample_answer: String,
    /// Suggested `[min, max]` word range; advisory only.
    pub word_count: [u32; 2],
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListeningPassage {
    pub title: String,
    pub description: String,
    pub transcript: String,
    pub questions: Vec<ChoiceQuestion>,
}

/// Exercise content as authored for one level; missing sets resolve from the
/// fallback level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExerciseSets {
    pub fill_blanks: Option<FillBlanksSet>,
    pub matching: Option<MatchSet>,
    pub sentences: Option<Vec<ChoiceQuestion>>,
    pub flashcards: Option<Vec<Flashcard>>,
    pub writing: Option<Vec<WritingPrompt>>,
    pub listening: Option<Vec<ListeningPassage>>,
    pub cultural_quiz: Option<Vec<ChoiceQuestion>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LevelContent {
    pub title: Option<String>,
    #[serde(default)]
    pub study: StudyMaterial,
    #[serde(default)]
    pub exercises: ExerciseSets,
}
