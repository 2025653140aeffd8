//! Persisted JSON shapes.
//!
//! Decoding is tolerant: unknown level, section or exercise identifiers are
//! skipped, scores are clamped into range, and a missing or `null` field
//! reads as its default. Nothing here fails on stale or partial data.

use std::collections::BTreeMap;

use course_core::model::{ExerciseKind, StudySection, User};
use course_core::{LevelId, Score, UserProgress};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// Integer percentage that accepts any JSON number and clamps it to `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PersistedScore(u32);

impl PersistedScore {
    #[must_use]
    pub fn from_score(score: Score) -> Self {
        Self(u32::from(score.value()))
    }

    #[must_use]
    pub fn into_score(self) -> Score {
        Score::saturating(self.0)
    }
}

impl<'de> Deserialize<'de> for PersistedScore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        let clamped = if raw.is_finite() { raw.round().clamp(0.0, 100.0) } else { 0.0 };
        // integral and within 0..=100 at this point
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let value = clamped as u32;
        Ok(Self(value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub avatar: String,
}

impl UserRecord {
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
        }
    }

    #[must_use]
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
            avatar: self.avatar,
        }
    }
}

/// The `progress` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed_levels: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed_study_notes: Vec<String>,
    #[serde(default)]
    pub current_level: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub exercise_progress: BTreeMap<String, PersistedScore>,
}

impl ProgressRecord {
    #[must_use]
    pub fn from_progress(progress: &UserProgress) -> Self {
        Self {
            completed_levels: progress.completed_levels().iter().map(ToString::to_string).collect(),
            completed_study_notes: progress
                .completed_study_notes()
                .iter()
                .map(ToString::to_string)
                .collect(),
            current_level: Some(progress.current_level().to_string()),
            exercise_progress: progress
                .exercise_progress()
                .iter()
                .map(|(level, score)| (level.to_string(), PersistedScore::from_score(*score)))
                .collect(),
        }
    }

    /// Convert back into the domain record, repairing what it can.
    #[must_use]
    pub fn into_progress(self) -> UserProgress {
        let current_level = self
            .current_level
            .as_deref()
            .and_then(|raw| parse_or_skip::<LevelId>("currentLevel", raw))
            .unwrap_or(LevelId::FIRST);
        let scores = self
            .exercise_progress
            .iter()
            .filter_map(|(raw, score)| {
                parse_or_skip::<LevelId>("exerciseProgress", raw).map(|l| (l, score.into_score()))
            })
            .collect();

        UserProgress::from_persisted(
            parse_all("completedLevels", &self.completed_levels),
            parse_all("completedStudyNotes", &self.completed_study_notes),
            current_level,
            scores,
        )
    }
}

/// `study-{level}-completed`: section keys in reading order.
#[must_use]
pub fn study_sections_from_record(raw: &[String]) -> Vec<StudySection> {
    parse_all("study sections", raw)
}

#[must_use]
pub fn study_sections_to_record(sections: &[StudySection]) -> Vec<String> {
    sections.iter().map(|s| s.key().to_owned()).collect()
}

/// `exercises-{level}-completed`: exercise identifiers in completion order.
#[must_use]
pub fn exercise_kinds_from_record(raw: &[String]) -> Vec<ExerciseKind> {
    parse_all("completed exercises", raw)
}

#[must_use]
pub fn exercise_kinds_to_record(kinds: &[ExerciseKind]) -> Vec<String> {
    kinds.iter().map(|k| k.key().to_owned()).collect()
}

/// `exercises-{level}-scores`: identifier to score.
#[must_use]
pub fn exercise_scores_from_record(
    raw: &BTreeMap<String, PersistedScore>,
) -> BTreeMap<ExerciseKind, Score> {
    raw.iter()
        .filter_map(|(key, score)| {
            parse_or_skip::<ExerciseKind>("exercise scores", key).map(|k| (k, score.into_score()))
        })
        .collect()
}

#[must_use]
pub fn exercise_scores_to_record(
    scores: &BTreeMap<ExerciseKind, Score>,
) -> BTreeMap<String, PersistedScore> {
    scores
        .iter()
        .map(|(kind, score)| (kind.key().to_owned(), PersistedScore::from_score(*score)))
        .collect()
}

/// `null` decodes like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn parse_or_skip<T: std::str::FromStr>(field: &str, raw: &str) -> Option<T> {
    let parsed = raw.parse().ok();
    if parsed.is_none() {
        warn!(field, value = raw, "skipping unknown identifier in stored record");
    }
    parsed
}

fn parse_all<T: std::str::FromStr>(field: &str, raw: &[String]) -> Vec<T> {
    raw.iter().filter_map(|r| parse_or_skip(field, r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(raw: &str) -> LevelId {
        raw.parse().unwrap()
    }

    #[test]
    fn record_without_study_notes_reads_as_empty() {
        let json = r#"{"completedLevels":["C1.1"],"currentLevel":"C1.2","exerciseProgress":{"C1.1":80}}"#;
        let record: ProgressRecord = serde_json::from_str(json).unwrap();
        let progress = record.into_progress();

        assert!(progress.completed_study_notes().is_empty());
        assert_eq!(progress.current_level(), level("C1.2"));
        assert_eq!(progress.score_for(level("C1.1")).map(Score::value), Some(80));
    }

    #[test]
    fn null_fields_read_as_empty() {
        let json = r#"{
            "completedLevels":["C1.1","C1.2"],
            "completedStudyNotes":null,
            "currentLevel":"C2.1",
            "exerciseProgress":{"C1.1":80,"C1.2":90}
        }"#;
        let record: ProgressRecord = serde_json::from_str(json).unwrap();
        let progress = record.into_progress();

        assert_eq!(progress.completed_levels(), &[level("C1.1"), level("C1.2")]);
        assert!(progress.completed_study_notes().is_empty());
        assert_eq!(progress.current_level(), level("C2.1"));
        assert_eq!(progress.score_for(level("C1.2")).map(Score::value), Some(90));

        let json = r#"{"completedLevels":null,"currentLevel":null,"exerciseProgress":null}"#;
        let record: ProgressRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.into_progress(), UserProgress::new());
    }

    #[test]
    fn unknown_levels_are_skipped() {
        let json = r#"{
            "completedLevels":["C1.1","Z9.9"],
            "completedStudyNotes":["nope","C1.1"],
            "currentLevel":"X1.1",
            "exerciseProgress":{"C1.1":72.6,"Q1.1":10}
        }"#;
        let record: ProgressRecord = serde_json::from_str(json).unwrap();
        let progress = record.into_progress();

        assert_eq!(progress.completed_levels(), &[level("C1.1")]);
        assert_eq!(progress.completed_study_notes(), &[level("C1.1")]);
        // an unreadable current level falls back to the first
        assert_eq!(progress.current_level(), level("C1.1"));
        assert_eq!(progress.score_for(level("C1.1")).map(Score::value), Some(73));
    }

    #[test]
    fn scores_are_clamped() {
        let raw: BTreeMap<String, PersistedScore> =
            serde_json::from_str(r#"{"writing":250,"listening":-5,"cultural":66.5,"bogus":1}"#)
                .unwrap();
        let scores = exercise_scores_from_record(&raw);
        assert_eq!(scores.len(), 3);
        assert_eq!(scores[&ExerciseKind::Writing], Score::FULL);
        assert_eq!(scores[&ExerciseKind::Listening], Score::ZERO);
        assert_eq!(scores[&ExerciseKind::CulturalQuiz].value(), 67);
    }

    #[test]
    fn progress_round_trips_with_camel_case_keys() {
        let record = ProgressRecord::from_progress(&UserProgress::new());
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"completedLevels\":[]"));
        assert!(json.contains("\"completedStudyNotes\":[]"));
        assert!(json.contains("\"currentLevel\":\"C1.1\""));
        assert!(json.contains("\"exerciseProgress\":{}"));

        let back: ProgressRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.into_progress(), UserProgress::new());
    }

    #[test]
    fn practice_section_persists_as_exercises() {
        let keys = study_sections_to_record(&[StudySection::Practice, StudySection::Grammar]);
        assert_eq!(keys, ["exercises", "grammar"]);
        let raw = vec!["vocabulary".to_owned(), "exercises".to_owned(), "other".to_owned()];
        assert_eq!(
            study_sections_from_record(&raw),
            [StudySection::Vocabulary, StudySection::Practice]
        );
    }
}
