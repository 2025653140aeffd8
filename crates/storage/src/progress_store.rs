use std::collections::BTreeMap;
use std::sync::Arc;

use course_core::model::User;
use course_core::progression::{ExerciseScorecard, StudyChecklist};
use course_core::{LevelId, UserProgress};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::keys;
use crate::records::{
    PersistedScore, ProgressRecord, UserRecord, exercise_kinds_from_record,
    exercise_kinds_to_record, exercise_scores_from_record, exercise_scores_to_record,
    study_sections_from_record, study_sections_to_record,
};
use crate::repository::{KeyValueStore, StorageError};

/// Typed access to the learner's records in a [`KeyValueStore`].
///
/// Every record is one JSON document under one key, written whole.
#[derive(Clone)]
pub struct ProgressStore {
    kv: Arc<dyn KeyValueStore>,
}

impl ProgressStore {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn load_user(&self) -> Result<Option<User>, StorageError> {
        let record: Option<UserRecord> = self.load(keys::USER).await?;
        Ok(record.map(UserRecord::into_user))
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be written.
    pub async fn save_user(&self, user: &User) -> Result<(), StorageError> {
        self.save(keys::USER, &UserRecord::from_user(user)).await
    }

    /// Stored progress, or `None` when nothing (readable) is stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn load_progress(&self) -> Result<Option<UserProgress>, StorageError> {
        let record: Option<ProgressRecord> = self.load(keys::PROGRESS).await?;
        Ok(record.map(ProgressRecord::into_progress))
    }

    /// Writes the whole progress record in a single `put`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be written.
    pub async fn save_progress(&self, progress: &UserProgress) -> Result<(), StorageError> {
        self.save(keys::PROGRESS, &ProgressRecord::from_progress(progress))
            .await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn load_study_checklist(
        &self,
        level: LevelId,
    ) -> Result<StudyChecklist, StorageError> {
        let raw: Vec<String> = self
            .load(&keys::study_completed(level))
            .await?
            .unwrap_or_default();
        Ok(StudyChecklist::from_persisted(
            level,
            study_sections_from_record(&raw),
        ))
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be written.
    pub async fn save_study_checklist(
        &self,
        checklist: &StudyChecklist,
    ) -> Result<(), StorageError> {
        let key = keys::study_completed(checklist.level());
        debug!(%key, sections = checklist.len(), "saving study checklist");
        self.save(&key, &study_sections_to_record(checklist.sections()))
            .await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn load_scorecard(&self, level: LevelId) -> Result<ExerciseScorecard, StorageError> {
        let completed: Vec<String> = self
            .load(&keys::exercises_completed(level))
            .await?
            .unwrap_or_default();
        let scores: BTreeMap<String, PersistedScore> = self
            .load(&keys::exercises_scores(level))
            .await?
            .unwrap_or_default();
        Ok(ExerciseScorecard::from_persisted(
            level,
            exercise_kinds_from_record(&completed),
            &exercise_scores_from_record(&scores),
        ))
    }

    /// Writes the completed list first, then the scores.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if either record cannot be written.
    pub async fn save_scorecard(&self, card: &ExerciseScorecard) -> Result<(), StorageError> {
        let level = card.level();
        debug!(%level, completed = card.completed_count(), "saving exercise scorecard");
        self.save(
            &keys::exercises_completed(level),
            &exercise_kinds_to_record(card.completed()),
        )
        .await?;
        self.save(
            &keys::exercises_scores(level),
            &exercise_scores_to_record(card.scores()),
        )
        .await
    }

    /// Removes the user, the progress record and every per-level record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    pub async fn clear_all(&self) -> Result<(), StorageError> {
        self.kv.remove(keys::USER).await?;
        self.kv.remove(keys::PROGRESS).await?;
        let study = self.kv.remove_prefix(keys::STUDY_PREFIX).await?;
        let exercises = self.kv.remove_prefix(keys::EXERCISES_PREFIX).await?;
        debug!(study, exercises, "cleared per-level records");
        Ok(())
    }

    // Malformed documents read as absent.
    async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.kv.get(key).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!(key, error = %err, "ignoring malformed stored record");
                Ok(None)
            }
        }
    }

    async fn save<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(value).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.kv.put(key, &json).await
    }
}
