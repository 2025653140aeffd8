use std::sync::Arc;

use course_core::evaluator::{Evaluation, ExerciseResponse, evaluate};
use course_core::model::{ExerciseKind, StudySection, User};
use course_core::progression::{
    self, AdvanceOutcome, ExerciseScorecard, GateError, LevelCompletion, StudyChecklist,
    StudyOutcome, check_advance, check_exercise_access, check_study_access,
};
use course_core::{Catalog, LevelId, Score, UserProgress};
use storage::ProgressStore;
use tracing::{debug, info, warn};

use crate::error::ProgressServiceError;
use crate::identity::IdentityProvider;
use crate::navigation::Screen;

/// The signed-in learner and their progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub progress: UserProgress,
}

/// Result of marking a study section as read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyRecorded {
    pub checklist: StudyChecklist,
    pub outcome: StudyOutcome,
    pub progress: UserProgress,
}

/// Result of recording one exercise kind for a level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseRecorded {
    /// Present when the score came from evaluating a response.
    pub evaluation: Option<Evaluation>,
    pub scorecard: ExerciseScorecard,
    /// `Some` once every exercise kind of the level is done.
    pub completion: Option<LevelCompletion>,
}

/// Command surface over the learner's persisted progress.
///
/// Every command re-reads the stored records, checks the progression gates,
/// and only then writes. A denied command writes nothing.
#[derive(Clone)]
pub struct ProgressService {
    store: ProgressStore,
    catalog: Arc<Catalog>,
    identity: Arc<dyn IdentityProvider>,
}

impl ProgressService {
    #[must_use]
    pub fn new(
        store: ProgressStore,
        catalog: Arc<Catalog>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            store,
            catalog,
            identity,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    /// The stored session, if a learner is signed in.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the store cannot be read.
    pub async fn current_session(&self) -> Result<Option<Session>, ProgressServiceError> {
        let Some(user) = self.store.load_user().await? else {
            return Ok(None);
        };
        let progress = self.store.load_progress().await?.unwrap_or_default();
        Ok(Some(Session { user, progress }))
    }

    /// Sign in through the identity provider. A first sign-in starts a fresh
    /// progress record; a stored one is kept.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the records cannot be written.
    pub async fn sign_in(&self) -> Result<Session, ProgressServiceError> {
        let user = self.identity.sign_in();
        self.store.save_user(&user).await?;

        let progress = match self.store.load_progress().await? {
            Some(progress) => progress,
            None => {
                let fresh = UserProgress::new();
                self.store.save_progress(&fresh).await?;
                fresh
            }
        };

        info!(user = %user.id, current = %progress.current_level(), "signed in");
        Ok(Session { user, progress })
    }

    /// Sign out and clear every stored record.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the records cannot be removed.
    pub async fn sign_out(&self) -> Result<(), ProgressServiceError> {
        self.store.clear_all().await?;
        info!("signed out and cleared progress");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ProgressServiceError::NotSignedIn` without a stored user.
    pub async fn progress(&self) -> Result<UserProgress, ProgressServiceError> {
        self.current_session()
            .await?
            .map(|session| session.progress)
            .ok_or(ProgressServiceError::NotSignedIn)
    }

    /// Where picking `level` on the level list leads.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Denied` for a locked level.
    pub async fn select_level(&self, level: LevelId) -> Result<Screen, ProgressServiceError> {
        let progress = self.progress().await?;
        let state = check_study_access(&progress, level).map_err(denied)?;
        Screen::for_level(level, state).ok_or_else(|| denied(GateError::Locked(level)))
    }

    /// Open a level's study notes.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Denied` for a locked level.
    pub async fn open_study(&self, level: LevelId) -> Result<StudyChecklist, ProgressServiceError> {
        let progress = self.progress().await?;
        check_study_access(&progress, level).map_err(denied)?;
        Ok(self.store.load_study_checklist(level).await?)
    }

    /// Open a level's exercises.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Denied` for a locked level or one whose
    /// study notes are still pending.
    pub async fn open_exercise(
        &self,
        level: LevelId,
    ) -> Result<ExerciseScorecard, ProgressServiceError> {
        let progress = self.progress().await?;
        check_exercise_access(&progress, level).map_err(denied)?;
        Ok(self.store.load_scorecard(level).await?)
    }

    /// Mark a study section as read; completes the level's study notes once
    /// every section is read.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Denied` for a locked level, or
    /// `ProgressServiceError::Storage` on persistence failures.
    pub async fn complete_study_section(
        &self,
        level: LevelId,
        section: StudySection,
    ) -> Result<StudyRecorded, ProgressServiceError> {
        let mut progress = self.progress().await?;
        check_study_access(&progress, level).map_err(denied)?;

        let mut checklist = self.store.load_study_checklist(level).await?;
        let required = self.catalog.study_sections(level);
        let outcome =
            progression::complete_study_section(&mut progress, &mut checklist, section, &required);

        if outcome != StudyOutcome::AlreadyRecorded {
            self.store.save_study_checklist(&checklist).await?;
            debug!(%level, %section, read = checklist.len(), "study section recorded");
        }
        if outcome == StudyOutcome::StudyCompleted {
            self.store.save_progress(&progress).await?;
            info!(%level, "study notes completed");
        }

        Ok(StudyRecorded {
            checklist,
            outcome,
            progress,
        })
    }

    /// Record a score for one exercise kind.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Denied` if the level's exercises are not
    /// open, or `ProgressServiceError::Storage` on persistence failures.
    pub async fn complete_exercise(
        &self,
        level: LevelId,
        kind: ExerciseKind,
        score: Score,
    ) -> Result<ExerciseRecorded, ProgressServiceError> {
        let progress = self.progress().await?;
        check_exercise_access(&progress, level).map_err(denied)?;
        self.record_exercise(level, kind, score, None).await
    }

    /// Evaluate a response against the level's content and record its score.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Denied` if the level's exercises are not
    /// open, `ProgressServiceError::MissingContent` or
    /// `ProgressServiceError::Evaluation` if the response cannot be scored, or
    /// `ProgressServiceError::Storage` on persistence failures.
    pub async fn submit_exercise(
        &self,
        level: LevelId,
        response: &ExerciseResponse,
    ) -> Result<ExerciseRecorded, ProgressServiceError> {
        let progress = self.progress().await?;
        check_exercise_access(&progress, level).map_err(denied)?;

        let kind = response.kind();
        let set = self
            .catalog
            .exercise_set(level, kind)
            .ok_or(ProgressServiceError::MissingContent { level, kind })?;
        let evaluation = evaluate(set, response)?;
        debug!(
            %level,
            %kind,
            correct = evaluation.correct,
            total = evaluation.total,
            passed = evaluation.passed,
            "exercise evaluated"
        );

        self.record_exercise(level, kind, evaluation.score, Some(evaluation))
            .await
    }

    /// Complete `level` with the average of its exercise scores and move the
    /// learner on. The whole transition is one progress write.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Denied` if the level is not open or its
    /// exercises are incomplete, or `ProgressServiceError::Storage` on
    /// persistence failures.
    pub async fn advance_level(
        &self,
        level: LevelId,
    ) -> Result<AdvanceOutcome, ProgressServiceError> {
        let mut progress = self.progress().await?;
        let scorecard = self.store.load_scorecard(level).await?;
        let required = self.catalog.exercise_kinds(level);
        let completion = check_advance(&progress, &scorecard, &required).map_err(denied)?;

        let outcome = progression::advance(&mut progress, &completion);
        self.store.save_progress(&progress).await?;

        info!(
            %level,
            average = %outcome.average,
            current = %outcome.current_level,
            replay = !outcome.newly_completed,
            "level advanced"
        );
        Ok(outcome)
    }

    async fn record_exercise(
        &self,
        level: LevelId,
        kind: ExerciseKind,
        score: Score,
        evaluation: Option<Evaluation>,
    ) -> Result<ExerciseRecorded, ProgressServiceError> {
        let mut scorecard = self.store.load_scorecard(level).await?;
        scorecard.record(kind, score);
        self.store.save_scorecard(&scorecard).await?;
        debug!(%level, %kind, %score, "exercise recorded");

        let completion = scorecard.level_completion(&self.catalog.exercise_kinds(level));
        Ok(ExerciseRecorded {
            evaluation,
            scorecard,
            completion,
        })
    }
}

fn denied(gate: GateError) -> ProgressServiceError {
    warn!(%gate, "command denied");
    ProgressServiceError::Denied(gate)
}
