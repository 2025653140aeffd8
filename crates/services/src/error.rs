//! Shared error types for the services crate.

use thiserror::Error;

use course_core::LevelId;
use course_core::catalog::CatalogError;
use course_core::evaluator::EvaluationError;
use course_core::model::ExerciseKind;
use course_core::progression::GateError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error("no learner is signed in")]
    NotSignedIn,
    #[error(transparent)]
    Denied(#[from] GateError),
    #[error("no {kind} content for level {level}")]
    MissingContent { level: LevelId, kind: ExerciseKind },
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ProgressServiceError {
    /// The gate that refused the command, if any.
    #[must_use]
    pub fn denial(&self) -> Option<&GateError> {
        match self {
            ProgressServiceError::Denied(gate) => Some(gate),
            _ => None,
        }
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
