use thiserror::Error;

use crate::catalog::CatalogError;
use crate::evaluator::EvaluationError;
use crate::model::{ParseLevelError, ScoreError};
use crate::progression::GateError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Level(#[from] ParseLevelError),
    #[error(transparent)]
    Score(#[from] ScoreError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error(transparent)]
    Gate(#[from] GateError),
}
