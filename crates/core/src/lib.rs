#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod progression;

pub use catalog::Catalog;
pub use error::Error;
pub use model::{LevelId, Score, UserProgress};
