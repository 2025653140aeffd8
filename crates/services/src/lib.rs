#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod identity;
pub mod navigation;
pub mod progress_service;
pub mod progress_view;

pub use app_services::AppServices;
pub use error::{AppServicesError, ProgressServiceError};
pub use identity::{IdentityProvider, MockIdentityProvider};
pub use navigation::Screen;
pub use progress_service::{ExerciseRecorded, ProgressService, Session, StudyRecorded};
pub use progress_view::{LevelAction, LevelCard, LevelStatus, ProgressOverview, TierGroup};
