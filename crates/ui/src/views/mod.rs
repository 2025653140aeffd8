mod auth;
mod dashboard;
mod exercise;
mod levels;
mod state;
mod study;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use auth::AuthView;
pub use dashboard::DashboardView;
pub use exercise::ExerciseView;
pub use levels::LevelsView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use study::StudyView;
