use course_core::progression::GateError;
use dioxus::prelude::*;
use services::ProgressServiceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    NotSignedIn,
    UnknownLevel,
    Locked,
    StudyIncomplete,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::NotSignedIn => "Please sign in to continue.",
            ViewError::UnknownLevel => "That level does not exist.",
            ViewError::Locked => "This level is locked. Complete the previous level first.",
            ViewError::StudyIncomplete => {
                "Complete all study notes for this level before starting the exercises."
            }
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }
}

impl From<&ProgressServiceError> for ViewError {
    fn from(err: &ProgressServiceError) -> Self {
        match err {
            ProgressServiceError::NotSignedIn => ViewError::NotSignedIn,
            ProgressServiceError::Denied(GateError::Locked(_)) => ViewError::Locked,
            ProgressServiceError::Denied(GateError::StudyIncomplete(_)) => {
                ViewError::StudyIncomplete
            }
            _ => ViewError::Unknown,
        }
    }
}

impl From<ProgressServiceError> for ViewError {
    fn from(err: ProgressServiceError) -> Self {
        ViewError::from(&err)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
