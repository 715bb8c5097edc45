use dioxus::prelude::*;
use services::{CalendarError, CourseServiceError, TeamServiceError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    AccessDenied,
    Unavailable,
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            ViewError::Unknown => "Something went wrong. Please try again.",
            ViewError::AccessDenied => "You do not have access to this page.",
            ViewError::Unavailable => "The learning service is unavailable. Please try again.",
        }
    }
}

impl From<&CalendarError> for ViewError {
    fn from(err: &CalendarError) -> Self {
        match err {
            CalendarError::AccessDenied(_) => ViewError::AccessDenied,
            CalendarError::Remote(_) => ViewError::Unavailable,
            _ => ViewError::Unknown,
        }
    }
}

impl From<&CourseServiceError> for ViewError {
    fn from(err: &CourseServiceError) -> Self {
        match err {
            CourseServiceError::AccessDenied(_) => ViewError::AccessDenied,
            CourseServiceError::Remote(_) => ViewError::Unavailable,
            _ => ViewError::Unknown,
        }
    }
}

impl From<&TeamServiceError> for ViewError {
    fn from(err: &TeamServiceError) -> Self {
        match err {
            TeamServiceError::AccessDenied | TeamServiceError::MissingTeam => {
                ViewError::AccessDenied
            }
            TeamServiceError::Remote(_) => ViewError::Unavailable,
            _ => ViewError::Unknown,
        }
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
