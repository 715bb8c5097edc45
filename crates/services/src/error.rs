//! Shared error types for the services crate.

use thiserror::Error;

use lms_core::model::{CourseError, UserId};
use remote::RemoteError;

/// Errors emitted by `CalendarService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CalendarError {
    #[error("not allowed to view the calendar of user {0}")]
    AccessDenied(UserId),
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Errors emitted by `CourseService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CourseServiceError {
    #[error("not allowed to access the courses of user {0}")]
    AccessDenied(UserId),
    #[error(transparent)]
    Course(#[from] CourseError),
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Errors emitted by `TeamService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TeamServiceError {
    #[error("your role cannot view team rosters")]
    AccessDenied,
    #[error("no team is assigned to this account")]
    MissingTeam,
    #[error(transparent)]
    Remote(#[from] RemoteError),
}
