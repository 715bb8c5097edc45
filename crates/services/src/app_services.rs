use std::sync::Arc;

use remote::{Remote, RemoteConfig, RemoteError};

use crate::Clock;
use crate::calendar_service::CalendarService;
use crate::course_service::CourseService;
use crate::team_service::TeamService;

/// Assembles the app-facing services over one remote backend.
#[derive(Clone)]
pub struct AppServices {
    calendar: Arc<CalendarService>,
    courses: Arc<CourseService>,
    team: Arc<TeamService>,
}

impl AppServices {
    #[must_use]
    pub fn new(remote: &Remote, clock: Clock) -> Self {
        let calendar = Arc::new(CalendarService::new(
            clock,
            Arc::clone(&remote.tracks),
            Arc::clone(&remote.team),
        ));
        let courses = Arc::new(CourseService::new(
            Arc::clone(&remote.courses),
            Arc::clone(&remote.team),
        ));
        let team = Arc::new(TeamService::new(Arc::clone(&remote.team)));
        Self {
            calendar,
            courses,
            team,
        }
    }

    /// Build services talking to the HTTP backend.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Config` if the HTTP client cannot be built.
    pub fn http(config: RemoteConfig, clock: Clock) -> Result<Self, RemoteError> {
        let remote = Remote::http(config)?;
        Ok(Self::new(&remote, clock))
    }

    #[must_use]
    pub fn calendar(&self) -> Arc<CalendarService> {
        Arc::clone(&self.calendar)
    }

    #[must_use]
    pub fn courses(&self) -> Arc<CourseService> {
        Arc::clone(&self.courses)
    }

    #[must_use]
    pub fn team(&self) -> Arc<TeamService> {
        Arc::clone(&self.team)
    }
}
