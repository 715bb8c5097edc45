use std::sync::Arc;

use lms_core::model::Session;
use services::{CalendarService, CourseService, TeamService};

use crate::vm::Size;

/// Window size assumed for popover placement when the host does not say.
pub const DEFAULT_VIEWPORT: Size = Size::new(1280.0, 860.0);

pub trait UiApp: Send + Sync {
    fn session(&self) -> Session;

    fn calendar(&self) -> Arc<CalendarService>;
    fn courses(&self) -> Arc<CourseService>;
    fn team(&self) -> Arc<TeamService>;

    fn viewport(&self) -> Size {
        DEFAULT_VIEWPORT
    }
}

#[derive(Clone)]
pub struct AppContext {
    session: Session,
    viewport: Size,

    calendar: Arc<CalendarService>,
    courses: Arc<CourseService>,
    team: Arc<TeamService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            session: app.session(),
            viewport: app.viewport(),
            calendar: app.calendar(),
            courses: app.courses(),
            team: app.team(),
        }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
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

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
