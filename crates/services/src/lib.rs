#![forbid(unsafe_code)]

mod access;
pub mod app_services;
pub mod calendar_service;
pub mod course_service;
pub mod error;
pub mod month_loader;
pub mod team_service;

pub use lms_core::Clock;

pub use app_services::AppServices;
pub use calendar_service::{CalendarService, MonthQuery, MonthView};
pub use course_service::CourseService;
pub use error::{CalendarError, CourseServiceError, TeamServiceError};
pub use month_loader::{LoadTicket, MonthLoader, MonthNav, Resolution};
pub use team_service::TeamService;
