mod course;
mod ids;
mod role;
mod session;
mod team;
pub mod track;

pub use course::{Course, CourseError, CourseStatus, Progress};
pub use ids::{CourseId, ParseIdError, TeamId, TrackId, UserId};
pub use role::{Role, RoleParseError};
pub use session::Session;
pub use team::TeamMember;
pub use track::{
    DEFAULT_CATEGORY, DEFAULT_PLATFORM, NormalizedTrack, TrackStatus, TrainingTrack,
    completion_percent,
};
