#![forbid(unsafe_code)]

pub mod http;
pub mod records;
pub mod repository;

pub use http::{HttpRepository, RemoteConfig};
pub use repository::{
    CourseRepository, InMemoryRepository, Remote, RemoteError, TeamRepository, TrackQuery,
    TrackRepository,
};
