use async_trait::async_trait;
use lms_core::MonthKey;
use lms_core::model::{Course, CourseId, Progress, TeamId, TeamMember, TrainingTrack, UserId};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::http::{HttpRepository, RemoteConfig};

/// Errors surfaced by remote data adapters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RemoteError {
    #[error("not found")]
    NotFound,

    #[error("not authenticated")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("request failed with status {0}")]
    HttpStatus(u16),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Query key for a month of tracks.
///
/// `month` is 0-based; adapters convert to whatever the backend expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackQuery {
    pub month: MonthKey,
    pub user_id: Option<UserId>,
}

impl TrackQuery {
    #[must_use]
    pub fn new(month: MonthKey, user_id: Option<UserId>) -> Self {
        Self { month, user_id }
    }
}

#[async_trait]
pub trait TrackRepository: Send + Sync {
    /// Fetch the tracks for a month.
    ///
    /// Adapters may return tracks outside the month or without a due date;
    /// aggregation filters them.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if the backend cannot be reached or rejects the request.
    async fn list_tracks(&self, query: &TrackQuery) -> Result<Vec<TrainingTrack>, RemoteError>;
}

#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// List the courses assigned to a user.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` on transport or backend failures.
    async fn list_courses(&self, owner: UserId) -> Result<Vec<Course>, RemoteError>;

    /// Fetch a single course.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::NotFound` if missing, or other remote errors.
    async fn get_course(&self, id: CourseId) -> Result<Course, RemoteError>;

    /// Persist a new progress value and return the updated course.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::NotFound` if missing, or other remote errors.
    async fn update_progress(&self, id: CourseId, progress: Progress) -> Result<Course, RemoteError>;
}

#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// List members of a team, or every member when `team` is `None`.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` on transport or backend failures.
    async fn list_members(&self, team: Option<TeamId>) -> Result<Vec<TeamMember>, RemoteError>;
}

#[derive(Debug, Default)]
struct InMemoryState {
    tracks: Vec<(UserId, TrainingTrack)>,
    courses: Vec<Course>,
    members: Vec<TeamMember>,
}

/// Simple in-memory repository implementation for testing and demo mode.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, InMemoryState>, RemoteError> {
        self.state
            .lock()
            .map_err(|e| RemoteError::Transport(e.to_string()))
    }

    /// Assign a track to a user.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Transport` if the state lock is poisoned.
    pub fn insert_track(&self, owner: UserId, track: TrainingTrack) -> Result<(), RemoteError> {
        self.lock()?.tracks.push((owner, track));
        Ok(())
    }

    /// Insert or replace a course.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Transport` if the state lock is poisoned.
    pub fn upsert_course(&self, course: Course) -> Result<(), RemoteError> {
        let mut state = self.lock()?;
        match state.courses.iter_mut().find(|c| c.id() == course.id()) {
            Some(existing) => *existing = course,
            None => state.courses.push(course),
        }
        Ok(())
    }

    /// Insert or replace a team member.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Transport` if the state lock is poisoned.
    pub fn upsert_member(&self, member: TeamMember) -> Result<(), RemoteError> {
        let mut state = self.lock()?;
        match state.members.iter_mut().find(|m| m.id == member.id) {
            Some(existing) => *existing = member,
            None => state.members.push(member),
        }
        Ok(())
    }
}

#[async_trait]
impl TrackRepository for InMemoryRepository {
    async fn list_tracks(&self, query: &TrackQuery) -> Result<Vec<TrainingTrack>, RemoteError> {
        let state = self.lock()?;
        // Undated tracks come back too, as a real backend may send them.
        Ok(state
            .tracks
            .iter()
            .filter(|(owner, _)| query.user_id.is_none_or(|id| id == *owner))
            .filter(|(_, track)| track.due_date().is_none_or(|due| query.month.contains(due)))
            .map(|(_, track)| track.clone())
            .collect())
    }
}

#[async_trait]
impl CourseRepository for InMemoryRepository {
    async fn list_courses(&self, owner: UserId) -> Result<Vec<Course>, RemoteError> {
        let state = self.lock()?;
        Ok(state
            .courses
            .iter()
            .filter(|c| c.owner() == owner)
            .cloned()
            .collect())
    }

    async fn get_course(&self, id: CourseId) -> Result<Course, RemoteError> {
        let state = self.lock()?;
        state
            .courses
            .iter()
            .find(|c| c.id() == id)
            .cloned()
            .ok_or(RemoteError::NotFound)
    }

    async fn update_progress(&self, id: CourseId, progress: Progress) -> Result<Course, RemoteError> {
        let mut state = self.lock()?;
        let course = state
            .courses
            .iter_mut()
            .find(|c| c.id() == id)
            .ok_or(RemoteError::NotFound)?;
        *course = course.clone().with_progress(progress);
        Ok(course.clone())
    }
}

#[async_trait]
impl TeamRepository for InMemoryRepository {
    async fn list_members(&self, team: Option<TeamId>) -> Result<Vec<TeamMember>, RemoteError> {
        let state = self.lock()?;
        Ok(state
            .members
            .iter()
            .filter(|m| team.is_none_or(|team| m.belongs_to(team)))
            .cloned()
            .collect())
    }
}

/// Bundles the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Remote {
    pub tracks: Arc<dyn TrackRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub team: Arc<dyn TeamRepository>,
}

impl Remote {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_in_memory(InMemoryRepository::new())
    }

    #[must_use]
    pub fn from_in_memory(repo: InMemoryRepository) -> Self {
        let tracks: Arc<dyn TrackRepository> = Arc::new(repo.clone());
        let courses: Arc<dyn CourseRepository> = Arc::new(repo.clone());
        let team: Arc<dyn TeamRepository> = Arc::new(repo);
        Self {
            tracks,
            courses,
            team,
        }
    }

    /// Build HTTP-backed repositories.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Config` if the HTTP client cannot be built.
    pub fn http(config: RemoteConfig) -> Result<Self, RemoteError> {
        let repo = Arc::new(HttpRepository::new(config)?);
        let tracks: Arc<dyn TrackRepository> = repo.clone();
        let courses: Arc<dyn CourseRepository> = repo.clone();
        let team: Arc<dyn TeamRepository> = repo;
        Ok(Self {
            tracks,
            courses,
            team,
        })
    }
}
