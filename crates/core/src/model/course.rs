use chrono::NaiveDate;
use thiserror::Error;

use crate::model::{CourseId, TrackId, UserId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CourseError {
    #[error("course title cannot be empty")]
    EmptyTitle,

    #[error("progress must be between 0 and 100, got {0}")]
    ProgressOutOfRange(i64),
}

/// Course progress as a whole percentage in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Progress(u8);

impl Progress {
    pub const COMPLETE: Progress = Progress(100);

    /// # Errors
    ///
    /// Returns `CourseError::ProgressOutOfRange` outside `0..=100`.
    pub fn new(percent: i64) -> Result<Self, CourseError> {
        u8::try_from(percent)
            .ok()
            .filter(|p| *p <= 100)
            .map(Progress)
            .ok_or(CourseError::ProgressOutOfRange(percent))
    }

    /// Clamp an untrusted value from the backend.
    #[must_use]
    pub fn saturating(percent: i64) -> Self {
        // clamp keeps the value inside u8 range
        Progress(u8::try_from(percent.clamp(0, 100)).unwrap_or(0))
    }

    #[must_use]
    pub fn percent(&self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CourseStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl CourseStatus {
    #[must_use]
    pub fn from_progress(progress: Progress) -> Self {
        match progress.percent() {
            0 => CourseStatus::NotStarted,
            100 => CourseStatus::Completed,
            _ => CourseStatus::InProgress,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            CourseStatus::NotStarted => "Not started",
            CourseStatus::InProgress => "In progress",
            CourseStatus::Completed => "Completed",
        }
    }
}

/// A single course assigned to a learner, possibly as part of a track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: CourseId,
    owner: UserId,
    title: String,
    platform: Option<String>,
    category: Option<String>,
    track_id: Option<TrackId>,
    due_date: Option<NaiveDate>,
    progress: Progress,
}

impl Course {
    /// # Errors
    ///
    /// Returns `CourseError::EmptyTitle` if the title is blank.
    pub fn new(
        id: CourseId,
        owner: UserId,
        title: impl Into<String>,
        progress: Progress,
    ) -> Result<Self, CourseError> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(CourseError::EmptyTitle);
        }
        Ok(Self {
            id,
            owner,
            title,
            platform: None,
            category: None,
            track_id: None,
            due_date: None,
            progress,
        })
    }

    #[must_use]
    pub fn with_platform(mut self, platform: Option<String>) -> Self {
        self.platform = platform;
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn with_track(mut self, track_id: Option<TrackId>) -> Self {
        self.track_id = track_id;
        self
    }

    #[must_use]
    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    #[must_use]
    pub fn id(&self) -> CourseId {
        self.id
    }

    #[must_use]
    pub fn owner(&self) -> UserId {
        self.owner
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    #[must_use]
    pub fn track_id(&self) -> Option<TrackId> {
        self.track_id
    }

    #[must_use]
    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        self.progress
    }

    #[must_use]
    pub fn status(&self) -> CourseStatus {
        CourseStatus::from_progress(self.progress)
    }

    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status() != CourseStatus::Completed && self.due_date.is_some_and(|due| due < today)
    }

    /// Replace the progress value, returning the updated course.
    #[must_use]
    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = progress;
        self
    }
}
