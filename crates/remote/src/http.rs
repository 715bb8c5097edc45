use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use lms_core::model::{Course, CourseId, Progress, TeamId, TeamMember, TrainingTrack, UserId};

use crate::records::{CourseRecord, ListEnvelope, MemberRecord, ProgressPatch, TrackRecord};
use crate::repository::{
    CourseRepository, RemoteError, TeamRepository, TrackQuery, TrackRepository,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone, Debug)]
pub struct RemoteConfig {
    pub base_url: Url,
    pub api_token: Option<String>,
    pub timeout: Duration,
}

impl RemoteConfig {
    /// Build a config for `base_url`. A trailing slash is added so relative
    /// endpoint paths resolve below it.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Config` if the URL does not parse.
    pub fn new(base_url: &str) -> Result<Self, RemoteError> {
        let trimmed = base_url.trim();
        let with_slash = if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{trimmed}/")
        };
        let base_url = Url::parse(&with_slash)
            .map_err(|e| RemoteError::Config(format!("invalid base url {trimmed:?}: {e}")))?;
        Ok(Self {
            base_url,
            api_token: None,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Read `LMS_API_URL`, `LMS_API_TOKEN` and `LMS_API_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Config` for an unparseable URL or timeout.
    pub fn from_env() -> Result<Self, RemoteError> {
        let base_url = env::var("LMS_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let mut config = Self::new(&base_url)?;
        config.api_token = env::var("LMS_API_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());
        if let Ok(raw) = env::var("LMS_API_TIMEOUT_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| RemoteError::Config(format!("invalid LMS_API_TIMEOUT_SECS: {raw}")))?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.api_token = token.filter(|t| !t.trim().is_empty());
        self
    }
}

/// Repositories backed by the learning backend's REST API.
#[derive(Clone)]
pub struct HttpRepository {
    client: Client,
    config: RemoteConfig,
}

impl HttpRepository {
    /// # Errors
    ///
    /// Returns `RemoteError::Config` if the HTTP client cannot be built.
    pub fn new(config: RemoteConfig) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RemoteError::Config(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> Result<Url, RemoteError> {
        self.config
            .base_url
            .join(path)
            .map_err(|e| RemoteError::Config(e.to_string()))
    }

    /// `GET tracks?year=..&month=..&user_id=..` with a 1-based month.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Config` if the URL cannot be built.
    pub fn tracks_url(&self, query: &TrackQuery) -> Result<Url, RemoteError> {
        let mut url = self.endpoint("tracks")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("year", &query.month.year().to_string())
                .append_pair("month", &query.month.one_based_month().to_string());
            if let Some(user_id) = query.user_id {
                pairs.append_pair("user_id", &user_id.to_string());
            }
        }
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, RemoteError> {
        let response = self.authorize(request).send().await.map_err(transport_error)?;
        let status = response.status();
        tracing::debug!(url = %response.url(), %status, "backend response");
        check_status(status)?;
        response
            .json::<T>()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

fn transport_error(err: reqwest::Error) -> RemoteError {
    tracing::warn!(%err, "request to backend failed");
    RemoteError::Transport(err.to_string())
}

/// Map non-success statuses onto `RemoteError`.
///
/// # Errors
///
/// Returns the matching `RemoteError` for any non-2xx status.
pub fn check_status(status: StatusCode) -> Result<(), RemoteError> {
    if status.is_success() {
        return Ok(());
    }
    Err(match status {
        StatusCode::UNAUTHORIZED => RemoteError::Unauthorized,
        StatusCode::FORBIDDEN => RemoteError::Forbidden,
        StatusCode::NOT_FOUND => RemoteError::NotFound,
        other => RemoteError::HttpStatus(other.as_u16()),
    })
}

#[async_trait]
impl TrackRepository for HttpRepository {
    async fn list_tracks(&self, query: &TrackQuery) -> Result<Vec<TrainingTrack>, RemoteError> {
        let url = self.tracks_url(query)?;
        tracing::debug!(%url, month = %query.month, "fetching tracks");
        let records: ListEnvelope<TrackRecord> = self.send_json(self.client.get(url)).await?;
        Ok(records
            .into_vec()
            .into_iter()
            .map(TrackRecord::into_track)
            .collect())
    }
}

#[async_trait]
impl CourseRepository for HttpRepository {
    async fn list_courses(&self, owner: UserId) -> Result<Vec<Course>, RemoteError> {
        let url = self.endpoint(&format!("users/{owner}/courses"))?;
        let records: ListEnvelope<CourseRecord> = self.send_json(self.client.get(url)).await?;
        Ok(records
            .into_vec()
            .into_iter()
            .filter_map(CourseRecord::into_course)
            .collect())
    }

    async fn get_course(&self, id: CourseId) -> Result<Course, RemoteError> {
        let url = self.endpoint(&format!("courses/{id}"))?;
        let record: CourseRecord = self.send_json(self.client.get(url)).await?;
        record
            .into_course()
            .ok_or_else(|| RemoteError::Decode(format!("course {id} is malformed")))
    }

    async fn update_progress(&self, id: CourseId, progress: Progress) -> Result<Course, RemoteError> {
        let url = self.endpoint(&format!("courses/{id}/progress"))?;
        let body = ProgressPatch {
            progress: progress.percent(),
        };
        tracing::info!(course_id = %id, progress = body.progress, "updating course progress");
        let record: CourseRecord = self
            .send_json(self.client.patch(url).json(&body))
            .await?;
        record
            .into_course()
            .ok_or_else(|| RemoteError::Decode(format!("course {id} is malformed")))
    }
}

#[async_trait]
impl TeamRepository for HttpRepository {
    async fn list_members(&self, team: Option<TeamId>) -> Result<Vec<TeamMember>, RemoteError> {
        let path = match team {
            Some(team) => format!("teams/{team}/members"),
            None => "members".to_string(),
        };
        let url = self.endpoint(&path)?;
        let records: ListEnvelope<MemberRecord> = self.send_json(self.client.get(url)).await?;
        Ok(records
            .into_vec()
            .into_iter()
            .map(MemberRecord::into_member)
            .collect())
    }
}
