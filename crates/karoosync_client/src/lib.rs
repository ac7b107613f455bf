//! Remote collaborators for syncing planned workouts from Intervals.icu to a
//! Hammerhead Karoo, plus the workout data model they exchange.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

pub mod config;
pub mod hammerhead;
mod http;
pub mod intervals;
pub mod token;
pub mod utils;
pub mod workout;

pub use workout::{Target, TargetKind, Workout, WorkoutFile, WorkoutStep, WorkoutSummary};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("authentication rejected: {0}")]
    Auth(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("invalid access token: {0}")]
    Token(String),
}

impl ClientError {
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            404 => ClientError::NotFound(body),
            401 | 403 => ClientError::Auth(body),
            _ => ClientError::Status { status, body },
        }
    }
}

/// One record of the Intervals.icu calendar listing. Only the fields needed
/// to pick workouts are kept.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct EventRecord {
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub start_date_local: Option<String>,
}

/// Accepts ids that arrive either as JSON strings or numbers.
pub(crate) fn deserialize_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(n.to_string().into()),
        Some(other) => Err(D::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

/// Authenticated identity on the destination service.
#[derive(Clone, Debug)]
pub struct Session {
    pub user_id: String,
    pub token: secrecy::SecretString,
}

impl Session {
    /// Build a session from a freshly issued bearer token, taking the user id
    /// from the token's subject claim.
    pub fn from_token(token: secrecy::SecretString) -> Result<Self, ClientError> {
        use secrecy::ExposeSecret;
        let user_id = token::identity_of(token.expose_secret())?;
        Ok(Self { user_id, token })
    }
}

/// Lists and downloads planned workouts.
#[async_trait]
pub trait WorkoutSource: Send + Sync + 'static {
    async fn list_events(
        &self,
        oldest: NaiveDate,
        newest: NaiveDate,
    ) -> Result<Vec<EventRecord>, ClientError>;

    /// Download the structured workout document (ZWO) of one event.
    async fn download_workout(&self, event_id: &str) -> Result<String, ClientError>;
}

/// Exchanges account credentials for a session.
#[async_trait]
pub trait Authenticator: Send + Sync + 'static {
    async fn authenticate(
        &self,
        username: &str,
        password: &secrecy::SecretString,
    ) -> Result<Session, ClientError>;
}

/// Pushes workouts to the destination. Both methods return the service's
/// confirmation id.
#[async_trait]
pub trait WorkoutUploader: Send + Sync + 'static {
    async fn upload_workout(
        &self,
        session: &Session,
        workout: &Workout,
    ) -> Result<String, ClientError>;

    async fn upload_workout_file(
        &self,
        session: &Session,
        file: WorkoutFile,
    ) -> Result<String, ClientError>;
}
