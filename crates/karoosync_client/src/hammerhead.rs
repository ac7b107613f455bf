//! Hammerhead dashboard client: password login and workout import.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::http::{body_snippet, build_client, execute_text};
use crate::{Authenticator, ClientError, Session, Workout, WorkoutFile, WorkoutUploader};

#[derive(Clone, Debug)]
pub struct ReqwestHammerheadClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

impl ReqwestHammerheadClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: build_client(),
        }
    }

    fn workouts_url(&self, session: &Session) -> String {
        format!("{}/v1/users/{}/workouts", self.base_url, session.user_id)
    }

    /// Build a POST request carrying the session's bearer token.
    fn post_request(&self, url: &str, session: &Session) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .bearer_auth(session.token.expose_secret())
    }
}

#[async_trait]
impl Authenticator for ReqwestHammerheadClient {
    async fn authenticate(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<Session, ClientError> {
        let url = format!("{}/v1/auth/token", self.base_url);
        let form = [
            ("grant_type", "password"),
            ("username", username),
            ("password", password.expose_secret()),
        ];
        tracing::debug!(username, "requesting hammerhead access token");
        let resp = self.client.post(&url).form(&form).send().await?;
        let status = resp.status();
        if status.is_client_error() {
            // Bad credentials come back as 400 invalid_grant as well as 401.
            return Err(ClientError::Auth(body_snippet(resp).await));
        }
        if !status.is_success() {
            return Err(ClientError::from_status(
                status.as_u16(),
                body_snippet(resp).await,
            ));
        }
        let payload: TokenResponse = resp
            .json()
            .await
            .map_err(|e| ClientError::Decode(format!("token response: {e}")))?;
        let token = payload
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ClientError::Decode("token response has no access_token".into()))?;
        Session::from_token(SecretString::new(token.into()))
    }
}

#[async_trait]
impl WorkoutUploader for ReqwestHammerheadClient {
    async fn upload_workout(
        &self,
        session: &Session,
        workout: &Workout,
    ) -> Result<String, ClientError> {
        let url = self.workouts_url(session);
        tracing::debug!(name = %workout.name, date = %workout.planned_date, "uploading workout json");
        execute_text(self.post_request(&url, session).json(workout)).await
    }

    async fn upload_workout_file(
        &self,
        session: &Session,
        file: WorkoutFile,
    ) -> Result<String, ClientError> {
        let url = format!("{}/import/file", self.workouts_url(session));
        tracing::debug!(filename = %file.filename, bytes = file.bytes.len(), "uploading workout file");
        let part = reqwest::multipart::Part::bytes(file.bytes)
            .file_name(file.filename)
            .mime_str("application/octet-stream")?;
        // Names look like "2024-03-01 Sweet Spot.zwo"; send them verbatim
        // instead of as an RFC 5987 encoded parameter.
        let form = reqwest::multipart::Form::new()
            .percent_encode_noop()
            .part("file", part);
        execute_text(self.post_request(&url, session).multipart(form)).await
    }
}
