//! Intervals.icu calendar client.
//!
//! Only the two calls the sync needs are implemented: the event listing for a
//! date window and the ZWO export of a single event.

use async_trait::async_trait;
use chrono::NaiveDate;
use secrecy::{ExposeSecret, SecretString};

use crate::http::{build_client, execute_json, execute_text};
use crate::{ClientError, EventRecord, WorkoutSource};

/// Client for the Intervals.icu API using reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestIntervalsClient {
    base_url: String,
    athlete_id: String,
    api_key: SecretString,
    client: reqwest::Client,
}

impl ReqwestIntervalsClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the Intervals.icu API (e.g., "https://intervals.icu")
    /// * `athlete_id` - The athlete ID, e.g. `i12345`
    /// * `api_key` - The personal API key from the athlete's settings page
    pub fn new(base_url: &str, athlete_id: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            athlete_id: athlete_id.into(),
            api_key,
            client: build_client(),
        }
    }

    /// Build an authenticated GET request.
    fn get_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .basic_auth("API_KEY", Some(self.api_key.expose_secret()))
    }

    fn events_url(&self) -> String {
        format!(
            "{}/api/v1/athlete/{}/events",
            self.base_url, self.athlete_id
        )
    }
}

#[async_trait]
impl WorkoutSource for ReqwestIntervalsClient {
    async fn list_events(
        &self,
        oldest: NaiveDate,
        newest: NaiveDate,
    ) -> Result<Vec<EventRecord>, ClientError> {
        let url = self.events_url();
        tracing::debug!(%oldest, %newest, "listing intervals.icu events");
        let qp = [("oldest", oldest.to_string()), ("newest", newest.to_string())];
        execute_json(self.get_request(&url).query(&qp)).await
    }

    async fn download_workout(&self, event_id: &str) -> Result<String, ClientError> {
        let url = format!("{}/{}/downloadzwo", self.events_url(), event_id);
        tracing::debug!(event_id, "downloading zwo");
        execute_text(self.get_request(&url)).await
    }
}
