//! Request plumbing shared by the reqwest clients.

use std::time::Duration;

use crate::ClientError;

/// Upper bound on any single request.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("karoosync/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("reqwest client build should not fail")
}

/// Read the body of a failed response into a short snippet.
pub(crate) async fn body_snippet(resp: reqwest::Response) -> String {
    let body = resp.text().await.unwrap_or_default();
    body.chars().take(256).collect()
}

/// Extract error information from a failed response.
pub(crate) async fn error_from_response(resp: reqwest::Response) -> ClientError {
    let status = resp.status().as_u16();
    ClientError::from_status(status, body_snippet(resp).await)
}

/// Send a request and return the body as text, trimmed.
pub(crate) async fn execute_text(request: reqwest::RequestBuilder) -> Result<String, ClientError> {
    let resp = request.send().await?;
    if !resp.status().is_success() {
        return Err(error_from_response(resp).await);
    }
    Ok(resp.text().await?.trim().to_string())
}

/// Send a request and decode a JSON body.
pub(crate) async fn execute_json<T: serde::de::DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, ClientError> {
    let resp = request.send().await?;
    if !resp.status().is_success() {
        return Err(error_from_response(resp).await);
    }
    // Read as text first so a shape mismatch can report what came back.
    let text = resp.text().await?;
    serde_json::from_str::<T>(&text).map_err(|e| {
        let body_snippet: String = text.chars().take(256).collect();
        ClientError::Decode(format!("{e} - body: {body_snippet}"))
    })
}
