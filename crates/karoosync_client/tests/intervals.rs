use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::NaiveDate;
use karoosync_client::intervals::ReqwestIntervalsClient;
use karoosync_client::{ClientError, WorkoutSource};
use secrecy::SecretString;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ReqwestIntervalsClient {
    ReqwestIntervalsClient::new(&server.uri(), "i42", SecretString::new("tok".into()))
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

#[tokio::test]
async fn list_events_sends_window_and_basic_auth() {
    let server = MockServer::start().await;
    let body = serde_json::json!([
        {"id": 101, "type": "Ride", "name": "Sweet spot", "start_date_local": "2024-03-01T00:00:00", "category": "WORKOUT"},
        {"id": "102", "type": null, "name": "Rest", "start_date_local": "2024-03-02T00:00:00", "category": "NOTE"}
    ]);
    Mock::given(method("GET"))
        .and(path("/api/v1/athlete/i42/events"))
        .and(query_param("oldest", "2024-03-01"))
        .and(query_param("newest", "2024-03-02"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let events = client(&server)
        .list_events(day(1), day(2))
        .await
        .expect("events");
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id.as_deref(), Some("101"));
    assert_eq!(events[0].kind.as_deref(), Some("Ride"));
    assert!(events[1].kind.is_none());

    // Basic auth with the fixed `API_KEY` user name.
    let received = server.received_requests().await.unwrap();
    let auth = received[0]
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_default();
    assert_eq!(auth, format!("Basic {}", STANDARD.encode("API_KEY:tok")));
}

#[tokio::test]
async fn download_workout_returns_document_text() {
    let server = MockServer::start().await;
    let zwo = "<workout_file><name>Test</name></workout_file>";
    Mock::given(method("GET"))
        .and(path("/api/v1/athlete/i42/events/101/downloadzwo"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!("{zwo}\n")))
        .mount(&server)
        .await;

    let doc = client(&server)
        .download_workout("101")
        .await
        .expect("zwo");
    assert_eq!(doc, zwo);
}

#[tokio::test]
async fn unauthorized_maps_to_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/athlete/i42/events"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let err = client(&server)
        .list_events(day(1), day(1))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Auth(ref b) if b == "bad key"));
}

#[tokio::test]
async fn missing_event_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/athlete/i42/events/999/downloadzwo"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client(&server).download_workout("999").await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
}

#[tokio::test]
async fn unexpected_listing_shape_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/athlete/i42/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"error": "x"})))
        .mount(&server)
        .await;

    let err = client(&server)
        .list_events(day(1), day(1))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}
