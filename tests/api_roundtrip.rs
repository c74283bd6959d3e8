//! End-to-end tests of the request executor against a stub backend.
//!
//! The stub serves a small slice of the real API surface under `/api` so the
//! executor is exercised over a real socket: success, non-2xx status,
//! malformed JSON, and connection-refused transport failures.

use std::collections::HashMap;

use axum::extract::Query;
use axum::http::header::CONTENT_TYPE;
use axum::routing::{get, post};
use axum::{Json, Router};
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use civic_watch::admin::{fetch_ingest, IngestRequest};
use civic_watch::client::{ApiClient, BaseSource, RequestOptions, RuntimeContext};
use civic_watch::config::ApiConfig;
use civic_watch::error::ApiError;
use civic_watch::meetings::{fetch_meetings, MeetingFilter};

/// Start the stub backend on an ephemeral port and return its base address
/// (with the `/api` prefix, as deployments configure it).
async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/api/health", get(|| async { Json(json!({"status": "ok"})) }))
        .route(
            "/api/meetings",
            get(|| async {
                Json(json!({
                    "items": [{
                        "id": 1,
                        "title": "City Council Regular Meeting",
                        "meeting_date": "2025-06-03T18:00:00+00:00",
                        "location": "Council Chambers",
                        "status": "final"
                    }]
                }))
            }),
        )
        .route(
            "/api/bad-json",
            get(|| async { ([(CONTENT_TYPE, "application/json")], "{not json") }),
        )
        .route(
            "/api/admin/ingest",
            post(|Query(params): Query<HashMap<String, String>>| async move {
                Json(json!({
                    "job_id": 7,
                    "meetings": 2,
                    "agenda_items": 5,
                    "matters": 1,
                    "votes": 0,
                    "documents": 3,
                    "mode": params.get("mode").cloned().unwrap_or_default(),
                    "source": params.get("source").cloned().unwrap_or_default(),
                }))
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/api")
}

fn server_client(base: &str) -> ApiClient {
    let config = ApiConfig {
        api_url_server: Some(base.to_string()),
        public_api_url: None,
    };
    ApiClient::new(config, RuntimeContext::Server)
}

#[tokio::test]
async fn fetches_and_decodes_json() {
    let base = spawn_backend().await;
    // Trailing slash must be normalized away before the path is joined.
    let client = server_client(&format!("{base}/"));

    let data = fetch_meetings(&client, &MeetingFilter::default())
        .await
        .unwrap();
    assert_eq!(
        data["items"][0]["title"],
        json!("City Council Regular Meeting")
    );
}

#[tokio::test]
async fn leading_slash_is_optional_in_paths() {
    let base = spawn_backend().await;
    let client = server_client(&base);

    let with_slash = client.get_json("/meetings").await.unwrap();
    let without_slash = client.get_json("meetings").await.unwrap();
    assert_eq!(with_slash, without_slash);
}

#[tokio::test]
async fn non_success_status_names_method_url_and_reason() {
    let base = spawn_backend().await;
    let client = server_client(&base);

    let err = client.get_json("/missing").await.unwrap_err();
    match &err {
        ApiError::HttpStatus { status, .. } => assert_eq!(*status, StatusCode::NOT_FOUND),
        other => panic!("expected HttpStatus, got {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        format!("API request failed (GET {base}/missing): 404 Not Found")
    );
}

#[tokio::test]
async fn malformed_json_is_a_decode_failure() {
    let base = spawn_backend().await;
    let client = server_client(&base);

    let err = client.get_json("/bad-json").await.unwrap_err();
    match &err {
        ApiError::Decode { url, .. } => assert_eq!(url, &format!("{base}/bad-json")),
        other => panic!("expected Decode, got {other:?}"),
    }
    assert!(err.to_string().contains("invalid JSON"));
}

#[tokio::test]
async fn connection_refused_is_a_transport_failure() {
    // Bind and immediately drop a listener so the port refuses connections.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let base = format!("http://{addr}/api");
    let client = server_client(&base);

    let err = client
        .fetch_json("/meetings", RequestOptions::method(Method::POST))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Transport { .. }));
    assert!(err
        .to_string()
        .starts_with(&format!("API request failed (POST {base}/meetings): ")));
}

#[tokio::test]
async fn server_side_public_fallback_still_reaches_the_backend() {
    let base = spawn_backend().await;
    let config = ApiConfig {
        api_url_server: None,
        public_api_url: Some(base.clone()),
    };
    let client = ApiClient::new(config, RuntimeContext::Server);

    assert_eq!(
        client.resolve_base().unwrap().source,
        BaseSource::PublicFallback
    );
    let data = client.get_json("/health").await.unwrap();
    assert_eq!(data["status"], json!("ok"));
}

#[tokio::test]
async fn browser_proxy_prefix_fails_with_a_diagnosable_url() {
    // A native process has no document origin to resolve `/api` against, so
    // the request cannot leave the builder — but the failure still names the
    // method and the URL that was attempted.
    let client = ApiClient::new(ApiConfig::default(), RuntimeContext::Browser);

    let err = client.get_json("/meetings").await.unwrap_err();
    match &err {
        ApiError::Transport { url, .. } => assert_eq!(url, "/api/meetings"),
        other => panic!("expected Transport, got {other:?}"),
    }
}

#[tokio::test]
async fn ingest_trigger_posts_query_parameters() {
    let base = spawn_backend().await;
    let client = server_client(&base);

    let request = IngestRequest {
        mode: "backfill".to_string(),
        ..IngestRequest::default()
    };
    let data = fetch_ingest(&client, &request).await.unwrap();

    assert_eq!(data["job_id"], json!(7));
    assert_eq!(data["mode"], json!("backfill"));
    assert_eq!(data["source"], json!("whatcom_legistar_api"));
}

#[tokio::test]
async fn configuration_missing_propagates_unchanged_through_the_executor() {
    let client = ApiClient::new(ApiConfig::default(), RuntimeContext::Server);

    let err = client.get_json("/meetings").await.unwrap_err();
    assert!(matches!(err, ApiError::ConfigurationMissing));
}
