//! Administrative ingest trigger.
//!
//! Kicks off a backend ingest run. This is deliberately just one more call
//! through the shared request path — no privileged transport, no extra
//! state.

use anyhow::Result;
use chrono::NaiveDate;
use reqwest::Method;
use serde_json::Value;

use crate::client::{query_string, ApiClient, RequestOptions};
use crate::error::ApiError;

/// Default ingest source, matching the backend's own default.
pub const DEFAULT_SOURCE: &str = "whatcom_legistar_api";

/// Parameters for `POST /admin/ingest`.
#[derive(Debug, Clone)]
pub struct IngestRequest {
    /// `incremental` (default) or `backfill`.
    pub mode: String,
    pub source: String,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl Default for IngestRequest {
    fn default() -> Self {
        Self {
            mode: "incremental".to_string(),
            source: DEFAULT_SOURCE.to_string(),
            from: None,
            to: None,
        }
    }
}

/// `POST /admin/ingest?mode=...&source=...` — runs synchronously on the
/// backend and returns the job summary.
pub async fn fetch_ingest(client: &ApiClient, request: &IngestRequest) -> Result<Value, ApiError> {
    let mut pairs: Vec<(&str, String)> = vec![
        ("mode", request.mode.clone()),
        ("source", request.source.clone()),
    ];
    if let Some(from) = request.from {
        pairs.push(("from_date", from.to_string()));
    }
    if let Some(to) = request.to {
        pairs.push(("to_date", to.to_string()));
    }

    client
        .fetch_json(
            &format!("/admin/ingest?{}", query_string(&pairs)),
            RequestOptions::method(Method::POST),
        )
        .await
}

/// CLI entry point for `cw ingest`.
pub async fn run_ingest(client: &ApiClient, request: &IngestRequest) -> Result<()> {
    println!(
        "Running {} ingest from {} ...",
        request.mode, request.source
    );
    let data = fetch_ingest(client, request).await?;

    let job_id = data.get("job_id").and_then(Value::as_i64).unwrap_or_default();
    let count = |key: &str| data.get(key).and_then(Value::as_i64).unwrap_or_default();
    println!(
        "Job {} complete: {} meetings, {} agenda items, {} matters, {} votes, {} documents",
        job_id,
        count("meetings"),
        count("agenda_items"),
        count("matters"),
        count("votes"),
        count("documents"),
    );

    Ok(())
}
