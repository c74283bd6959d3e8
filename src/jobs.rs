//! Ingest job listing.

use anyhow::Result;
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;

/// `GET /jobs` — most recent ingest jobs, newest first.
pub async fn fetch_jobs(client: &ApiClient) -> Result<Value, ApiError> {
    client.get_json("/jobs").await
}

/// CLI entry point for `cw jobs`.
pub async fn run_jobs(client: &ApiClient) -> Result<()> {
    let data = fetch_jobs(client).await?;
    let empty = Vec::new();
    let items = data
        .get("items")
        .and_then(Value::as_array)
        .unwrap_or(&empty);

    if items.is_empty() {
        println!("No ingest jobs recorded.");
        return Ok(());
    }

    println!(
        "{:<6} {:<10} {:<12} {:<24} {:>10} {:>7}",
        "ID", "STATUS", "MODE", "SOURCE", "PROCESSED", "FAILED"
    );
    for job in items {
        let processed = job
            .get("processed_items")
            .and_then(Value::as_i64)
            .unwrap_or_default();
        let total = job
            .get("total_items")
            .and_then(Value::as_i64)
            .unwrap_or_default();
        println!(
            "{:<6} {:<10} {:<12} {:<24} {:>10} {:>7}",
            job.get("id").and_then(Value::as_i64).unwrap_or_default(),
            job.get("status").and_then(Value::as_str).unwrap_or("-"),
            job.get("mode").and_then(Value::as_str).unwrap_or("-"),
            job.get("source").and_then(Value::as_str).unwrap_or("-"),
            format!("{processed}/{total}"),
            job.get("failed_items")
                .and_then(Value::as_i64)
                .unwrap_or_default(),
        );
        if let Some(message) = job.get("message").and_then(Value::as_str) {
            println!("       {}", message);
        }
    }

    Ok(())
}
