//! Full-text search across civic record types.
//!
//! One backend endpoint (`/search`) covers meetings, agenda items,
//! ordinances, documents, and news; results come back ranked with a score
//! and an excerpt snippet.

use anyhow::Result;
use chrono::NaiveDate;
use serde_json::Value;

use crate::client::{query_string, ApiClient};
use crate::error::ApiError;

/// Record types searched when the caller does not narrow them down.
pub const DEFAULT_TYPES: &str = "meetings,agenda_items,ordinances,documents,news";

/// Optional narrowing for a search request.
#[derive(Debug, Default, Clone)]
pub struct SearchFilter {
    /// Comma-separated record types; defaults to [`DEFAULT_TYPES`].
    pub types: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// `GET /search?q=...` with the filter applied.
pub async fn fetch_search(
    client: &ApiClient,
    query: &str,
    filter: &SearchFilter,
) -> Result<Value, ApiError> {
    let types = filter.types.as_deref().unwrap_or(DEFAULT_TYPES);
    let mut pairs: Vec<(&str, String)> = vec![
        ("q", query.to_string()),
        ("types", types.to_string()),
    ];
    if let Some(from) = filter.from {
        pairs.push(("from", from.to_string()));
    }
    if let Some(to) = filter.to {
        pairs.push(("to", to.to_string()));
    }

    client
        .get_json(&format!("/search?{}", query_string(&pairs)))
        .await
}

/// CLI entry point for `cw search`.
pub async fn run_search(client: &ApiClient, query: &str, filter: &SearchFilter) -> Result<()> {
    if query.trim().is_empty() {
        println!("No results.");
        return Ok(());
    }

    let data = fetch_search(client, query, filter).await?;
    let empty = Vec::new();
    let results = data
        .get("results")
        .and_then(Value::as_array)
        .unwrap_or(&empty);

    if results.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for (rank, result) in results.iter().enumerate() {
        let score = result.get("score").and_then(Value::as_f64).unwrap_or(0.0);
        println!(
            "{:>3}. [{:.3}] {:<12} {}",
            rank + 1,
            score,
            result.get("type").and_then(Value::as_str).unwrap_or("?"),
            result
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or("(untitled)"),
        );
        if let Some(snippet) = result.get("snippet").and_then(Value::as_str) {
            println!("     {}", snippet);
        }
    }
    println!();
    println!("{} result(s)", results.len());

    Ok(())
}
