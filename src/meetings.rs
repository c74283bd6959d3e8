//! Meetings timeline and per-meeting detail.
//!
//! Mirrors the backend's `/meetings` listing (optional date-range and
//! keyword filters) and `/meetings/{id}` detail, which bundles the meeting
//! with its agenda items, documents, and recorded votes.

use anyhow::Result;
use chrono::{DateTime, NaiveDate};
use serde_json::Value;

use crate::client::{query_string, ApiClient};
use crate::error::ApiError;

/// Optional filters for the meetings listing.
#[derive(Debug, Default, Clone)]
pub struct MeetingFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub keyword: Option<String>,
}

/// `GET /meetings`. Absent filters are omitted from the query entirely.
pub async fn fetch_meetings(
    client: &ApiClient,
    filter: &MeetingFilter,
) -> Result<Value, ApiError> {
    let mut pairs: Vec<(&str, String)> = Vec::new();
    if let Some(from) = filter.from {
        pairs.push(("from", from.to_string()));
    }
    if let Some(to) = filter.to {
        pairs.push(("to", to.to_string()));
    }
    if let Some(keyword) = &filter.keyword {
        pairs.push(("keyword", keyword.clone()));
    }

    let query = query_string(&pairs);
    if query.is_empty() {
        client.get_json("/meetings").await
    } else {
        client.get_json(&format!("/meetings?{query}")).await
    }
}

/// `GET /meetings/{id}` — meeting record plus agenda items, documents, votes.
pub async fn fetch_meeting(client: &ApiClient, id: i64) -> Result<Value, ApiError> {
    client.get_json(&format!("/meetings/{id}")).await
}

/// CLI entry point for `cw meetings`.
pub async fn run_meetings(client: &ApiClient, filter: &MeetingFilter) -> Result<()> {
    let data = fetch_meetings(client, filter).await?;
    let empty = Vec::new();
    let items = data
        .get("items")
        .and_then(Value::as_array)
        .unwrap_or(&empty);

    if items.is_empty() {
        println!("No meetings yet. Run `cw ingest --mode backfill` to backfill.");
        return Ok(());
    }

    println!("{:<8} {:<18} {:<28} TITLE", "ID", "DATE", "LOCATION");
    for item in items {
        println!(
            "{:<8} {:<18} {:<28} {}",
            item.get("id").and_then(Value::as_i64).unwrap_or_default(),
            display_date(item.get("meeting_date")),
            item.get("location").and_then(Value::as_str).unwrap_or("-"),
            item.get("title")
                .and_then(Value::as_str)
                .unwrap_or("(untitled)"),
        );
    }

    Ok(())
}

/// CLI entry point for `cw meeting <id>`.
pub async fn run_meeting(client: &ApiClient, id: i64) -> Result<()> {
    let data = fetch_meeting(client, id).await?;
    let meeting = &data["meeting"];

    println!("--- Meeting ---");
    println!(
        "id:       {}",
        meeting.get("id").and_then(Value::as_i64).unwrap_or(id)
    );
    println!(
        "title:    {}",
        meeting
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("(untitled)")
    );
    println!("date:     {}", display_date(meeting.get("meeting_date")));
    println!(
        "location: {}",
        meeting.get("location").and_then(Value::as_str).unwrap_or("-")
    );
    println!(
        "status:   {}",
        meeting.get("status").and_then(Value::as_str).unwrap_or("-")
    );
    println!();

    let empty = Vec::new();
    let agenda = data
        .get("agenda_items")
        .and_then(Value::as_array)
        .unwrap_or(&empty);
    println!("--- Agenda ({}) ---", agenda.len());
    for item in agenda {
        let sequence = item
            .get("agenda_sequence")
            .and_then(Value::as_i64)
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>4}  {}",
            sequence,
            item.get("title")
                .and_then(Value::as_str)
                .unwrap_or("(untitled)")
        );
    }
    println!();

    let documents = data
        .get("documents")
        .and_then(Value::as_array)
        .unwrap_or(&empty);
    println!("--- Documents ({}) ---", documents.len());
    for doc in documents {
        println!(
            "{}  {}",
            doc.get("id").and_then(Value::as_str).unwrap_or("-"),
            doc.get("title")
                .and_then(Value::as_str)
                .unwrap_or("(untitled)")
        );
    }
    println!();

    let votes = data.get("votes").and_then(Value::as_array).unwrap_or(&empty);
    println!("--- Votes ({}) ---", votes.len());
    for vote in votes {
        println!(
            "{:<28} {}",
            vote.get("person_name")
                .and_then(Value::as_str)
                .unwrap_or("(unknown)"),
            vote.get("vote_value").and_then(Value::as_str).unwrap_or("-")
        );
    }

    Ok(())
}

/// Render a backend timestamp for table output. Timestamps arrive as RFC
/// 3339 strings or null.
pub(crate) fn display_date(value: Option<&Value>) -> String {
    match value.and_then(Value::as_str) {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|_| raw.to_string()),
        None => "unknown date".to_string(),
    }
}
