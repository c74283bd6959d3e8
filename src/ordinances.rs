//! Ordinance listing and detail.
//!
//! The backend has no dedicated ordinance listing endpoint, so the listing
//! is a search restricted to the `ordinances` type. Detail comes from
//! `/ordinances/{id}` and bundles the matter with its agenda-item versions
//! and votes.

use anyhow::Result;
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::meetings::display_date;
use crate::search::{fetch_search, SearchFilter};

/// Ordinance listing via `GET /search?q=ordinance&types=ordinances`.
pub async fn fetch_ordinances(client: &ApiClient) -> Result<Value, ApiError> {
    let filter = SearchFilter {
        types: Some("ordinances".to_string()),
        ..SearchFilter::default()
    };
    fetch_search(client, "ordinance", &filter).await
}

/// `GET /ordinances/{id}` — matter record plus versions and votes.
pub async fn fetch_ordinance(client: &ApiClient, id: i64) -> Result<Value, ApiError> {
    client.get_json(&format!("/ordinances/{id}")).await
}

/// CLI entry point for `cw ordinances`.
pub async fn run_ordinances(client: &ApiClient) -> Result<()> {
    let data = fetch_ordinances(client).await?;
    let empty = Vec::new();
    let results = data
        .get("results")
        .and_then(Value::as_array)
        .unwrap_or(&empty);

    if results.is_empty() {
        println!("No ordinances yet. Run `cw ingest --mode backfill` to backfill.");
        return Ok(());
    }

    println!("{:<20} {:<14} TITLE", "ID", "DATE");
    for result in results {
        println!(
            "{:<20} {:<14} {}",
            result.get("id").and_then(Value::as_str).unwrap_or("-"),
            display_date(result.get("date")),
            result
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or("(untitled)"),
        );
    }

    Ok(())
}

/// CLI entry point for `cw ordinance <id>`.
pub async fn run_ordinance(client: &ApiClient, id: i64) -> Result<()> {
    let data = fetch_ordinance(client, id).await?;
    let ordinance = &data["ordinance"];

    println!("--- Ordinance ---");
    println!(
        "id:        {}",
        ordinance.get("id").and_then(Value::as_i64).unwrap_or(id)
    );
    println!(
        "file_no:   {}",
        ordinance.get("file_no").and_then(Value::as_str).unwrap_or("-")
    );
    println!(
        "title:     {}",
        ordinance
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("(untitled)")
    );
    println!(
        "status:    {}",
        ordinance.get("status").and_then(Value::as_str).unwrap_or("-")
    );
    println!(
        "passed:    {}",
        display_date(ordinance.get("passed_date"))
    );
    println!();

    let empty = Vec::new();
    let versions = data
        .get("versions")
        .and_then(Value::as_array)
        .unwrap_or(&empty);
    println!("--- Versions ({}) ---", versions.len());
    for version in versions {
        println!(
            "{}  {}",
            version.get("id").and_then(Value::as_i64).unwrap_or_default(),
            version
                .get("title")
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
