//! Document detail view.

use anyhow::Result;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;

/// `GET /documents/{id}`. Document ids are opaque text keys that may contain
/// `/` and other reserved characters, so the id travels as a single
/// percent-encoded path segment.
pub async fn fetch_document(client: &ApiClient, id: &str) -> Result<Value, ApiError> {
    let encoded = utf8_percent_encode(id, NON_ALPHANUMERIC).to_string();
    client.get_json(&format!("/documents/{encoded}")).await
}

/// CLI entry point for `cw document <id>`.
pub async fn run_document(client: &ApiClient, id: &str) -> Result<()> {
    let data = fetch_document(client, id).await?;
    let doc = &data["document"];

    println!("--- Document ---");
    println!(
        "id:       {}",
        doc.get("id").and_then(Value::as_str).unwrap_or(id)
    );
    println!(
        "title:    {}",
        doc.get("title")
            .and_then(Value::as_str)
            .unwrap_or("(untitled)")
    );
    if let Some(source_type) = doc.get("source_type").and_then(Value::as_str) {
        println!("source:   {}", source_type);
    }
    if let Some(url) = doc.get("file_url").and_then(Value::as_str) {
        println!("file_url: {}", url);
    }
    println!();

    match doc.get("text_content").and_then(Value::as_str) {
        Some(text) if !text.is_empty() => {
            println!("--- Text ---");
            println!("{}", text);
        }
        _ => println!("(no extracted text)"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_ids_are_path_safe() {
        let encoded = utf8_percent_encode("doc/meeting:42 minutes.pdf", NON_ALPHANUMERIC).to_string();
        assert_eq!(encoded, "doc%2Fmeeting%3A42%20minutes%2Epdf");
    }
}
