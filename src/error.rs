//! Failure taxonomy for the API access layer.
//!
//! Every failure names enough context to tell "configuration wrong" from
//! "backend down" from "path wrong": transport, status, and decode errors
//! all carry the attempted method and the fully-resolved URL, rendered in
//! the stable shape `API request failed (<METHOD> <URL>): <detail>`.

use reqwest::{Method, StatusCode};

use crate::config::{PUBLIC_URL_VAR, SERVER_URL_VAR};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No usable base address for the current runtime context. Fatal to the
    /// call; the executor adds nothing since no URL was formed yet.
    #[error(
        "missing API base URL for server runtime: set {} (preferred) or {}",
        SERVER_URL_VAR,
        PUBLIC_URL_VAR
    )]
    ConfigurationMissing,

    /// The network call itself could not complete (DNS, connection refused,
    /// timeout). The underlying transport error is preserved as `source()`.
    #[error("API request failed ({method} {url}): {source}")]
    Transport {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The call completed but the backend answered with a non-2xx status.
    #[error("API request failed ({method} {url}): {status}")]
    HttpStatus {
        method: Method,
        url: String,
        status: StatusCode,
    },

    /// The response body was not valid JSON.
    #[error("API request failed ({method} {url}): invalid JSON in response: {source}")]
    Decode {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },
}
