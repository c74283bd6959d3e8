//! Base-address resolution and request execution.
//!
//! The only module that talks to the backend. Consumers hand
//! [`ApiClient::fetch_json`] a relative path plus optional request options
//! and get back parsed JSON or an [`ApiError`]; nothing else in the crate
//! touches the network.
//!
//! Resolution happens per call, never cached: which base address wins
//! depends on the [`RuntimeContext`] and on which of the two configured
//! addresses are present at that moment. See [`resolve_base`] for the
//! precedence rules.

use log::warn;
use reqwest::header::HeaderMap;
use reqwest::Method;
use serde_json::Value;

use crate::config::{ApiConfig, PUBLIC_URL_VAR, SERVER_URL_VAR};
use crate::error::ApiError;

/// Fixed relative prefix used in browser context when no public address is
/// configured. A reverse proxy co-located with the page is assumed to
/// forward `/api/*` to the backend.
pub const PROXY_API_PREFIX: &str = "/api";

/// Where the code executing this layer runs. Supplied by the hosting
/// integration at construction, not probed reflectively; the `cw` binary is
/// always [`RuntimeContext::Server`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeContext {
    /// A server-rendering process or terminal — no browser globals.
    Server,
    /// An end-user browser page.
    Browser,
}

/// Which configuration source produced a resolved base address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseSource {
    /// The server-preferred address, in server context.
    ServerPreferred,
    /// The public address, in browser context.
    Public,
    /// The public address during server execution because the preferred
    /// variable was unset. Allowed but discouraged: the public address may
    /// not be reachable from the server's network.
    PublicFallback,
    /// The fixed [`PROXY_API_PREFIX`], browser context with no configuration.
    ProxyPath,
}

/// A per-call resolved base address.
///
/// `base` is never empty and never ends in `/`; `source` distinguishes the
/// discouraged server-side fallback from an ordinary public resolution so
/// callers and tests can observe it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBase {
    pub base: String,
    pub source: BaseSource,
}

/// Resolve the backend base address for a single call.
///
/// Pure function of the current context and configuration, re-evaluated on
/// every request so configuration edits between calls (tests, hot reloads)
/// take effect immediately.
///
/// Precedence:
/// - server context: server-preferred address, else public address (tagged
///   [`BaseSource::PublicFallback`]), else [`ApiError::ConfigurationMissing`]
///   naming both recognized variables;
/// - browser context: public address, else [`PROXY_API_PREFIX`] — never an
///   error, and the server-only address is ignored entirely.
pub fn resolve_base(
    config: &ApiConfig,
    context: RuntimeContext,
) -> Result<ResolvedBase, ApiError> {
    match context {
        RuntimeContext::Server => {
            if let Some(url) = config.server_preferred() {
                Ok(ResolvedBase {
                    base: normalize_base(url),
                    source: BaseSource::ServerPreferred,
                })
            } else if let Some(url) = config.public() {
                warn!(
                    "{SERVER_URL_VAR} is not set; using {PUBLIC_URL_VAR} for a server-side request"
                );
                Ok(ResolvedBase {
                    base: normalize_base(url),
                    source: BaseSource::PublicFallback,
                })
            } else {
                Err(ApiError::ConfigurationMissing)
            }
        }
        RuntimeContext::Browser => match config.public() {
            Some(url) => Ok(ResolvedBase {
                base: normalize_base(url),
                source: BaseSource::Public,
            }),
            None => Ok(ResolvedBase {
                base: PROXY_API_PREFIX.to_string(),
                source: BaseSource::ProxyPath,
            }),
        },
    }
}

/// Strip trailing slashes so path concatenation yields exactly one `/`.
fn normalize_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Join a normalized base with a request path, tolerating paths given with
/// or without a leading `/`.
fn join_url(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Build a percent-encoded query string from key/value pairs. Empty input
/// yields an empty string.
pub fn query_string<I, K, V>(pairs: I) -> String
where
    I: IntoIterator,
    I::Item: std::borrow::Borrow<(K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

/// Options forwarded with a single request.
///
/// Everything here passes through to the transport unmodified; `method`
/// additionally feeds error reporting (a request without one is a `GET`).
/// This layer applies no timeout of its own — callers that need one attach
/// it via these options or their own transport.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Option<Method>,
    pub headers: HeaderMap,
    pub body: Option<Value>,
    pub timeout: Option<std::time::Duration>,
}

impl RequestOptions {
    /// Options carrying only a method override.
    pub fn method(method: Method) -> Self {
        Self {
            method: Some(method),
            ..Self::default()
        }
    }
}

/// Stateless, reentrant client for the civic-records backend.
///
/// Holds no mutable request state; concurrent calls are fully independent.
/// One logical network attempt per call — no retries, no caching.
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    context: RuntimeContext,
}

impl ApiClient {
    pub fn new(config: ApiConfig, context: RuntimeContext) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            context,
        }
    }

    /// Client for a server-side process with environment-backed configuration.
    pub fn from_env() -> Self {
        Self::new(ApiConfig::from_env(), RuntimeContext::Server)
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Mutable configuration access. The next call re-resolves against the
    /// updated values; nothing resolved earlier leaks into it.
    pub fn config_mut(&mut self) -> &mut ApiConfig {
        &mut self.config
    }

    /// The base address this client would use for a request made right now.
    pub fn resolve_base(&self) -> Result<ResolvedBase, ApiError> {
        resolve_base(&self.config, self.context)
    }

    /// Convenience `GET` with default options.
    pub async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        self.fetch_json(path, RequestOptions::default()).await
    }

    /// Execute one request against the backend and decode the JSON body.
    ///
    /// The path is joined to the per-call resolved base address; a resolver
    /// failure propagates unchanged. Failures from this point on always name
    /// the effective method and the fully-resolved URL:
    /// `API request failed (<METHOD> <URL>): <detail>`.
    pub async fn fetch_json(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value, ApiError> {
        let resolved = self.resolve_base()?;
        let url = join_url(&resolved.base, path);
        let method = options.method.unwrap_or(Method::GET);

        let mut request = self
            .http
            .request(method.clone(), url.as_str())
            .headers(options.headers);
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }
        if let Some(body) = &options.body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|source| ApiError::Transport {
            method: method.clone(),
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus {
                method,
                url,
                status,
            });
        }

        response
            .json()
            .await
            .map_err(|source| ApiError::Decode {
                method,
                url,
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(server: Option<&str>, public: Option<&str>) -> ApiConfig {
        ApiConfig {
            api_url_server: server.map(String::from),
            public_api_url: public.map(String::from),
        }
    }

    #[test]
    fn server_context_prefers_server_address() {
        let cfg = config(
            Some("http://backend:8000/api/"),
            Some("http://localhost:8000/api"),
        );
        let resolved = resolve_base(&cfg, RuntimeContext::Server).unwrap();
        assert_eq!(resolved.base, "http://backend:8000/api");
        assert_eq!(resolved.source, BaseSource::ServerPreferred);
    }

    #[test]
    fn server_context_falls_back_to_public_with_observable_warning() {
        let cfg = config(None, Some("http://localhost:8000/api/"));
        let resolved = resolve_base(&cfg, RuntimeContext::Server).unwrap();
        assert_eq!(resolved.base, "http://localhost:8000/api");
        assert_eq!(resolved.source, BaseSource::PublicFallback);
    }

    #[test]
    fn server_context_without_configuration_fails() {
        let cfg = config(None, None);
        let err = resolve_base(&cfg, RuntimeContext::Server).unwrap_err();
        assert!(matches!(err, ApiError::ConfigurationMissing));
        let message = err.to_string();
        assert!(message.contains(SERVER_URL_VAR));
        assert!(message.contains(PUBLIC_URL_VAR));
    }

    #[test]
    fn blank_server_address_counts_as_unset() {
        let cfg = config(Some(""), Some("http://localhost:8000/api"));
        let resolved = resolve_base(&cfg, RuntimeContext::Server).unwrap();
        assert_eq!(resolved.source, BaseSource::PublicFallback);
    }

    #[test]
    fn browser_context_uses_public_and_ignores_server_address() {
        let cfg = config(
            Some("http://backend:8000/api"),
            Some("http://localhost:8000/api/"),
        );
        let resolved = resolve_base(&cfg, RuntimeContext::Browser).unwrap();
        assert_eq!(resolved.base, "http://localhost:8000/api");
        assert_eq!(resolved.source, BaseSource::Public);
    }

    #[test]
    fn browser_context_defaults_to_proxy_prefix() {
        let cfg = config(Some("http://backend:8000/api"), None);
        let resolved = resolve_base(&cfg, RuntimeContext::Browser).unwrap();
        assert_eq!(resolved.base, "/api");
        assert_eq!(resolved.source, BaseSource::ProxyPath);
    }

    #[test]
    fn resolution_is_idempotent_until_configuration_changes() {
        let mut client = ApiClient::new(
            config(Some("http://backend:8000/api"), None),
            RuntimeContext::Server,
        );
        let first = client.resolve_base().unwrap();
        let second = client.resolve_base().unwrap();
        assert_eq!(first, second);

        client.config_mut().api_url_server = Some("http://other:9000/api/".to_string());
        let third = client.resolve_base().unwrap();
        assert_eq!(third.base, "http://other:9000/api");
    }

    #[test]
    fn join_url_yields_one_separating_slash() {
        assert_eq!(
            join_url("http://backend:8000/api", "/meetings"),
            "http://backend:8000/api/meetings"
        );
        assert_eq!(
            join_url("http://backend:8000/api", "meetings"),
            "http://backend:8000/api/meetings"
        );
    }

    #[test]
    fn normalize_base_strips_trailing_slashes() {
        assert_eq!(normalize_base("http://backend:8000/api///"), "http://backend:8000/api");
        assert_eq!(normalize_base("http://backend:8000/api"), "http://backend:8000/api");
    }

    #[test]
    fn query_string_percent_encodes_pairs() {
        let query = query_string([("q", "parks & trails"), ("types", "meetings,ordinances")]);
        assert_eq!(query, "q=parks+%26+trails&types=meetings%2Cordinances");
    }

    #[test]
    fn query_string_with_no_pairs_is_empty() {
        let pairs: [(&str, &str); 0] = [];
        assert_eq!(query_string(pairs), "");
    }
}
