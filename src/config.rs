use serde::Deserialize;
use std::env;

/// Backend base address used only during server-side execution. Preferred
/// over [`PUBLIC_URL_VAR`] when both are set, because the public address may
/// not be reachable from the server's network.
pub const SERVER_URL_VAR: &str = "CW_API_URL_SERVER";

/// Backend base address usable from both server and browser contexts.
pub const PUBLIC_URL_VAR: &str = "CW_PUBLIC_API_URL";

/// The two optionally-set base addresses the resolver chooses between.
///
/// Constructed once per run (or per test) and passed by reference; the
/// resolver consults the accessors on every call, so editing a config
/// between calls takes effect on the next request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiConfig {
    /// Server-preferred base address (`CW_API_URL_SERVER`).
    #[serde(default)]
    pub api_url_server: Option<String>,
    /// Public base address (`CW_PUBLIC_API_URL`).
    #[serde(default)]
    pub public_api_url: Option<String>,
}

impl ApiConfig {
    /// Read both recognized environment variables.
    pub fn from_env() -> Self {
        Self {
            api_url_server: env::var(SERVER_URL_VAR).ok(),
            public_api_url: env::var(PUBLIC_URL_VAR).ok(),
        }
    }

    /// Server-preferred address, if set to a non-empty value.
    ///
    /// A variable defined but blank counts as unset — deployments routinely
    /// leave unused variables exported with empty values.
    pub fn server_preferred(&self) -> Option<&str> {
        self.api_url_server.as_deref().filter(|v| !v.is_empty())
    }

    /// Public address, if set to a non-empty value.
    pub fn public(&self) -> Option<&str> {
        self.public_api_url.as_deref().filter(|v| !v.is_empty())
    }
}
