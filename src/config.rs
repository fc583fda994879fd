use std::{env, time::Duration};

use crate::error::ConfigurationError;

/// Local fallback, matching the dev backend's default mount point.
pub const LOCAL_API_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// AppConfig
///
/// Holds the client's whole configuration. It is immutable once loaded, so every
/// clone handed out (to `AppState`, to the `ApiClient`) sees the same values.
/// The transport is the only component that reads the URL and the timeout. The
/// rest of the core only cares about `env`, and only for log formatting.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls fallbacks and log format.
    pub env: Env,
    // Base URL every API path is appended to, without a trailing slash.
    pub api_url: String,
    // Whole-request timeout applied by the HTTP client.
    pub request_timeout: Duration,
}

/// Env
///
/// Runtime context. `Local` allows the API URL to fall back to the dev backend
/// and selects pretty, human-readable logs. `Production` requires the API URL
/// to be set explicitly and emits JSON logs for aggregation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// A safe, non-failing configuration for test scaffolding. Reads no
    /// environment variables, points at the local dev backend and uses the
    /// default timeout. Tests that spawn a stub backend override `api_url`
    /// with struct update syntax.
    fn default() -> Self {
        Self {
            env: Env::Local,
            api_url: LOCAL_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Builds the configuration from the environment at startup. It fails fast:
    /// a missing or malformed value is returned as an error instead of being
    /// patched over, so the client never runs half-configured.
    ///
    /// Variables:
    /// - `APP_ENV`: `production` selects `Env::Production`; anything else,
    ///   including unset, is `Env::Local`.
    /// - `HOUSING_HUB_API_URL`: base URL every API path is appended to. Must be
    ///   `http://` or `https://`. Required in production; falls back to
    ///   `LOCAL_API_URL` locally. A trailing slash is trimmed.
    /// - `HOUSING_HUB_TIMEOUT_SECS`: whole-request timeout in seconds, a
    ///   positive integer. Defaults to `DEFAULT_TIMEOUT_SECS`.
    ///
    /// # Errors
    /// `ConfigurationError::MissingVar` when production has no API URL, and
    /// `ConfigurationError::InvalidVar` for a non-HTTP URL or an unusable
    /// timeout.
    pub fn load() -> Result<Self, ConfigurationError> {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        // API URL Resolution
        // Production must name its backend; local runs may rely on the dev default.
        let api_url = match (env, env::var("HOUSING_HUB_API_URL")) {
            (_, Ok(url)) => url,
            (Env::Local, Err(_)) => LOCAL_API_URL.to_string(),
            (Env::Production, Err(_)) => {
                return Err(ConfigurationError::MissingVar("HOUSING_HUB_API_URL"));
            }
        };
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigurationError::InvalidVar {
                name: "HOUSING_HUB_API_URL",
                value: api_url,
            });
        }

        // Timeout Resolution
        // Zero would disable every request, so it is rejected with the rest.
        let request_timeout = match env::var("HOUSING_HUB_TIMEOUT_SECS") {
            Ok(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigurationError::InvalidVar {
                        name: "HOUSING_HUB_TIMEOUT_SECS",
                        value: raw,
                    });
                }
            },
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            env,
            api_url: api_url.trim_end_matches('/').to_string(),
            request_timeout,
        })
    }
}
