//! Configuration for the catalog client, search session and scene.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::Filters;
use crate::defaults;
use crate::error::{Error, Result};
use crate::scene::AssetRef;

/// Catalog client configuration, fixed at construction.
#[derive(Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL every request path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Value of the `x-auth-token` header; never serialized
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Per-request timeout
    #[serde(default = "defaults::request_timeout")]
    pub timeout: Duration,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn default_base_url() -> String {
    defaults::BASE_URL.to_string()
}

fn default_user_agent() -> String {
    defaults::USER_AGENT.to_string()
}

impl CatalogConfig {
    /// Configuration for the public Poly Pizza API with the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            api_key: api_key.into(),
            timeout: defaults::request_timeout(),
            user_agent: default_user_agent(),
        }
    }

    /// Point the client at a different base URL (mirrors, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read configuration from the process environment.
    ///
    /// `POLY_PIZZA_API_KEY` is required; `POLY_PIZZA_BASE_URL` and
    /// `POLY_PIZZA_TIMEOUT_SECS` override the defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(defaults::API_KEY_ENV)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(Error::MissingApiKey(defaults::API_KEY_ENV))?;

        let mut config = Self::new(api_key);

        if let Some(base_url) = lookup(defaults::BASE_URL_ENV).filter(|s| !s.trim().is_empty()) {
            config.base_url = base_url.trim().to_string();
        }

        if let Some(raw) = lookup(defaults::TIMEOUT_ENV) {
            let secs = raw.trim().parse::<u64>().map_err(|_| Error::InvalidEnv {
                name: defaults::TIMEOUT_ENV,
                value: raw.clone(),
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the base URL is an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| Error::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        Ok(())
    }
}

/// Search session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Quiet period before a search fires
    pub debounce: Duration,
    /// Drop responses from searches superseded by a newer one
    pub discard_stale_responses: bool,
    /// Filters sent with every search
    pub filters: Filters,
    /// Multiplier applied to rotate gesture deltas
    pub rotation_sensitivity: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce: defaults::debounce(),
            discard_stale_responses: defaults::discard_stale_responses(),
            filters: Filters::new(),
            rotation_sensitivity: defaults::rotation_sensitivity(),
        }
    }
}

/// Initial scene contents used until the user picks something else.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDefaults {
    pub asset: AssetRef,
    pub label: String,
    pub label_position: [f32; 3],
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: f32,
}

impl Default for SceneDefaults {
    fn default() -> Self {
        Self {
            asset: AssetRef::Builtin(defaults::DEFAULT_ASSET.to_string()),
            label: defaults::DEFAULT_LABEL.to_string(),
            label_position: defaults::LABEL_POSITION,
            position: defaults::INITIAL_POSITION,
            rotation: [0.0; 3],
            scale: defaults::INITIAL_SCALE,
        }
    }
}
