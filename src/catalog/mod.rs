//! Poly Pizza catalog client.
//!
//! Three GET operations against one base URL, each authenticated with a
//! static `x-auth-token` header. The plain operations never fail: any
//! request failure is logged and collapsed into an empty list or `None`.
//! The `try_*` variants expose the underlying [`CatalogError`] for callers
//! that need to tell "no matches" apart from "request failed".

mod filters;
mod models;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::CatalogConfig;
use crate::defaults;

pub use filters::{FilterValue, Filters};
pub use models::{Creator, ModelDetail, ModelSummary};

use models::{SearchResponse, UserModelsResponse};

/// Longest error body kept in [`CatalogError::Status`].
const MAX_ERROR_BODY: usize = 256;

/// A catalog request failed.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Request was not sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Connection, TLS or timeout failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Service answered with a non-2xx status
    #[error("Server returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Body was not the expected JSON
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CatalogError {
    /// HTTP status of the failed request, if the service answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// The catalog operations a search session depends on.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Search by keyword; empty on no matches or failure.
    async fn search_models(&self, keyword: &str, filters: &Filters) -> Vec<ModelSummary>;

    /// Look up one model; `None` when missing or on failure.
    async fn get_model_by_id(&self, id: &str) -> Option<ModelDetail>;

    /// List a user's models; empty on no models or failure.
    async fn get_models_by_user(&self, username: &str, filters: &Filters) -> Vec<ModelSummary>;
}

/// HTTP client for the Poly Pizza REST API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    /// Build a client from configuration.
    pub fn new(config: &CatalogConfig) -> crate::Result<Self> {
        config.validate()?;

        let mut auth = HeaderValue::from_str(&config.api_key)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(defaults::AUTH_HEADER, auth);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build a client from `POLY_PIZZA_*` environment variables.
    pub fn from_env() -> crate::Result<Self> {
        Self::new(&CatalogConfig::from_env()?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search models by keyword, logging and swallowing failures.
    pub async fn search_models(&self, keyword: &str, filters: &Filters) -> Vec<ModelSummary> {
        match self.try_search_models(keyword, filters).await {
            Ok(models) => models,
            Err(e) => {
                log::error!("Error searching models for '{}': {}", keyword, e);
                Vec::new()
            }
        }
    }

    /// Fetch a model by ID, logging and swallowing failures.
    pub async fn get_model_by_id(&self, id: &str) -> Option<ModelDetail> {
        match self.try_get_model_by_id(id).await {
            Ok(model) => Some(model),
            Err(e) => {
                log::error!("Error fetching model '{}': {}", id, e);
                None
            }
        }
    }

    /// List models uploaded by a user, logging and swallowing failures.
    pub async fn get_models_by_user(&self, username: &str, filters: &Filters) -> Vec<ModelSummary> {
        match self.try_get_models_by_user(username, filters).await {
            Ok(models) => models,
            Err(e) => {
                log::error!("Error fetching models for user '{}': {}", username, e);
                Vec::new()
            }
        }
    }

    /// `GET /search/{keyword}` with the keyword percent-encoded.
    pub async fn try_search_models(
        &self,
        keyword: &str,
        filters: &Filters,
    ) -> Result<Vec<ModelSummary>> {
        if keyword.is_empty() {
            return Err(CatalogError::InvalidRequest("search keyword is empty".into()));
        }

        let path = search_path(keyword);
        let response: SearchResponse = self.get_json(&path, filters).await?;
        Ok(response.into_models())
    }

    /// `GET /model/{id}`. The id is used as given.
    pub async fn try_get_model_by_id(&self, id: &str) -> Result<ModelDetail> {
        if id.is_empty() {
            return Err(CatalogError::InvalidRequest("model id is empty".into()));
        }

        self.get_json(&format!("/model/{}", id), &Filters::new())
            .await
    }

    /// `GET /user/{username}`. The username is used as given.
    pub async fn try_get_models_by_user(
        &self,
        username: &str,
        filters: &Filters,
    ) -> Result<Vec<ModelSummary>> {
        if username.is_empty() {
            return Err(CatalogError::InvalidRequest("username is empty".into()));
        }

        let response: UserModelsResponse = self
            .get_json(&format!("/user/{}", username), filters)
            .await?;
        Ok(response.into_models())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, filters: &Filters) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("GET {} ({} filter(s))", url, filters.len());

        let mut request = self.client.get(&url);
        if !filters.is_empty() {
            request = request.query(&filters.to_query());
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(CatalogError::Status {
                status,
                body: truncate(&body, MAX_ERROR_BODY),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl Catalog for CatalogClient {
    async fn search_models(&self, keyword: &str, filters: &Filters) -> Vec<ModelSummary> {
        CatalogClient::search_models(self, keyword, filters).await
    }

    async fn get_model_by_id(&self, id: &str) -> Option<ModelDetail> {
        CatalogClient::get_model_by_id(self, id).await
    }

    async fn get_models_by_user(&self, username: &str, filters: &Filters) -> Vec<ModelSummary> {
        CatalogClient::get_models_by_user(self, username, filters).await
    }
}

/// Request path for a keyword search.
///
/// Everything except ASCII alphanumerics and `-_.~` is percent-encoded, so
/// `/`, `?`, `#`, spaces and non-ASCII text stay inside the one segment.
pub fn search_path(keyword: &str) -> String {
    format!("/search/{}", urlencoding::encode(keyword))
}

fn truncate(body: &str, max: usize) -> String {
    if body.len() <= max {
        return body.to_string();
    }
    let mut end = max;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
