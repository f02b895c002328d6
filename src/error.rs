//! Error types for polyscene.

use thiserror::Error;

/// Construction and configuration errors.
///
/// Catalog request failures have their own type,
/// [`CatalogError`](crate::catalog::CatalogError), since most callers never
/// see them.
#[derive(Error, Debug)]
pub enum Error {
    /// No API key was configured
    #[error("Missing API key (set {0})")]
    MissingApiKey(&'static str),

    /// Base URL could not be parsed
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// API key is not a valid header value
    #[error("Invalid API key header value")]
    InvalidApiKey(#[from] reqwest::header::InvalidHeaderValue),

    /// Environment value could not be parsed
    #[error("Invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Gesture state code outside the known range
    #[error("Unknown gesture state: {0}")]
    UnknownGestureState(u8),
}

/// Result type alias for polyscene operations.
pub type Result<T> = std::result::Result<T, Error>;
