//! User-facing fetch errors

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Why a lookup produced no weather card.
///
/// The `Display` text is exactly what the widget shows, so reducers store
/// `error.to_string()` directly.
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum FetchError {
    /// Blank or whitespace-only query; no request is made
    #[error("Please enter a city name.")]
    EmptyInput,
    /// Upstream answered 404 for the city
    #[error("City not found. Please try again.")]
    NotFound,
    /// Upstream answered 401 (missing or bad API key)
    #[error("Invalid API key. Please check your credentials.")]
    Unauthorized,
    /// Transport failure, unexpected status or malformed payload
    #[error("An error occurred while fetching the data.")]
    Unknown,
}

impl FetchError {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        match status {
            reqwest::StatusCode::NOT_FOUND => FetchError::NotFound,
            reqwest::StatusCode::UNAUTHORIZED => FetchError::Unauthorized,
            _ => FetchError::Unknown,
        }
    }
}
