//! Source configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::SourceError;

/// Default base URL of the Greenhouse boards API.
pub const DEFAULT_API_BASE: &str = "https://boards-api.greenhouse.io/v1/boards";

/// Configuration for the source connector, loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SourceConfig {
    /// Board token scoping which remote collections are fetched.
    #[validate(length(min = 1))]
    pub board_token: String,

    /// Base URL of the boards API.
    #[validate(length(min = 1))]
    pub api_base: String,
}

impl SourceConfig {
    /// Build a config for a board token against the public API.
    pub fn new(board_token: impl Into<String>) -> Self {
        Self {
            board_token: board_token.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` first (non-fatal if `.env` is absent).
    /// `GREENHOUSE_BOARD_TOKEN` is required and returns a
    /// [`SourceError::Config`] when absent or empty; `GREENHOUSE_API_BASE`
    /// falls back to [`DEFAULT_API_BASE`].
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        let board_token = std::env::var("GREENHOUSE_BOARD_TOKEN")
            .map_err(|_| SourceError::Config("GREENHOUSE_BOARD_TOKEN is required".to_string()))?;

        let api_base = std::env::var("GREENHOUSE_API_BASE")
            .unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        let config = Self {
            board_token,
            api_base,
        };
        config
            .validate()
            .map_err(|e| SourceError::Config(e.to_string()))?;

        Ok(config)
    }
}
