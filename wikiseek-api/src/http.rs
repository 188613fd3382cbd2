//! Shared HTTP client for Wikipedia API requests.
//!
//! Provides a configured [`reqwest::Client`] with the configured
//! User-Agent, timeout and gzip decompression.

use crate::config::ApiConfig;
use crate::error::WikiError;
use std::time::Duration;

/// Build a [`reqwest::Client`] configured for the Action API.
///
/// The client has:
/// - Timeout from config
/// - User-Agent from config (Wikimedia rejects anonymous clients)
/// - Gzip decompression
///
/// # Errors
///
/// Returns [`WikiError::Http`] if the client cannot be constructed.
pub fn build_client(config: &ApiConfig) -> Result<reqwest::Client, WikiError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| WikiError::Http(format!("failed to build HTTP client: {e}")))
}
