//! Error types for the wikiseek-api crate.
//!
//! All errors use stable string messages suitable for logging. The
//! user-facing wording lives in the view layer; these carry the cause.

/// Errors that can occur while talking to the Wikipedia API.
#[derive(Debug, thiserror::Error)]
pub enum WikiError {
    /// The request could not be sent, or the server answered with a non-2xx status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The API answered 200 but reported an error in the body.
    #[error("API error {code}: {info}")]
    Api {
        /// Machine-readable error code, e.g. `nosuchpageid`.
        code: String,
        /// Human-readable description from the API.
        info: String,
    },

    /// The response body did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid client configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for wikiseek-api results.
pub type Result<T> = std::result::Result<T, WikiError>;
