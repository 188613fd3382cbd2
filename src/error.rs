//! Error types for the wikiseek front-end.

use wikiseek_api::WikiError;

/// Top-level error type for the front-end.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Wikipedia API or client configuration error.
    #[error("wikipedia error: {0}")]
    Api(#[from] WikiError),

    /// Configuration file error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A request settled with a user-facing error message.
    #[error("{0}")]
    Request(String),

    /// JSON output could not be produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_converts() {
        let err: AppError = WikiError::Http("timed out".into()).into();
        assert_eq!(err.to_string(), "wikipedia error: HTTP error: timed out");
    }

    #[test]
    fn io_error_converts() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.to_string().starts_with("I/O error"));
    }

    #[test]
    fn request_error_is_bare_message() {
        let err = AppError::Request("Error fetching data from Wikipedia".into());
        assert_eq!(err.to_string(), "Error fetching data from Wikipedia");
    }

    #[test]
    fn config_error_display() {
        let err = AppError::Config("expected table".into());
        assert_eq!(err.to_string(), "config error: expected table");
    }
}
