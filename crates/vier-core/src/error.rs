//! Error types for the Vier scraper
//!
//! This module defines all error types used throughout the library.
//! VierError implements Serialize for Tauri compatibility.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for Vier scraper operations
#[derive(Error, Debug)]
pub enum VierError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Failed to parse page content
    #[error("Failed to parse HTML: {0}")]
    ParseError(String),

    /// A required field could not be found on any fetched page
    #[error("Unable to extract {0}")]
    FieldNotFound(String),

    /// URL does not match any supported shape
    #[error("Unsupported URL: {0}")]
    UnsupportedUrl(String),

    /// Rate limited by the server (HTTP 429)
    #[error("Rate limited - too many requests")]
    RateLimited,

    /// Requested page was not found (HTTP 404)
    #[error("Page not found: {0}")]
    NotFound(String),

    /// Server answered with a status that is neither success nor an error
    #[error("Unexpected HTTP status {0}")]
    UnexpectedStatus(u16),

    /// HLS manifest could not be parsed
    #[error("Invalid playlist: {0}")]
    PlaylistError(String),

    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Serialize VierError as a string for Tauri compatibility
impl Serialize for VierError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for Vier scraper operations
pub type Result<T> = std::result::Result<T, VierError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vier_error_display_parse_error() {
        let error = VierError::ParseError("invalid selector".to_string());
        assert_eq!(error.to_string(), "Failed to parse HTML: invalid selector");
    }

    #[test]
    fn test_vier_error_display_field_not_found() {
        let error = VierError::FieldNotFound("filename".to_string());
        assert_eq!(error.to_string(), "Unable to extract filename");
    }

    #[test]
    fn test_vier_error_display_unsupported_url() {
        let error = VierError::UnsupportedUrl("http://example.com/".to_string());
        assert_eq!(error.to_string(), "Unsupported URL: http://example.com/");
    }

    #[test]
    fn test_vier_error_display_rate_limited() {
        let error = VierError::RateLimited;
        assert_eq!(error.to_string(), "Rate limited - too many requests");
    }

    #[test]
    fn test_vier_error_display_not_found() {
        let error = VierError::NotFound("http://www.vier.be/x".to_string());
        assert_eq!(error.to_string(), "Page not found: http://www.vier.be/x");
    }

    #[test]
    fn test_vier_error_display_unexpected_status() {
        let error = VierError::UnexpectedStatus(304);
        assert_eq!(error.to_string(), "Unexpected HTTP status 304");
    }

    #[test]
    fn test_vier_error_display_invalid_config() {
        let error = VierError::InvalidConfig("requests_per_second must be positive".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid configuration: requests_per_second must be positive"
        );
    }

    #[test]
    fn test_vier_error_serialize() {
        let error = VierError::FieldNotFound("filename".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert_eq!(json, "\"Unable to extract filename\"");
    }

    #[test]
    fn test_vier_error_serialize_playlist_error() {
        let error = VierError::PlaylistError("empty manifest".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert_eq!(json, "\"Invalid playlist: empty manifest\"");
    }
}
