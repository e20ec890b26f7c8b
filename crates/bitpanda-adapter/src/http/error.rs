/*
[INPUT]:  Error sources (transport, API, decoding, validation)
[OUTPUT]: Structured error types with the original response attached
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use std::fmt;

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use thiserror::Error;

use crate::types::{ErrorResponse, OrderValidationError};

/// Non-2xx response from the exchange.
///
/// Keeps the parts of the original HTTP response so callers can inspect
/// the status code, headers (e.g. request ids) or raw body.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
    /// `error` field of the body, or a fallback when the body is not the
    /// documented error shape.
    pub message: String,
}

impl ApiError {
    pub fn from_parts(status: StatusCode, headers: HeaderMap, body: String) -> Self {
        let message = match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(parsed) => parsed.error,
            Err(_) if !body.trim().is_empty() => body.trim().to_string(),
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };

        Self {
            status,
            headers,
            body,
            message,
        }
    }

    /// The body parsed as the exchange's error shape, if it was one.
    pub fn error_response(&self) -> Option<ErrorResponse> {
        serde_json::from_str(&self.body).ok()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API error (status {}): {}", self.status.as_u16(), self.message)
    }
}

/// Main error type for the Bitpanda adapter
#[derive(Error, Debug)]
pub enum BitpandaError {
    /// Transport failure: connection, timeout, TLS, body read
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("{0}")]
    Api(Box<ApiError>),

    /// Response body did not match the expected shape
    #[error("Failed to decode response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Private endpoint called without an API token
    #[error("Authentication required: {message}")]
    Authentication { message: String },

    /// Order rejected before sending
    #[error("Invalid order: {0}")]
    InvalidOrder(#[from] OrderValidationError),

    /// Request parameters the exchange would reject
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BitpandaError {
    /// HTTP status of an API error
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            BitpandaError::Api(err) => Some(err.status),
            BitpandaError::Http(err) => err.status(),
            _ => None,
        }
    }

    /// Message from the exchange's error body
    pub fn api_message(&self) -> Option<&str> {
        match self {
            BitpandaError::Api(err) => Some(err.message.as_str()),
            _ => None,
        }
    }

    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        match self {
            BitpandaError::Authentication { .. } => true,
            BitpandaError::Api(err) => matches!(
                err.status,
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
            ),
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Create an API error from status code and raw body
    pub fn api_error(status: StatusCode, headers: HeaderMap, body: impl Into<String>) -> Self {
        BitpandaError::Api(Box::new(ApiError::from_parts(status, headers, body.into())))
    }
}

/// Result type alias for Bitpanda operations
pub type Result<T> = std::result::Result<T, BitpandaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_parses_error_body() {
        let err = BitpandaError::api_error(
            StatusCode::BAD_REQUEST,
            HeaderMap::new(),
            r#"{"error":"INVALID_PRICE"}"#,
        );

        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(err.api_message(), Some("INVALID_PRICE"));
        assert_eq!(err.to_string(), "API error (status 400): INVALID_PRICE");
        match err {
            BitpandaError::Api(api) => {
                assert_eq!(
                    api.error_response(),
                    Some(ErrorResponse {
                        error: "INVALID_PRICE".to_string()
                    })
                );
            }
            _ => panic!("Expected Api error variant"),
        }
    }

    #[test]
    fn test_api_error_falls_back_to_body_or_reason() {
        let err = BitpandaError::api_error(
            StatusCode::BAD_GATEWAY,
            HeaderMap::new(),
            "<html>upstream down</html>",
        );
        assert_eq!(err.api_message(), Some("<html>upstream down</html>"));

        let err = BitpandaError::api_error(StatusCode::NOT_FOUND, HeaderMap::new(), "");
        assert_eq!(err.api_message(), Some("Not Found"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_error_is_auth_error() {
        let unauthorized = BitpandaError::api_error(
            StatusCode::UNAUTHORIZED,
            HeaderMap::new(),
            r#"{"error":"MISSING_CREDENTIALS"}"#,
        );
        assert!(unauthorized.is_auth_error());
        assert!(
            BitpandaError::Authentication {
                message: "no token".to_string()
            }
            .is_auth_error()
        );
        assert!(!BitpandaError::Config("bad".to_string()).is_auth_error());
    }
}
