// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for kubectl-assistant
//!
//! This module defines all error types used throughout the application.

use thiserror::Error;

/// Main error type for kubectl-assistant operations
#[derive(Error, Debug)]
pub enum AssistantError {
    /// API-related errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Tool execution errors
    #[error("Tool execution failed: {0}")]
    ToolExecution(String),

    /// Schema source errors (cluster OpenAPI fetch or lookup)
    #[error("Schema error: {0}")]
    Schema(String),

    /// kubectl subprocess failures
    #[error("kubectl error: {0}")]
    Kubectl(String),

    /// Manifest validation errors
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The conversation exceeded the tool-call iteration cap
    #[error("Tool-call limit reached after {0} calls")]
    ToolCallLimit(u32),

    /// The invocation was interrupted by the operator
    #[error("Interrupted")]
    Interrupted,

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Provider-specific error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Authentication failed (invalid API key)
    #[error("Authentication failed: invalid API key")]
    AuthenticationFailed,

    /// Rate limited by the API (HTTP 429)
    #[error("Rate limited: retry after {0} seconds")]
    RateLimited(u32),

    /// Invalid response from the API
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// API returned an error
    #[error("API error ({status}): {message}")]
    ServerError { status: u16, message: String },
}

/// Result type alias for kubectl-assistant operations
pub type Result<T> = std::result::Result<T, AssistantError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_tool_execution() {
        let err = AssistantError::ToolExecution("tool failed".to_string());
        assert!(err.to_string().contains("tool failed"));
    }

    #[test]
    fn test_error_schema() {
        let err = AssistantError::Schema("unable to assert schema definitions".to_string());
        assert!(err.to_string().contains("Schema error"));
    }

    #[test]
    fn test_error_kubectl() {
        let err = AssistantError::Kubectl("connection refused".to_string());
        assert!(err.to_string().contains("kubectl error"));
    }

    #[test]
    fn test_error_manifest() {
        let err = AssistantError::Manifest("empty manifest".to_string());
        assert!(err.to_string().contains("Manifest error"));
    }

    #[test]
    fn test_error_config() {
        let err = AssistantError::Config("bad temperature".to_string());
        assert!(err.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_error_tool_call_limit() {
        let err = AssistantError::ToolCallLimit(10);
        assert!(err.to_string().contains("10"));
    }

    #[test]
    fn test_error_interrupted() {
        let err = AssistantError::Interrupted;
        assert_eq!(err.to_string(), "Interrupted");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AssistantError = io_err.into();
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: AssistantError = json_err.into();
        assert!(err.to_string().contains("JSON error"));
    }

    #[test]
    fn test_api_error_authentication_failed() {
        let err = ApiError::AuthenticationFailed;
        assert!(err.to_string().contains("Authentication failed"));
    }

    #[test]
    fn test_api_error_rate_limited() {
        let err = ApiError::RateLimited(30);
        assert!(err.to_string().contains("Rate limited"));
        assert!(err.to_string().contains("30"));
    }

    #[test]
    fn test_api_error_invalid_response() {
        let err = ApiError::InvalidResponse("expected choices to be 1 but received: 0".to_string());
        assert!(err.to_string().contains("expected choices to be 1"));
    }

    #[test]
    fn test_api_error_server_error() {
        let err = ApiError::ServerError {
            status: 500,
            message: "internal server error".to_string(),
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("internal server error"));
    }

    #[test]
    fn test_error_from_api_error() {
        let api_err = ApiError::AuthenticationFailed;
        let err: AssistantError = api_err.into();
        assert!(err.to_string().contains("API error"));
    }

    #[test]
    fn test_result_type_alias() {
        fn test_fn() -> Result<i32> {
            Ok(42)
        }

        assert_eq!(test_fn().unwrap(), 42);
    }
}
