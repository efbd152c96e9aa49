// ABOUTME: Unified error handling system with standard error codes for the onboarding core
// ABOUTME: Defines AppError, ErrorCode taxonomy, and convenience constructors used crate-wide
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Centralized error types for the onboarding core. Every fallible operation
//! in the crate returns [`AppResult`], and errors carry a stable [`ErrorCode`]
//! so embedding applications can branch on the class of failure (validation,
//! incomplete input, storage, configuration) without string matching.
//!
//! Validation and incomplete-input errors are always resolved locally by the
//! owning onboarding step; storage errors propagate to the terminal
//! submission handler and leave the aggregator in a retryable state.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Standard error codes used throughout the crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Input value failed format or range validation
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// A prerequisite field has not been collected yet
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField = 3001,
    /// Input value has an invalid format
    #[serde(rename = "INVALID_FORMAT")]
    InvalidFormat = 3002,
    /// Numeric value is outside its allowed bounds
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 3003,

    // Resource Management (4000-4999)
    /// Requested resource does not exist
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,
    /// Resource already exists and cannot be created again
    #[serde(rename = "RESOURCE_ALREADY_EXISTS")]
    ResourceAlreadyExists = 4001,

    // External Services (5000-5999)
    /// A consumed collaborator (rewards, connectors) failed
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,

    // Configuration (6000-6999)
    /// Configuration is invalid or inconsistent
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Profile persistence failed
    #[serde(rename = "STORAGE_ERROR")]
    StorageError = 9002,
}

impl ErrorCode {
    /// Get a human-readable description of the error code
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "Invalid input provided",
            Self::MissingRequiredField => "Required field is missing",
            Self::InvalidFormat => "Invalid format",
            Self::ValueOutOfRange => "Value out of range",
            Self::ResourceNotFound => "Resource not found",
            Self::ResourceAlreadyExists => "Resource already exists",
            Self::ExternalServiceError => "External service error",
            Self::ConfigError => "Configuration error",
            Self::InternalError => "Internal error",
            Self::StorageError => "Storage error",
        }
    }

    /// Whether the operation that produced this error can be retried as-is
    ///
    /// Validation failures need different input; storage and external
    /// failures are transient and retryable without changing the request.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::StorageError | Self::ExternalServiceError | Self::InternalError
        )
    }
}

/// Additional context for errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// User ID associated with the error (if applicable)
    pub user_id: Option<Uuid>,
    /// Onboarding step active when the error occurred
    pub step: Option<String>,
    /// Additional structured details
    pub details: serde_json::Value,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            user_id: None,
            step: None,
            details: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

/// Unified error type for the crate
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Add a user ID to the error context
    #[must_use]
    pub fn with_user_id(mut self, user_id: Uuid) -> Self {
        self.context.user_id = Some(user_id);
        self
    }

    /// Record the onboarding step active when the error occurred
    #[must_use]
    pub fn with_step(mut self, step: impl Into<String>) -> Self {
        self.context.step = Some(step.into());
        self
    }

    /// Add structured details to the error context
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.context.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Convenience functions for creating common errors
impl AppError {
    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// A prerequisite field has not been collected yet
    #[must_use]
    pub fn missing_required_field(field: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("Required field '{}' is missing", field.into()),
        )
    }

    /// Invalid format (e.g. username with disallowed characters)
    #[must_use]
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidFormat, message)
    }

    /// Numeric value outside its allowed bounds
    #[must_use]
    pub fn value_out_of_range(field: impl Into<String>, min: f64, max: f64) -> Self {
        Self::new(
            ErrorCode::ValueOutOfRange,
            format!("{} must be between {min} and {max}", field.into()),
        )
        .with_details(serde_json::json!({ "min": min, "max": max }))
    }

    /// Resource not found
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Resource already exists
    #[must_use]
    pub fn already_exists(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceAlreadyExists,
            format!("{} already exists", resource.into()),
        )
    }

    /// External service error
    #[must_use]
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Profile persistence error
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }
}

/// Conversion from `anyhow::Error` for boundaries that use anyhow internally
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        match error.source() {
            Some(source) => Self::new(ErrorCode::InternalError, error.to_string()).with_details(
                serde_json::json!({
                    "source": source.to_string()
                }),
            ),
            None => Self::new(ErrorCode::InternalError, error.to_string()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_retryability() {
        assert!(ErrorCode::StorageError.is_retryable());
        assert!(ErrorCode::ExternalServiceError.is_retryable());
        assert!(!ErrorCode::InvalidInput.is_retryable());
        assert!(!ErrorCode::MissingRequiredField.is_retryable());
    }

    #[test]
    fn test_app_error_creation() {
        let error = AppError::invalid_input("username too short")
            .with_step("username")
            .with_user_id(Uuid::new_v4());

        assert_eq!(error.code, ErrorCode::InvalidInput);
        assert_eq!(error.context.step.as_deref(), Some("username"));
        assert!(error.context.user_id.is_some());
    }

    #[test]
    fn test_value_out_of_range_details() {
        let error = AppError::value_out_of_range("weight_kg", 30.0, 300.0);
        let json = serde_json::to_string(&error.context.details).unwrap();

        assert_eq!(error.code, ErrorCode::ValueOutOfRange);
        assert!(json.contains("300"));
    }

    #[test]
    fn test_error_display_includes_description() {
        let error = AppError::missing_required_field("weight_kg");
        let rendered = error.to_string();

        assert!(rendered.contains("Required field is missing"));
        assert!(rendered.contains("weight_kg"));
    }
}
