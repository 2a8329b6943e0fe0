//! Error types and API response structures

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the primary error type of the service, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details for debugging
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create an already exists error
    pub fn already_exists(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::AlreadyExists, format!("{} already exists", r))
            .with_detail("resource", r)
    }

    /// Create a malformed input error (unparseable date, time or number)
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidFormat, msg)
    }

    /// Create a permission denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    /// Create a store unavailable error carrying the store's own detail
    pub fn store_unavailable(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::StoreUnavailable, msg)
    }

    /// Create a table not found error
    pub fn table_not_found(table: impl Into<Value>) -> Self {
        Self::new(ErrorCode::TableNotFound).with_detail("table_number", table)
    }

    /// Create a reservation overlap error
    pub fn reservation_overlap(table_number: i64, existing_id: impl Into<String>) -> Self {
        Self::new(ErrorCode::ReservationOverlap)
            .with_detail("table_number", table_number)
            .with_detail("conflicting_reservation", existing_id.into())
    }
}

/// Unified API response structure
///
/// Provides a consistent response format for error bodies and wrapped
/// payloads:
/// - `code`: Error code (0 for success)
/// - `message`: Human-readable message
/// - `data`: Response payload (on success)
/// - `details`: Additional error details (on failure)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Error code (0 for success, non-zero for errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Human-readable message
    pub message: String,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Additional error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    /// Create a success response with data
    pub fn success(data: T) -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: Some(data),
            details: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }

    /// Create a response carrying only a message (no code)
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            data: None,
            details: None,
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ApiResponse::<()>::error(&self);

        // Log system errors
        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::TableNotFound);
        assert_eq!(err.code, ErrorCode::TableNotFound);
        assert_eq!(err.message, "Table does not exist");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::validation("Missing field").with_detail("field", "clientName");
        let details = err.details.unwrap();
        assert_eq!(details.get("field"), Some(&Value::from("clientName")));
    }

    #[test]
    fn test_reservation_overlap_details() {
        let err = AppError::reservation_overlap(5, "abc");
        assert_eq!(err.code, ErrorCode::ReservationOverlap);
        let details = err.details.unwrap();
        assert_eq!(details.get("table_number"), Some(&Value::from(5)));
        assert_eq!(
            details.get("conflicting_reservation"),
            Some(&Value::from("abc"))
        );
    }

    #[test]
    fn test_api_response_error_serialization() {
        let err = AppError::table_not_found(99);
        let body = ApiResponse::<()>::error(&err);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], 7001);
        assert_eq!(json["message"], "Table does not exist");
        assert_eq!(json["details"]["table_number"], 99);
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_message_only_skips_code() {
        let body = ApiResponse::message_only("Resource not found");
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("code").is_none());
        assert_eq!(json["message"], "Resource not found");
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::store_unavailable("connection reset").into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = AppError::reservation_overlap(1, "x").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
