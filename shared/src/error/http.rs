//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::TableNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists | Self::TableNumberExists | Self::ReservationOverlap => {
                StatusCode::CONFLICT
            }

            // 403 Forbidden
            Self::PermissionDenied => StatusCode::FORBIDDEN,

            // 503 Service Unavailable (transient errors, client can retry)
            Self::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,

            // 400 Bad Request
            Self::ValidationFailed | Self::InvalidFormat => StatusCode::BAD_REQUEST,
        }
    }
}
