//! Unified error codes for the reservation service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 2xxx: Permission errors
//! - 7xxx: Table and reservation errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so clients can match on
/// them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid format (unparseable date, time or number)
    InvalidFormat = 6,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,

    // ==================== 7xxx: Table ====================
    /// Table not found
    TableNotFound = 7001,
    /// Table number already used by another table
    TableNumberExists = 7002,
    /// Requested slot overlaps an existing reservation
    ReservationOverlap = 7004,

    // ==================== 9xxx: System ====================
    /// Backing store unreachable or failed
    StoreUnavailable = 9006,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidFormat => "Invalid format",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",

            // Table
            ErrorCode::TableNotFound => "Table does not exist",
            ErrorCode::TableNumberExists => "Table number already exists",
            ErrorCode::ReservationOverlap => "Reservation overlaps an existing reservation",

            // System
            ErrorCode::StoreUnavailable => "Store unavailable",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            4 => Ok(ErrorCode::AlreadyExists),
            6 => Ok(ErrorCode::InvalidFormat),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),

            // Table
            7001 => Ok(ErrorCode::TableNotFound),
            7002 => Ok(ErrorCode::TableNumberExists),
            7004 => Ok(ErrorCode::ReservationOverlap),

            // System
            9006 => Ok(ErrorCode::StoreUnavailable),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
