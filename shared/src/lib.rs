//! Shared types for the reservation service
//!
//! Models, error codes and the unified response structure used by the
//! server and by anything that talks to it.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
