//! 工具模块 - 通用工具函数和类型
//!
//! - [`AppError`] / [`AppResult`] - 应用错误类型 (from shared::error)
//! - [`logger`] - tracing 初始化
//! - [`time`] - 预订时段解析

pub mod logger;
pub mod time;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
