//! 时间工具函数 - 预订时段解析
//!
//! Slots are timezone-naive: a date and a time of day are combined into a
//! `NaiveDateTime` and compared as-is.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use shared::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::invalid_format(format!("Invalid date format: {}", date)))
}

/// 解析时间字符串 (HH:MM:SS 或 HH:MM)
pub fn parse_time(time: &str) -> AppResult<NaiveTime> {
    let trimmed = time.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|_| AppError::invalid_format(format!("Invalid time format: {}", time)))
}

/// 日期 + 时间 → 本地时刻 (naive)
pub fn slot_instant(date: &str, time: &str) -> AppResult<NaiveDateTime> {
    Ok(parse_date(date)?.and_time(parse_time(time)?))
}
