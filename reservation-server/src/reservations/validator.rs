//! Table Validator
//!
//! Confirms that a referenced table number exists.

use serde_json::Value;
use shared::AppResult;
use shared::models::DiningTable;

use crate::repository::DiningTableRepository;

/// Outcome of a table lookup
///
/// Store failures are not an outcome: they propagate as
/// `StoreUnavailable` errors so callers can tell them apart from a
/// missing table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableLookup {
    Found(DiningTable),
    NotFound,
}

/// Coerce an externally supplied table number to an integer
///
/// Leading-integer semantics: surrounding whitespace is ignored, an optional
/// sign is accepted, then the longest run of ASCII digits is taken, so
/// `"12abc"` is 12. Fractional numbers truncate toward zero. Anything without
/// leading digits (including `null`, booleans, `"abc"`) yields `None`.
pub fn coerce_table_number(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i)
            } else {
                let f = n.as_f64()?;
                if f.is_finite() && f.abs() < i64::MAX as f64 {
                    Some(f.trunc() as i64)
                } else {
                    None
                }
            }
        }
        Value::String(s) => parse_leading_int(s),
        _ => None,
    }
}

fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Looks up tables by number
#[derive(Clone)]
pub struct TableValidator {
    tables: DiningTableRepository,
}

impl TableValidator {
    pub fn new(tables: DiningTableRepository) -> Self {
        Self { tables }
    }

    /// Whether at least one table carries `table_number`
    pub async fn lookup(&self, table_number: i64) -> AppResult<TableLookup> {
        let mut matches = self.tables.find_by_number(table_number).await?;
        if matches.is_empty() {
            tracing::debug!(table_number, "Table not found");
            return Ok(TableLookup::NotFound);
        }
        Ok(TableLookup::Found(matches.swap_remove(0)))
    }
}
