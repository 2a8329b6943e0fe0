//! Dining Table Model

use serde::{Deserialize, Serialize};

use super::serde_helpers::{int_or_string, opt_int_or_string};

/// Dining table entity (桌台)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiningTable {
    #[serde(deserialize_with = "int_or_string")]
    pub id: i64,
    /// Table number shown to guests, unique across tables
    #[serde(deserialize_with = "int_or_string")]
    pub number: i64,
    /// Seating capacity
    pub places: i32,
}

/// Create dining table payload
///
/// `id` may be omitted, in which case the server assigns one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableCreate {
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "int_or_string")]
    pub number: i64,
    pub places: i32,
}

/// Response body of a successful table creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCreated {
    pub id: i64,
}

/// Response body of the table listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableList {
    pub tables: Vec<DiningTable>,
}
