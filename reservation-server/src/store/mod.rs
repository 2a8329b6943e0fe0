//! Store Gateway
//!
//! Generic document store with two collections (`tables`, `reservations`).
//! Documents are JSON objects keyed by their `id` attribute. Only equality
//! filters are supported; callers never assume an index.
//!
//! # Backends
//!
//! | Backend | Type | Use |
//! |---------|------|-----|
//! | `memory` | [`MemoryStore`] | tests, ephemeral demos |
//! | `redb` | [`RedbStore`] | embedded persistent storage |

mod error;
mod memory;
mod redb_store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use redb_store::RedbStore;

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt;

/// A stored JSON object
pub type Document = Map<String, Value>;

/// The collections known to the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Tables,
    Reservations,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::Tables, Collection::Reservations];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Tables => "tables",
            Collection::Reservations => "reservations",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scan filter
///
/// Attribute names are plain strings, so names that collide with reserved
/// words of some query language need no escaping here.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Every document in the collection
    All,
    /// Documents whose `attribute` equals `value`
    Eq { attribute: String, value: Value },
}

impl Filter {
    pub fn eq(attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq { attribute, value } => document.get(attribute) == Some(value),
        }
    }
}

/// Extract the canonical key of a document (`id` as a string)
///
/// Numeric ids and their string form map to the same key.
pub fn document_key(collection: Collection, document: &Document) -> StoreResult<String> {
    match document.get("id") {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(StoreError::MissingKey(collection.name())),
    }
}

/// Remote-store contract used by the reservation logic
///
/// Every call may suspend; none is retried.
#[async_trait]
pub trait StoreGateway: Send + Sync + 'static {
    /// Backend name for diagnostics
    fn backend(&self) -> &'static str;

    /// Return every document of `collection` matching `filter`
    async fn scan(&self, collection: Collection, filter: &Filter) -> StoreResult<Vec<Document>>;

    /// Fetch a single document by key
    async fn get(&self, collection: Collection, key: &str) -> StoreResult<Option<Document>>;

    /// Write a document, replacing any document with the same key
    async fn put(&self, collection: Collection, document: Document) -> StoreResult<()>;
}
