//! Repository Module
//!
//! Typed access to the two store collections. Repositories translate
//! between JSON documents and the shared models; they never assume an
//! index beyond equality filters.

pub mod dining_table;
pub mod reservation;

// Re-exports
pub use dining_table::DiningTableRepository;
pub use reservation::ReservationRepository;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::AppError;
use std::sync::Arc;
use thiserror::Error;

use crate::store::{Collection, Document, StoreError, StoreGateway};

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Table number {0} already exists")]
    DuplicateNumber(i64),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Malformed document in '{collection}': {message}")]
    Malformed {
        collection: &'static str,
        message: String,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::DuplicateNumber(number) => AppError::with_message(
                shared::ErrorCode::TableNumberExists,
                format!("Table number {} already exists", number),
            )
            .with_detail("number", number),
            RepoError::Duplicate(what) => AppError::already_exists(what),
            RepoError::Malformed { .. } => AppError::invalid_format(err.to_string()),
            RepoError::Store(e) => e.into(),
        }
    }
}

/// Shared plumbing for repositories
#[derive(Clone)]
pub struct BaseRepository {
    store: Arc<dyn StoreGateway>,
}

impl BaseRepository {
    pub fn new(store: Arc<dyn StoreGateway>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn StoreGateway> {
        &self.store
    }
}

/// Decode a stored document into a model
pub(crate) fn decode<T: DeserializeOwned>(
    collection: Collection,
    document: Document,
) -> RepoResult<T> {
    serde_json::from_value(Value::Object(document)).map_err(|e| RepoError::Malformed {
        collection: collection.name(),
        message: e.to_string(),
    })
}

/// Encode a model into a storable document
pub(crate) fn encode<T: Serialize>(collection: Collection, value: &T) -> RepoResult<Document> {
    match serde_json::to_value(value) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(_) => Err(RepoError::Malformed {
            collection: collection.name(),
            message: "model did not serialize to an object".to_string(),
        }),
        Err(e) => Err(RepoError::Malformed {
            collection: collection.name(),
            message: e.to_string(),
        }),
    }
}
