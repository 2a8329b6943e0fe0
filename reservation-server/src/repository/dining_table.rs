//! Dining Table Repository

use shared::models::{DiningTable, DiningTableCreate};
use shared::util::snowflake_id;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{BaseRepository, RepoError, RepoResult, decode, encode};
use crate::store::{Collection, Filter, StoreGateway};

const COLLECTION: Collection = Collection::Tables;

/// Clones share one create lock, so number uniqueness holds across them
#[derive(Clone)]
pub struct DiningTableRepository {
    base: BaseRepository,
    create_lock: Arc<Mutex<()>>,
}

impl DiningTableRepository {
    pub fn new(store: Arc<dyn StoreGateway>) -> Self {
        Self {
            base: BaseRepository::new(store),
            create_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Find all dining tables, ordered by table number
    pub async fn find_all(&self) -> RepoResult<Vec<DiningTable>> {
        let documents = self.base.store().scan(COLLECTION, &Filter::All).await?;
        let mut tables = documents
            .into_iter()
            .map(|d| decode::<DiningTable>(COLLECTION, d))
            .collect::<RepoResult<Vec<_>>>()?;
        tables.sort_by_key(|t| t.number);
        Ok(tables)
    }

    /// Find table by id
    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<DiningTable>> {
        match self.base.store().get(COLLECTION, &id.to_string()).await? {
            Some(document) => Ok(Some(decode(COLLECTION, document)?)),
            None => Ok(None),
        }
    }

    /// Find tables carrying a table number
    ///
    /// Full scan with an equality filter on `number`.
    pub async fn find_by_number(&self, number: i64) -> RepoResult<Vec<DiningTable>> {
        let documents = self
            .base
            .store()
            .scan(COLLECTION, &Filter::eq("number", number))
            .await?;
        documents
            .into_iter()
            .map(|d| decode(COLLECTION, d))
            .collect()
    }

    /// Create a new dining table
    pub async fn create(&self, data: DiningTableCreate) -> RepoResult<DiningTable> {
        let _guard = self.create_lock.lock().await;

        // Check duplicate number
        if !self.find_by_number(data.number).await?.is_empty() {
            return Err(RepoError::DuplicateNumber(data.number));
        }

        let id = match data.id {
            Some(id) => {
                if self.find_by_id(id).await?.is_some() {
                    return Err(RepoError::Duplicate(format!("Table {}", id)));
                }
                id
            }
            None => snowflake_id(),
        };

        let table = DiningTable {
            id,
            number: data.number,
            places: data.places,
        };

        self.base
            .store()
            .put(COLLECTION, encode(COLLECTION, &table)?)
            .await?;
        Ok(table)
    }
}
