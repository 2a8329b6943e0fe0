//! redb-based document store
//!
//! # Tables
//!
//! | Table | Key | Value |
//! |-------|-----|-------|
//! | `tables` | table id (canonical string) | JSON-serialized document |
//! | `reservations` | reservation id (UUID) | JSON-serialized document |
//! | `tables_by_number` | `(number, id)` | `()` |
//! | `reservations_by_table` | `(tableNumber, id)` | `()` |
//!
//! The two `*_by_*` tables index the integer attribute each collection is
//! looked up by. An equality scan on that attribute reads the index range
//! instead of the whole collection; any other filter is a full iteration.
//! Index entries are written in the same transaction as the document.
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate`: a document is persistent as
//! soon as `put` returns.

use async_trait::async_trait;
use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use std::path::Path;
use std::sync::Arc;

use super::{Collection, Document, Filter, StoreGateway, StoreResult, document_key};

/// Table for dining tables: key = table id, value = JSON document
const TABLES_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("tables");

/// Table for reservations: key = reservation id, value = JSON document
const RESERVATIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("reservations");

/// Index: (table number, table id) -> ()
const TABLES_BY_NUMBER: TableDefinition<(i64, &str), ()> = TableDefinition::new("tables_by_number");

/// Index: (table number, reservation id) -> ()
const RESERVATIONS_BY_TABLE: TableDefinition<(i64, &str), ()> =
    TableDefinition::new("reservations_by_table");

type IndexDefinition = TableDefinition<'static, (i64, &'static str), ()>;

fn definition(collection: Collection) -> TableDefinition<'static, &'static str, &'static [u8]> {
    match collection {
        Collection::Tables => TABLES_TABLE,
        Collection::Reservations => RESERVATIONS_TABLE,
    }
}

/// Indexed attribute of a collection and its index table
fn index(collection: Collection) -> (&'static str, IndexDefinition) {
    match collection {
        Collection::Tables => ("number", TABLES_BY_NUMBER),
        Collection::Reservations => ("tableNumber", RESERVATIONS_BY_TABLE),
    }
}

fn indexed_value(collection: Collection, document: &Document) -> Option<i64> {
    let (attribute, _) = index(collection);
    document.get(attribute).and_then(|v| v.as_i64())
}

/// Document store backed by redb
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StoreResult<Self> {
        // Create all tables if they don't exist
        let write_txn = db.begin_write()?;
        {
            for collection in Collection::ALL {
                let table = write_txn.open_table(definition(collection))?;
                let (_, index_def) = index(collection);
                let mut index_table = write_txn.open_table(index_def)?;

                // Files written before the index existed
                if index_table.is_empty()? && !table.is_empty()? {
                    let mut rebuilt = 0u64;
                    for result in table.iter()? {
                        let (key, value) = result?;
                        let document: Document = serde_json::from_slice(value.value())?;
                        if let Some(n) = indexed_value(collection, &document) {
                            index_table.insert((n, key.value()), ())?;
                            rebuilt += 1;
                        }
                    }
                    tracing::info!(%collection, rebuilt, "Rebuilt store index");
                }
            }
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    fn scan_indexed(
        &self,
        collection: Collection,
        number: i64,
        filter: &Filter,
    ) -> StoreResult<Vec<Document>> {
        let read_txn = self.db.begin_read()?;
        let (_, index_def) = index(collection);
        let index_table = read_txn.open_table(index_def)?;
        let table = read_txn.open_table(definition(collection))?;

        let mut documents = Vec::new();
        for result in index_table.range((number, "")..)? {
            let (key, _) = result?;
            let (n, id) = key.value();
            if n != number {
                break;
            }
            if let Some(value) = table.get(id)? {
                let document: Document = serde_json::from_slice(value.value())?;
                if filter.matches(&document) {
                    documents.push(document);
                }
            }
        }

        Ok(documents)
    }

    /// Number of documents in a collection
    pub fn count(&self, collection: Collection) -> StoreResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(definition(collection))?;
        Ok(table.len()?)
    }
}

#[async_trait]
impl StoreGateway for RedbStore {
    fn backend(&self) -> &'static str {
        "redb"
    }

    async fn scan(&self, collection: Collection, filter: &Filter) -> StoreResult<Vec<Document>> {
        if let Filter::Eq { attribute, value } = filter
            && attribute == index(collection).0
            && let Some(number) = value.as_i64()
        {
            return self.scan_indexed(collection, number, filter);
        }

        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(definition(collection))?;

        let mut documents = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let document: Document = serde_json::from_slice(value.value())?;
            if filter.matches(&document) {
                documents.push(document);
            }
        }

        Ok(documents)
    }

    async fn get(&self, collection: Collection, key: &str) -> StoreResult<Option<Document>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(definition(collection))?;

        match table.get(key)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    async fn put(&self, collection: Collection, document: Document) -> StoreResult<()> {
        let key = document_key(collection, &document)?;
        let value = serde_json::to_vec(&document)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(definition(collection))?;
            let (_, index_def) = index(collection);
            let mut index_table = write_txn.open_table(index_def)?;

            let previous = match table.get(key.as_str())? {
                Some(old) => serde_json::from_slice::<Document>(old.value())
                    .ok()
                    .and_then(|d| indexed_value(collection, &d)),
                None => None,
            };
            if let Some(old) = previous {
                index_table.remove((old, key.as_str()))?;
            }

            table.insert(key.as_str(), value.as_slice())?;
            if let Some(n) = indexed_value(collection, &document) {
                index_table.insert((n, key.as_str()), ())?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }
}
