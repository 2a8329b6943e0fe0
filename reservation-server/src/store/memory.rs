//! In-memory store backed by `DashMap`

use async_trait::async_trait;
use dashmap::DashMap;

use super::{Collection, Document, Filter, StoreGateway, StoreResult, document_key};

/// In-memory document store
///
/// One concurrent map per collection. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: DashMap<String, Document>,
    reservations: DashMap<String, Document>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn collection(&self, collection: Collection) -> &DashMap<String, Document> {
        match collection {
            Collection::Tables => &self.tables,
            Collection::Reservations => &self.reservations,
        }
    }

    /// Number of documents in a collection
    pub fn len(&self, collection: Collection) -> usize {
        self.collection(collection).len()
    }
}

#[async_trait]
impl StoreGateway for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn scan(&self, collection: Collection, filter: &Filter) -> StoreResult<Vec<Document>> {
        Ok(self
            .collection(collection)
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn get(&self, collection: Collection, key: &str) -> StoreResult<Option<Document>> {
        Ok(self
            .collection(collection)
            .get(key)
            .map(|entry| entry.value().clone()))
    }

    async fn put(&self, collection: Collection, document: Document) -> StoreResult<()> {
        let key = document_key(collection, &document)?;
        self.collection(collection).insert(key, document);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_put_get_scan() {
        let store = MemoryStore::new();
        store
            .put(Collection::Tables, doc(json!({"id": 1, "number": 5, "places": 4})))
            .await
            .unwrap();
        store
            .put(Collection::Tables, doc(json!({"id": 2, "number": 6, "places": 2})))
            .await
            .unwrap();

        let found = store.get(Collection::Tables, "1").await.unwrap().unwrap();
        assert_eq!(found["number"], 5);
        assert!(store.get(Collection::Tables, "3").await.unwrap().is_none());

        let matches = store
            .scan(Collection::Tables, &Filter::eq("number", 6))
            .await
            .unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0]["id"], 2);

        let all = store.scan(Collection::Tables, &Filter::All).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = MemoryStore::new();
        store
            .put(Collection::Reservations, doc(json!({"id": "r-1", "tableNumber": 5})))
            .await
            .unwrap();
        assert_eq!(store.len(Collection::Reservations), 1);
        assert_eq!(store.len(Collection::Tables), 0);
        assert!(store.get(Collection::Tables, "r-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_replaces_same_key() {
        let store = MemoryStore::new();
        store
            .put(Collection::Tables, doc(json!({"id": "7", "number": 1, "places": 4})))
            .await
            .unwrap();
        store
            .put(Collection::Tables, doc(json!({"id": 7, "number": 1, "places": 8})))
            .await
            .unwrap();
        assert_eq!(store.len(Collection::Tables), 1);
        let found = store.get(Collection::Tables, "7").await.unwrap().unwrap();
        assert_eq!(found["places"], 8);
    }

    #[tokio::test]
    async fn test_put_without_id_fails() {
        let store = MemoryStore::new();
        let result = store
            .put(Collection::Tables, doc(json!({"number": 1})))
            .await;
        assert!(result.is_err());
        assert_eq!(store.len(Collection::Tables), 0);
    }
}
