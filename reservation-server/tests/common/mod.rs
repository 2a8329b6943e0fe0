//! 集成测试共用工具

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use reservation_server::store::{Collection, Document, Filter, StoreError, StoreResult};
use reservation_server::{Config, MemoryStore, PolicyKind, ServerState, StoreBackend, StoreGateway};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::ServiceExt;

pub fn test_config(policy: PolicyKind) -> Config {
    let mut config = Config::with_overrides("./target/test-data", 0, StoreBackend::Memory);
    config.reservation_policy = policy;
    config
}

pub fn app_with_store(store: Arc<dyn StoreGateway>, policy: PolicyKind) -> Router {
    let state = ServerState::new(test_config(policy), store);
    reservation_server::api::build_router(state)
}

pub fn memory_app() -> (Arc<MemoryStore>, Router) {
    let store = Arc::new(MemoryStore::new());
    let app = app_with_store(store.clone(), PolicyKind::Open);
    (store, app)
}

pub fn reservation_body(table: Value, date: &str, start: &str, end: &str) -> Value {
    json!({
        "tableNumber": table,
        "clientName": "Ana",
        "phoneNumber": "600000000",
        "date": date,
        "slotTimeStart": start,
        "slotTimeEnd": end
    })
}

/// Send one request through the router and decode the JSON body
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

pub async fn create_table(app: &Router, id: i64, number: i64) {
    let (status, _) = send(
        app,
        Method::POST,
        "/tables",
        Some(json!({"id": id, "number": number, "places": 4})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

/// Store that fails every call
#[derive(Debug, Default)]
pub struct FailingStore;

#[async_trait]
impl StoreGateway for FailingStore {
    fn backend(&self) -> &'static str {
        "failing"
    }

    async fn scan(&self, _collection: Collection, _filter: &Filter) -> StoreResult<Vec<Document>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn get(&self, _collection: Collection, _key: &str) -> StoreResult<Option<Document>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn put(&self, _collection: Collection, _document: Document) -> StoreResult<()> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

/// Wraps a store and counts calls per collection
#[derive(Debug, Default)]
pub struct CountingStore {
    pub inner: MemoryStore,
    pub table_scans: AtomicUsize,
    pub reservation_scans: AtomicUsize,
    pub reservation_puts: AtomicUsize,
}

impl CountingStore {
    pub fn reservation_scans(&self) -> usize {
        self.reservation_scans.load(Ordering::SeqCst)
    }

    pub fn table_scans(&self) -> usize {
        self.table_scans.load(Ordering::SeqCst)
    }

    pub fn reservation_puts(&self) -> usize {
        self.reservation_puts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StoreGateway for CountingStore {
    fn backend(&self) -> &'static str {
        "counting"
    }

    async fn scan(&self, collection: Collection, filter: &Filter) -> StoreResult<Vec<Document>> {
        match collection {
            Collection::Tables => self.table_scans.fetch_add(1, Ordering::SeqCst),
            Collection::Reservations => self.reservation_scans.fetch_add(1, Ordering::SeqCst),
        };
        self.inner.scan(collection, filter).await
    }

    async fn get(&self, collection: Collection, key: &str) -> StoreResult<Option<Document>> {
        self.inner.get(collection, key).await
    }

    async fn put(&self, collection: Collection, document: Document) -> StoreResult<()> {
        if collection == Collection::Reservations {
            self.reservation_puts.fetch_add(1, Ordering::SeqCst);
        }
        self.inner.put(collection, document).await
    }
}
