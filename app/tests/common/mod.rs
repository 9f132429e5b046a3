//! Shared fakes for the catalog-app integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use catalog_app::{
    CatalogController, FetchedProducts, KeyValueStore, MemoryStore, ProductSource, SourceError,
    StorageError,
};
use catalog_engine::ProductRecord;

/// Always returns the same product list.
pub struct StaticSource {
    records: Vec<ProductRecord>,
    calls: AtomicUsize,
}

impl StaticSource {
    pub fn new(records: Vec<ProductRecord>) -> Self {
        Self {
            records,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductSource for StaticSource {
    async fn fetch_products(&self) -> Result<FetchedProducts, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        FetchedProducts::from_records(self.records.clone())
    }
}

/// Behaves like a device with no network.
pub struct OfflineSource;

#[async_trait]
impl ProductSource for OfflineSource {
    async fn fetch_products(&self) -> Result<FetchedProducts, SourceError> {
        Err(SourceError::Unavailable("network unreachable".into()))
    }
}

/// Never answers.
pub struct HangingSource;

#[async_trait]
impl ProductSource for HangingSource {
    async fn fetch_products(&self) -> Result<FetchedProducts, SourceError> {
        std::future::pending().await
    }
}

/// Reads work, every write fails.
#[derive(Default)]
pub struct ReadOnlyStore {
    inner: MemoryStore,
}

impl ReadOnlyStore {
    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            inner: MemoryStore::with_values(values),
        }
    }
}

#[async_trait]
impl KeyValueStore for ReadOnlyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io {
            key: key.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }
}

pub fn shirt_and_hat() -> Vec<ProductRecord> {
    vec![
        ProductRecord::new(1, "Shirt", 20.0, "A"),
        ProductRecord::new(2, "Hat", 10.0, "B"),
    ]
}

pub fn controller(
    storage: Arc<dyn KeyValueStore>,
    source: Arc<dyn ProductSource>,
    page_size: usize,
) -> Arc<CatalogController> {
    Arc::new(CatalogController::new(storage, source, page_size).unwrap())
}
