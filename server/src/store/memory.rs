//! In-process recipe store.
//!
//! Used for local runs without MongoDB (`STORE_BACKEND=memory`) and by the test
//! suite. Documents are kept in insertion order. Failures and latency can be
//! injected to exercise the error paths of the layers above.

use super::{RecipeStore, StoreError};
use crate::models::{RecipeChanges, RecipeDocument};
use async_trait::async_trait;
use bson::oid::ObjectId;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<Vec<RecipeDocument>>,
    /// Number of primitives invoked, successful or not
    calls: AtomicUsize,
    /// When set, every primitive fails with this message
    failure: RwLock<Option<String>>,
    /// Delay applied before every primitive
    latency: RwLock<Option<Duration>>,
}

#[allow(dead_code)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `StoreError::Unavailable(message)`.
    pub fn fail_with(&self, message: &str) {
        if let Ok(mut failure) = self.failure.write() {
            *failure = Some(message.to_string());
        }
    }

    /// Delay every subsequent call by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        if let Ok(mut slot) = self.latency.write() {
            *slot = Some(latency);
        }
    }

    /// Number of store primitives invoked so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.documents.read().map(|docs| docs.len()).unwrap_or(0)
    }

    /// Count the call, wait out any injected latency, then surface any
    /// injected failure.
    async fn enter(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        let latency = *self.latency.read().map_err(|_| poisoned())?;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        match self.failure.read().map_err(|_| poisoned())?.as_ref() {
            Some(message) => Err(StoreError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<RecipeDocument>>, StoreError> {
        self.documents.read().map_err(|_| poisoned())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<RecipeDocument>>, StoreError> {
        self.documents.write().map_err(|_| poisoned())
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("memory store lock poisoned".to_string())
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn insert(&self, document: &RecipeDocument) -> Result<(), StoreError> {
        self.enter().await?;
        let mut documents = self.write()?;
        if documents.iter().any(|doc| doc.id == document.id) {
            return Err(StoreError::Unavailable(format!(
                "duplicate key: {}",
                document.id.to_hex()
            )));
        }
        documents.push(document.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<RecipeDocument>, StoreError> {
        self.enter().await?;
        Ok(self.read()?.iter().find(|doc| doc.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<RecipeDocument>, StoreError> {
        self.enter().await?;
        Ok(self.read()?.clone())
    }

    async fn update_content(
        &self,
        id: ObjectId,
        changes: &RecipeChanges,
    ) -> Result<u64, StoreError> {
        self.enter().await?;
        let mut documents = self.write()?;
        match documents.iter_mut().find(|doc| doc.id == id) {
            Some(doc) => {
                doc.name = changes.content.name.clone();
                doc.ingredients = changes.content.ingredients.clone();
                doc.instructions = changes.content.instructions.clone();
                doc.updated_at = changes.updated_at;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<u64, StoreError> {
        self.enter().await?;
        let mut documents = self.write()?;
        let before = documents.len();
        documents.retain(|doc| doc.id != id);
        Ok((before - documents.len()) as u64)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
