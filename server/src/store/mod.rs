//! Document store abstraction for recipe persistence.
//!
//! The store exposes the raw primitives (insert, find, update, delete) keyed by
//! ObjectId. Identifier parsing, timestamping and deadlines live one level up in
//! [`crate::repository::RecipeRepository`].

mod memory;
mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use crate::models::{RecipeChanges, RecipeDocument};
use async_trait::async_trait;
use bson::oid::ObjectId;
use std::fmt;
use thiserror::Error;

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Trait for recipe document stores.
///
/// Implementations must be thread-safe; a single instance is shared by every
/// request handler.
#[async_trait]
pub trait RecipeStore: Send + Sync + fmt::Debug {
    /// Insert a fully populated document.
    async fn insert(&self, document: &RecipeDocument) -> Result<(), StoreError>;

    /// Look up a single document. `Ok(None)` when nothing matches.
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<RecipeDocument>, StoreError>;

    /// Every document in the collection, in store order.
    async fn find_all(&self) -> Result<Vec<RecipeDocument>, StoreError>;

    /// Overwrite the editable fields and `updated_at`. Returns the matched count.
    async fn update_content(&self, id: ObjectId, changes: &RecipeChanges)
        -> Result<u64, StoreError>;

    /// Remove a document. Returns the deleted count.
    async fn delete_by_id(&self, id: ObjectId) -> Result<u64, StoreError>;

    /// Backend name for logging ("mongo", "memory").
    fn backend_name(&self) -> &'static str;
}
