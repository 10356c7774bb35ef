//! Recipe persistence gateway.
//!
//! Every storage operation in the service goes through [`RecipeRepository`]. It
//! parses external identifiers, assigns ids and timestamps, and bounds each
//! store call by the caller's timeout.

use crate::models::{RecipeChanges, RecipeDocument};
use crate::store::{RecipeStore, StoreError};
use crate::types::{Recipe, RecipeContent};
use bson::oid::ObjectId;
use chrono::{SubsecRound, Utc};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecipeError {
    /// The id does not parse as an ObjectId. The store was not contacted.
    #[error("invalid id: {0}")]
    InvalidIdentifier(String),

    /// The store operation failed or did not finish before the deadline.
    #[error("failed to {operation}: {reason}")]
    Storage {
        operation: &'static str,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct RecipeRepository {
    store: Arc<dyn RecipeStore>,
}

impl RecipeRepository {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self { store }
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Insert a new recipe with a fresh id. `created_at` and `updated_at` are
    /// the same instant.
    pub async fn create(
        &self,
        content: RecipeContent,
        timeout: Duration,
    ) -> Result<Recipe, RecipeError> {
        let document = RecipeDocument::new(ObjectId::new(), content, now());

        within(timeout, "insert recipe", self.store.insert(&document)).await?;

        tracing::debug!(id = %document.id, "recipe created");
        Ok(document.into())
    }

    /// `Ok(None)` when the id is well formed but no recipe has it.
    pub async fn get_by_id(
        &self,
        id: &str,
        timeout: Duration,
    ) -> Result<Option<Recipe>, RecipeError> {
        let id = parse_id(id)?;
        let document = within(timeout, "get recipe by id", self.store.find_by_id(id)).await?;
        Ok(document.map(Recipe::from))
    }

    pub async fn get_all(&self, timeout: Duration) -> Result<Vec<Recipe>, RecipeError> {
        let documents = within(timeout, "find recipes", self.store.find_all()).await?;
        Ok(documents.into_iter().map(Recipe::from).collect())
    }

    /// Replace name, ingredients and instructions, and bump `updated_at`.
    /// An id that matches nothing is not an error.
    pub async fn update(
        &self,
        id: &str,
        content: RecipeContent,
        timeout: Duration,
    ) -> Result<(), RecipeError> {
        let id = parse_id(id)?;
        let changes = RecipeChanges {
            content,
            updated_at: now(),
        };

        let matched = within(
            timeout,
            "update recipe",
            self.store.update_content(id, &changes),
        )
        .await?;
        if matched == 0 {
            tracing::debug!(%id, "update matched no recipe");
        }
        Ok(())
    }

    /// Removing an absent recipe succeeds just like removing a present one.
    pub async fn delete(&self, id: &str, timeout: Duration) -> Result<(), RecipeError> {
        let id = parse_id(id)?;
        let deleted = within(timeout, "delete recipe", self.store.delete_by_id(id)).await?;
        if deleted == 0 {
            tracing::debug!(%id, "delete matched no recipe");
        }
        Ok(())
    }
}

fn parse_id(id: &str) -> Result<ObjectId, RecipeError> {
    ObjectId::parse_str(id).map_err(|e| RecipeError::InvalidIdentifier(e.to_string()))
}

/// Current time at the store's millisecond precision, so the entity returned by
/// `create` is identical to what a later read returns.
fn now() -> bson::DateTime {
    bson::DateTime::from_chrono(Utc::now().trunc_subsecs(3))
}

/// Run a store call under a deadline. Expiry drops the in-flight call.
async fn within<T>(
    timeout: Duration,
    operation: &'static str,
    call: impl Future<Output = Result<T, StoreError>>,
) -> Result<T, RecipeError> {
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(RecipeError::Storage {
            operation,
            reason: e.to_string(),
        }),
        Err(_) => Err(RecipeError::Storage {
            operation,
            reason: format!("deadline of {}ms exceeded", timeout.as_millis()),
        }),
    }
}
