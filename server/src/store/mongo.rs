use super::{RecipeStore, StoreError};
use crate::models::{RecipeChanges, RecipeDocument};
use async_trait::async_trait;
use bson::doc;
use bson::oid::ObjectId;
use futures::TryStreamExt;
use mongodb::{Collection, Database};

/// MongoDB-backed recipe store.
#[derive(Debug, Clone)]
pub struct MongoStore {
    collection: Collection<RecipeDocument>,
}

impl MongoStore {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection(collection_name),
        }
    }
}

#[async_trait]
impl RecipeStore for MongoStore {
    async fn insert(&self, document: &RecipeDocument) -> Result<(), StoreError> {
        self.collection.insert_one(document).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<RecipeDocument>, StoreError> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn find_all(&self) -> Result<Vec<RecipeDocument>, StoreError> {
        let cursor = self.collection.find(doc! {}).await?;
        let documents: Vec<RecipeDocument> = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn update_content(
        &self,
        id: ObjectId,
        changes: &RecipeChanges,
    ) -> Result<u64, StoreError> {
        let update = doc! {
            "$set": {
                "name": changes.content.name.as_str(),
                "ingredients": changes.content.ingredients.clone(),
                "instructions": changes.content.instructions.as_str(),
                "updated_at": changes.updated_at,
            }
        };

        // No upsert: an unknown id matches nothing and changes nothing.
        let result = self.collection.update_one(doc! { "_id": id }, update).await?;
        Ok(result.matched_count)
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<u64, StoreError> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count)
    }

    fn backend_name(&self) -> &'static str {
        "mongo"
    }
}
