use crate::types::{Recipe, RecipeContent};
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A recipe as stored in the `recipes` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

impl RecipeDocument {
    pub fn new(id: ObjectId, content: RecipeContent, now: bson::DateTime) -> Self {
        Self {
            id,
            name: content.name,
            ingredients: content.ingredients,
            instructions: content.instructions,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<RecipeDocument> for Recipe {
    fn from(doc: RecipeDocument) -> Self {
        Recipe {
            id: doc.id.to_hex(),
            name: doc.name,
            ingredients: doc.ingredients,
            instructions: doc.instructions,
            created_at: doc.created_at.to_chrono(),
            updated_at: doc.updated_at.to_chrono(),
        }
    }
}

/// Fields replaced by an update. Everything else on the document is left alone.
#[derive(Debug, Clone)]
pub struct RecipeChanges {
    pub content: RecipeContent,
    pub updated_at: bson::DateTime,
}
