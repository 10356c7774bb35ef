use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Client-editable recipe fields.
/// Used for: create and update request bodies. Unknown fields such as `id` or
/// `created_at` are ignored; absent or `null` fields decode to empty values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct RecipeContent {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ingredients: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub instructions: String,
}

impl RecipeContent {
    /// Decode a request body. The Content-Type header is not consulted; only
    /// malformed JSON or a wrong field type is an error.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A stored recipe as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Recipe {
    /// 24-character hex ObjectId
    pub id: String,
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_are_empty() {
        let content = RecipeContent::from_json(br#"{"name":"Tea","instructions":"Boil"}"#).unwrap();
        assert_eq!(content.name, "Tea");
        assert!(content.ingredients.is_empty());
        assert_eq!(content.instructions, "Boil");

        let content = RecipeContent::from_json(b"{}").unwrap();
        assert_eq!(content, RecipeContent::default());
    }

    #[test]
    fn test_null_fields_are_empty() {
        let content = RecipeContent::from_json(
            br#"{"name":null,"ingredients":null,"instructions":"Boil"}"#,
        )
        .unwrap();
        assert_eq!(content.name, "");
        assert!(content.ingredients.is_empty());
        assert_eq!(content.instructions, "Boil");
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let content = RecipeContent::from_json(
            br#"{"id":"000000000000000000000001","name":"Tea","ingredients":["water"],"instructions":"Boil","created_at":"2000-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(content.ingredients, vec!["water"]);
    }

    #[test]
    fn test_type_mismatch_rejected() {
        assert!(RecipeContent::from_json(br#"{"name":42}"#).is_err());
        assert!(RecipeContent::from_json(br#"{"ingredients":"water"}"#).is_err());
        assert!(RecipeContent::from_json(br#"{"ingredients":[1,2]}"#).is_err());
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(RecipeContent::from_json(b"{not json").is_err());
        assert!(RecipeContent::from_json(b"").is_err());
        assert!(RecipeContent::from_json(br#""Tea""#).is_err());
    }
}
