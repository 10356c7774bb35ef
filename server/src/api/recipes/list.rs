use crate::api::{AppState, ErrorResponse};
use crate::types::Recipe;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

#[utoipa::path(
    get,
    path = "/v1/recipes",
    tag = "recipes",
    responses(
        (status = 200, description = "All recipes, possibly none", body = Vec<Recipe>),
        (status = 500, description = "Storage error", body = ErrorResponse)
    )
)]
pub async fn list_recipes(State(state): State<AppState>) -> impl IntoResponse {
    match state.recipes.get_all(state.store_timeout).await {
        Ok(recipes) => (StatusCode::OK, Json(recipes)).into_response(),
        Err(e) => {
            tracing::error!("Failed to list recipes: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::*;
    use crate::types::Recipe;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_list_empty_is_empty_array() {
        let (_, app) = test_app();

        let (status, body) = send(&app, empty_request("GET", "/v1/recipes")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"[]");
    }

    #[tokio::test]
    async fn test_list_returns_all() {
        let (_, app) = test_app();
        for name in ["Tea", "Coffee", "Cocoa"] {
            let body = format!(r#"{{"name":"{name}","ingredients":[],"instructions":"Heat"}}"#);
            let (status, _) = send(&app, json_request("POST", "/v1/recipes", &body)).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = send(&app, empty_request("GET", "/v1/recipes")).await;
        assert_eq!(status, StatusCode::OK);

        let recipes: Vec<Recipe> = serde_json::from_slice(&body).unwrap();
        let names: Vec<&str> = recipes.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Tea", "Coffee", "Cocoa"]);
    }

    #[tokio::test]
    async fn test_list_storage_failure() {
        let (store, app) = test_app();
        store.fail_with("socket closed");

        let (status, _) = send(&app, empty_request("GET", "/v1/recipes")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
