use crate::api::{AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

#[utoipa::path(
    delete,
    path = "/v1/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID (24 hex characters)")
    ),
    responses(
        (status = 204, description = "Recipe deleted, or no recipe had this id"),
        (status = 404, description = "Malformed id or storage error", body = ErrorResponse)
    )
)]
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.recipes.delete(&id, state.store_timeout).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            tracing::error!("Failed to delete recipe {}: {}", id, e);
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::*;
    use crate::api::ErrorResponse;
    use crate::types::Recipe;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_delete_then_get_not_found() {
        let (store, app) = test_app();
        let (_, body) = send(
            &app,
            json_request(
                "POST",
                "/v1/recipes",
                r#"{"name":"Tea","ingredients":[],"instructions":"Boil"}"#,
            ),
        )
        .await;
        let created: Recipe = serde_json::from_slice(&body).unwrap();
        let uri = format!("/v1/recipes/{}", created.id);

        let (status, body) = send(&app, empty_request("DELETE", &uri)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());
        assert_eq!(store.len(), 0);

        let (status, _) = send(&app, empty_request("GET", &uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_absent_id_is_no_content() {
        let (_, app) = test_app();

        let (status, _) =
            send(&app, empty_request("DELETE", "/v1/recipes/65f1a2b3c4d5e6f708192a3b")).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_delete_malformed_id_is_not_found() {
        let (store, app) = test_app();

        let (status, body) = send(&app, empty_request("DELETE", "/v1/recipes/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(error.error_message.starts_with("invalid id: "));
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_storage_failure_is_not_found() {
        let (store, app) = test_app();
        store.fail_with("write concern timeout");

        let (status, body) =
            send(&app, empty_request("DELETE", "/v1/recipes/65f1a2b3c4d5e6f708192a3b")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            error.error_message,
            "failed to delete recipe: store unavailable: write concern timeout"
        );
    }
}
