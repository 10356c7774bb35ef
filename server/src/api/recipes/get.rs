use crate::api::{AppState, ErrorResponse};
use crate::types::Recipe;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

#[utoipa::path(
    get,
    path = "/v1/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Recipe details", body = Recipe),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 500, description = "Malformed id or storage error", body = ErrorResponse)
    )
)]
pub async fn get_recipe(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    match state.recipes.get_by_id(&id, state.store_timeout).await {
        Ok(Some(recipe)) => (StatusCode::OK, Json(recipe)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Recipe not found")),
        )
            .into_response(),
        // Malformed ids land here too and are reported as 500.
        Err(e) => {
            tracing::error!("Failed to fetch recipe {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response()
        }
    }
}
