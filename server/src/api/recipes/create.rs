use crate::api::{AppState, ErrorResponse};
use crate::types::{Recipe, RecipeContent};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

#[utoipa::path(
    post,
    path = "/v1/recipes",
    tag = "recipes",
    request_body = RecipeContent,
    responses(
        (status = 201, description = "Recipe created successfully", body = Recipe),
        (status = 400, description = "Invalid request payload", body = ErrorResponse),
        (status = 500, description = "Storage error", body = ErrorResponse)
    )
)]
pub async fn create_recipe(
    State(state): State<AppState>,
    body: Bytes,
) -> impl IntoResponse {
    let content = match RecipeContent::from_json(&body) {
        Ok(content) => content,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(format!("Invalid request payload - {}", e))),
            )
                .into_response()
        }
    };

    match state.recipes.create(content, state.store_timeout).await {
        Ok(recipe) => (StatusCode::CREATED, Json(recipe)).into_response(),
        Err(e) => {
            tracing::error!("Failed to create recipe: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response()
        }
    }
}
