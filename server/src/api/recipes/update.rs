use crate::api::{AppState, ErrorResponse, MessageResponse};
use crate::types::RecipeContent;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

#[utoipa::path(
    put,
    path = "/v1/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID (24 hex characters)")
    ),
    request_body = RecipeContent,
    responses(
        (status = 200, description = "Recipe updated successfully", body = MessageResponse),
        (status = 400, description = "Invalid request payload", body = ErrorResponse),
        (status = 500, description = "Malformed id or storage error", body = ErrorResponse)
    )
)]
pub async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> impl IntoResponse {
    let content = match RecipeContent::from_json(&body) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!("Rejected update payload: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Invalid request payload")),
            )
                .into_response();
        }
    };

    // An id that matches no recipe still reports success.
    match state.recipes.update(&id, content, state.store_timeout).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Recipe updated successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to update recipe {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response()
        }
    }
}
