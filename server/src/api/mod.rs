pub mod health;
pub mod recipes;

use crate::repository::RecipeRepository;
use axum::http::{header, Method};
use axum::Router;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error_message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error_message: message.into(),
        }
    }
}

/// Plain success message
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Everything a handler needs: the persistence gateway and the deadline applied
/// to each store call.
#[derive(Debug)]
pub struct ApiContext {
    pub recipes: RecipeRepository,
    pub store_timeout: Duration,
}

/// Application state shared across all handlers
pub type AppState = Arc<ApiContext>;

/// Build the full application router: health check, versioned recipe routes,
/// OpenAPI document and Swagger UI, with CORS applied.
pub fn router(state: AppState) -> Router {
    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi());

    Router::new()
        .merge(health::router())
        .nest("/v1/recipes", recipes::router())
        .merge(swagger_ui)
        .with_state(state)
        .layer(cors())
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([header::CONTENT_LENGTH])
        .max_age(Duration::from_secs(12 * 60 * 60))
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(
        info(
            title = "Recipe API",
            description = "Create, read, update and delete recipes."
        ),
        components(schemas(ErrorResponse, MessageResponse))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();
    spec.merge(health::ApiDoc::openapi());
    spec.merge(recipes::ApiDoc::openapi());
    spec
}
