use std::sync::Arc;

use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::task::TaskState;

/// Uniform response envelope for operations that do not return a resource,
/// and for error responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DefaultResponse {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable outcome description
    pub message: String,
}

impl DefaultResponse {
    pub fn success(message: String) -> Self {
        Self {
            success: true,
            message,
        }
    }

    pub fn failure(message: String) -> Self {
        Self {
            success: false,
            message,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo API",
        version = "1.0.0",
        description = "API for managing todo tasks"
    ),
    paths(
        crate::task::api::v1::get_task_handler,
        crate::task::api::v1::get_tasks_handler,
        crate::task::api::v1::create_task_handler,
        crate::task::api::v1::update_task_handler,
        crate::task::api::v1::delete_task_handler,
    ),
    tags(
        (name = "Tasks", description = "Todo task management endpoints")
    )
)]
pub struct ApiDoc;

/// Handler serving the generated OpenAPI document.
pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Creates the API routes for JSON API endpoints.
pub fn create_api_router(task_state: Arc<TaskState>) -> Router {
    let tasks_router = crate::task::api::v1::create_api_router(task_state);
    Router::new()
        .nest("/api/v1", tasks_router)
        .route(
            "/api-docs/openapi.json",
            axum::routing::get(openapi_handler),
        )
}
