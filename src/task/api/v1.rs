use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::crud::CrudError;
use crate::task::{CreateTask, Task, TaskService, TaskState, UpdateTask};
use crate::web::api::DefaultResponse;

/// JSON representation of a task for API responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TaskJson {
    /// Unique identifier for the task
    id: i64,
    /// Title of the task
    title: String,
    /// Description of the task
    description: String,
    /// Status of the task
    status: crate::entities::todo_task::TaskStatus,
}

impl From<Task> for TaskJson {
    fn from(task: Task) -> Self {
        Self {
            id: task.id(),
            title: task.title().to_string(),
            description: task.description().to_string(),
            status: task.status(),
        }
    }
}

/// Custom error type for task handler operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskApiError {
    /// Represents a CRUD service error.
    #[error(transparent)]
    Crud(#[from] CrudError),
}

impl IntoResponse for TaskApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            TaskApiError::Crud(err @ CrudError::NotFound { .. }) => (
                StatusCode::NOT_FOUND,
                Json(DefaultResponse::failure(err.to_string())),
            )
                .into_response(),
            TaskApiError::Crud(CrudError::Database(err)) => {
                tracing::error!("Database error while handling request: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(DefaultResponse::failure(
                        "An unexpected error occurred while processing your request.".to_string(),
                    )),
                )
                    .into_response()
            }
        }
    }
}

/// Handler for GET /api/v1/tasks/{id} - Returns a single task.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/v1/tasks/{id}",
    params(
        ("id" = i64, Path, description = "Task identifier")
    ),
    responses(
        (status = 200, description = "Successfully retrieved task", body = TaskJson),
        (status = 404, description = "Task not found", body = DefaultResponse)
    ),
    tag = "Tasks"
)]
pub async fn get_task_handler(
    State(state): State<Arc<TaskState>>,
    Path(id): Path<i64>,
) -> Result<Json<TaskJson>, TaskApiError> {
    let service = TaskService::begin(&state.db).await?;
    let task = service.get_by_id(id).await?;
    service.commit().await?;
    Ok(Json(TaskJson::from(task)))
}

/// Handler for GET /api/v1/tasks - Returns all tasks.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/v1/tasks",
    responses(
        (status = 200, description = "Successfully retrieved tasks", body = [TaskJson])
    ),
    tag = "Tasks"
)]
pub async fn get_tasks_handler(
    State(state): State<Arc<TaskState>>,
) -> Result<Json<Vec<TaskJson>>, TaskApiError> {
    let service = TaskService::begin(&state.db).await?;
    let tasks = service.get_all().await?;
    service.commit().await?;
    Ok(Json(tasks.into_iter().map(TaskJson::from).collect()))
}

/// Handler for POST /api/v1/tasks - Creates a new task.
#[tracing::instrument(skip(state, payload))]
#[utoipa::path(
    post,
    path = "/api/v1/tasks",
    request_body = CreateTask,
    responses(
        (status = 201, description = "Task created", body = TaskJson),
        (status = 422, description = "Invalid request body")
    ),
    tag = "Tasks"
)]
pub async fn create_task_handler(
    State(state): State<Arc<TaskState>>,
    Json(payload): Json<CreateTask>,
) -> Result<(StatusCode, Json<TaskJson>), TaskApiError> {
    let service = TaskService::begin(&state.db).await?;
    let task = service.create(payload).await?;
    service.commit().await?;
    Ok((StatusCode::CREATED, Json(TaskJson::from(task))))
}

/// Handler for PUT /api/v1/tasks/{id} - Replaces title, description and
/// status of an existing task.
#[tracing::instrument(skip(state, payload))]
#[utoipa::path(
    put,
    path = "/api/v1/tasks/{id}",
    params(
        ("id" = i64, Path, description = "Task identifier")
    ),
    request_body = UpdateTask,
    responses(
        (status = 200, description = "Task updated", body = TaskJson),
        (status = 404, description = "Task not found", body = DefaultResponse),
        (status = 422, description = "Invalid request body")
    ),
    tag = "Tasks"
)]
pub async fn update_task_handler(
    State(state): State<Arc<TaskState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateTask>,
) -> Result<Json<TaskJson>, TaskApiError> {
    let service = TaskService::begin(&state.db).await?;
    let task = service.update(id, payload).await?;
    service.commit().await?;
    Ok(Json(TaskJson::from(task)))
}

/// Handler for DELETE /api/v1/tasks/{id} - Deletes a task and reports the
/// outcome in a success/message envelope.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    delete,
    path = "/api/v1/tasks/{id}",
    params(
        ("id" = i64, Path, description = "Task identifier")
    ),
    responses(
        (status = 200, description = "Delete outcome", body = DefaultResponse),
        (status = 404, description = "Task not found", body = DefaultResponse)
    ),
    tag = "Tasks"
)]
pub async fn delete_task_handler(
    State(state): State<Arc<TaskState>>,
    Path(id): Path<i64>,
) -> Result<Json<DefaultResponse>, TaskApiError> {
    let service = TaskService::begin(&state.db).await?;
    let deleted = service.delete(id).await?;
    service.commit().await?;

    let response = if deleted {
        DefaultResponse::success("Task deleted successfully".to_string())
    } else {
        DefaultResponse::failure("Task deletion failed".to_string())
    };
    Ok(Json(response))
}

/// Creates and returns the tasks API router.
pub fn create_api_router(state: Arc<TaskState>) -> Router {
    Router::new()
        .route(
            "/tasks",
            get(get_tasks_handler).post(create_task_handler),
        )
        .route(
            "/tasks/{id}",
            get(get_task_handler)
                .put(update_task_handler)
                .delete(delete_task_handler),
        )
        .with_state(state)
}
