use std::sync::Arc;

use sea_orm::{ActiveValue, DatabaseConnection};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::crud::{CrudError, CrudResource, CrudService};
use crate::entities::todo_task::{self, TaskStatus};

pub mod api;

/// A todo task as seen by the rest of the application, distinct from the
/// persistence model.
#[derive(Debug, PartialEq, Clone, Eq)]
pub struct Task {
    id: i64,
    title: String,
    description: String,
    status: TaskStatus,
}

impl Task {
    pub fn new(id: i64, title: String, description: String, status: TaskStatus) -> Self {
        Self {
            id,
            title,
            description,
            status,
        }
    }

    /// Returns the ID of the task.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Returns the title of the task.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description of the task.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the status of the task.
    pub fn status(&self) -> TaskStatus {
        self.status
    }
}

impl From<todo_task::Model> for Task {
    fn from(model: todo_task::Model) -> Self {
        Task::new(model.id, model.title, model.description, model.status)
    }
}

/// Input shape for creating a task. Status is not accepted here; new tasks
/// always start out pending.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTask {
    pub title: String,
    pub description: String,
}

/// Input shape for updating a task. Every field is replaced on update.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

/// Binding of the generic CRUD layer to the todo task entity.
pub struct TaskResource;

impl CrudResource for TaskResource {
    type Entity = todo_task::Entity;
    type Model = todo_task::Model;
    type ActiveModel = todo_task::ActiveModel;
    type CreateInput = CreateTask;
    type UpdateInput = UpdateTask;

    const RECORD_NAME: &'static str = "TodoTask";

    fn create_model(input: CreateTask) -> todo_task::ActiveModel {
        todo_task::ActiveModel {
            title: ActiveValue::Set(input.title),
            description: ActiveValue::Set(input.description),
            status: ActiveValue::Set(TaskStatus::default()),
            ..Default::default()
        }
    }

    fn apply_update(model: todo_task::Model, input: UpdateTask) -> todo_task::ActiveModel {
        let mut active: todo_task::ActiveModel = model.into();
        active.title = ActiveValue::Set(input.title);
        active.description = ActiveValue::Set(input.description);
        active.status = ActiveValue::Set(input.status);
        active.updated_at = ActiveValue::Set(chrono::Utc::now().fixed_offset());
        active
    }
}

/// Shared state for task handlers.
#[derive(Clone)]
pub struct TaskState {
    pub db: Arc<DatabaseConnection>,
}

/// Task-specific specialization of the generic CRUD service.
///
/// Adds nothing beyond the binding and the model-to-domain conversion;
/// pre/post hooks around the CRUD operations would go here if a resource
/// ever needed them.
pub struct TaskService {
    inner: CrudService<TaskResource>,
}

impl TaskService {
    /// Opens a request-scoped transaction on the given connection.
    pub async fn begin(db: &DatabaseConnection) -> Result<Self, CrudError> {
        Ok(Self {
            inner: CrudService::begin(db).await?,
        })
    }

    /// Creates a new task with status defaulting to pending.
    pub async fn create(&self, input: CreateTask) -> Result<Task, CrudError> {
        Ok(Task::from(self.inner.create(input).await?))
    }

    /// Replaces title, description and status of the task with the given id.
    pub async fn update(&self, id: i64, input: UpdateTask) -> Result<Task, CrudError> {
        Ok(Task::from(self.inner.update(id, input).await?))
    }

    /// Deletes the task with the given id. `Ok(false)` means the delete was
    /// blocked by an integrity violation.
    pub async fn delete(&self, id: i64) -> Result<bool, CrudError> {
        self.inner.delete(id).await
    }

    /// Fetches the task with the given id.
    pub async fn get_by_id(&self, id: i64) -> Result<Task, CrudError> {
        Ok(Task::from(self.inner.get_by_id(id).await?))
    }

    /// Returns all tasks.
    pub async fn get_all(&self) -> Result<Vec<Task>, CrudError> {
        Ok(self
            .inner
            .get_all()
            .await?
            .into_iter()
            .map(Task::from)
            .collect())
    }

    /// Finalizes the request transaction.
    pub async fn commit(self) -> Result<(), CrudError> {
        self.inner.commit().await
    }

    /// Discards the request transaction.
    pub async fn rollback(self) -> Result<(), CrudError> {
        self.inner.rollback().await
    }
}
