//! Task CRUD handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use studyhub_core::error::AppError;
use studyhub_entity::priority::Priority;
use studyhub_entity::task::{CreateTask, Task, TaskWithClass, UpdateTask};

use crate::dto::request::{CreateTaskRequest, TaskListQuery, UpdateTaskRequest, parse_id};
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::JsonBody;
use crate::sanitize::{sanitize_opt, sanitize_string};
use crate::state::AppState;

/// GET /api/tasks — filtered list, class names resolved.
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<TaskListQuery>,
) -> Result<Json<Vec<TaskWithClass>>, ApiError> {
    let filter = query.into_filter()?;
    let tasks = state.task_service.list_tasks(&filter).await?;
    Ok(Json(tasks))
}

/// GET /api/tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TaskWithClass>, ApiError> {
    let task = state.task_service.get_task(id).await?;
    Ok(Json(task))
}

/// POST /api/tasks
pub async fn create_task(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let class_id = parse_id("classId", &req.class_id)?;
    let priority = match req.priority.as_deref() {
        Some(raw) => sanitize_string(raw).parse::<Priority>()?,
        None => Priority::default(),
    };

    let task = state
        .task_service
        .create_task(CreateTask {
            name: sanitize_string(&req.name),
            description: sanitize_opt(req.description.as_deref()),
            class_id,
            estimated_time: req.estimated_time.unwrap_or(0),
            due_date: req.due_date,
            completed: req.completed.unwrap_or(false),
            priority,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /api/tasks/{id}
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonBody(req): JsonBody<UpdateTaskRequest>,
) -> Result<Json<Task>, ApiError> {
    let class_id = match req.class_id.as_deref() {
        Some(raw) => Some(parse_id("classId", raw)?),
        None => None,
    };
    let priority = match req.priority.as_deref() {
        Some(raw) => Some(sanitize_string(raw).parse::<Priority>()?),
        None => None,
    };

    let task = state
        .task_service
        .update_task(
            id,
            UpdateTask {
                name: req.name.as_deref().map(sanitize_string),
                description: req.description.as_deref().map(sanitize_string),
                class_id,
                estimated_time: req.estimated_time,
                due_date: req.due_date,
                completed: req.completed,
                priority,
            },
        )
        .await?;

    Ok(Json(task))
}

/// DELETE /api/tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.task_service.delete_task(id).await?;
    Ok(Json(MessageResponse {
        message: "Task deleted successfully".to_string(),
    }))
}
