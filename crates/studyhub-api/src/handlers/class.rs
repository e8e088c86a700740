//! Class CRUD handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use studyhub_core::error::AppError;
use studyhub_entity::class::{Class, CreateClass, UpdateClass};

use crate::dto::request::{CreateClassRequest, UpdateClassRequest, parse_id};
use crate::dto::response::DeleteClassResponse;
use crate::error::{ApiError, BulkError};
use crate::extractors::JsonBody;
use crate::sanitize::{sanitize_opt, sanitize_string};
use crate::state::AppState;

/// GET /api/classes
pub async fn list_classes(State(state): State<AppState>) -> Result<Json<Vec<Class>>, ApiError> {
    let classes = state.class_service.list_classes().await?;
    Ok(Json(classes))
}

/// GET /api/classes/{id}
pub async fn get_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Class>, ApiError> {
    let class = state.class_service.get_class(id).await?;
    Ok(Json(class))
}

/// POST /api/classes
pub async fn create_class(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateClassRequest>,
) -> Result<(StatusCode, Json<Class>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user_id = match req.user_id.as_deref() {
        Some(raw) => parse_id("userId", raw)?,
        None => Uuid::nil(), // placeholder owner for unauthenticated use
    };

    let class = state
        .class_service
        .create_class(CreateClass {
            name: sanitize_string(&req.name),
            description: sanitize_opt(req.description.as_deref()),
            user_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(class)))
}

/// PUT /api/classes/{id}
pub async fn update_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonBody(req): JsonBody<UpdateClassRequest>,
) -> Result<Json<Class>, ApiError> {
    let class = state
        .class_service
        .update_class(
            id,
            UpdateClass {
                name: req.name.as_deref().map(sanitize_string),
                description: req.description.as_deref().map(sanitize_string),
            },
        )
        .await?;

    Ok(Json(class))
}

/// DELETE /api/classes/{id} — cascades to the class's tasks, atomically.
pub async fn delete_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteClassResponse>, BulkError> {
    let outcome = state.class_service.delete_class(id).await?;

    Ok(Json(DeleteClassResponse {
        message: "Class and associated tasks deleted successfully".to_string(),
        tasks_deleted: outcome.tasks_deleted,
        transactional: true,
    }))
}
