//! Transactional bulk-operation handlers.
//!
//! Every response — success or failure — carries `transactional: true`:
//! the operation either fully applied or fully rolled back, so callers
//! never have partial effects to reconcile.

use axum::Json;
use axum::extract::State;
use uuid::Uuid;

use crate::dto::request::{
    CompleteAllTasksRequest, DeleteClassesRequest, DuplicateClassRequest, MoveTasksRequest,
    parse_id,
};
use crate::dto::response::{
    CompleteAllTasksResponse, DeleteClassesResponse, DuplicateClassResponse, MoveTasksResponse,
};
use crate::error::BulkError;
use crate::extractors::BulkJson;
use crate::sanitize::sanitize_string;
use crate::state::AppState;

/// POST /api/bulk/move-tasks
pub async fn move_tasks(
    State(state): State<AppState>,
    BulkJson(req): BulkJson<MoveTasksRequest>,
) -> Result<Json<MoveTasksResponse>, BulkError> {
    let from_class_id = parse_id("fromClassId", &req.from_class_id)?;
    let to_class_id = parse_id("toClassId", &req.to_class_id)?;

    let outcome = state
        .bulk_service
        .move_tasks(from_class_id, to_class_id)
        .await?;

    Ok(Json(MoveTasksResponse {
        message: format!("Successfully moved {} tasks", outcome.moved_count),
        moved_count: outcome.moved_count,
        from_class: outcome.from_class,
        to_class: outcome.to_class,
        transactional: true,
    }))
}

/// POST /api/bulk/delete-classes
pub async fn delete_classes(
    State(state): State<AppState>,
    BulkJson(req): BulkJson<DeleteClassesRequest>,
) -> Result<Json<DeleteClassesResponse>, BulkError> {
    let class_ids = req
        .class_ids
        .iter()
        .map(|raw| parse_id("classIds", raw))
        .collect::<Result<Vec<Uuid>, _>>()?;

    let outcome = state.bulk_service.delete_classes(class_ids).await?;

    Ok(Json(DeleteClassesResponse {
        message: "Bulk deletion completed successfully".to_string(),
        classes_deleted: outcome.classes_deleted,
        tasks_deleted: outcome.tasks_deleted,
        transactional: true,
    }))
}

/// POST /api/bulk/complete-all-tasks
pub async fn complete_all_tasks(
    State(state): State<AppState>,
    BulkJson(req): BulkJson<CompleteAllTasksRequest>,
) -> Result<Json<CompleteAllTasksResponse>, BulkError> {
    let class_id = parse_id("classId", &req.class_id)?;

    let outcome = state.bulk_service.complete_all_tasks(class_id).await?;

    Ok(Json(CompleteAllTasksResponse {
        message: format!(
            "Marked all tasks in \"{}\" as completed",
            outcome.class_name
        ),
        class_name: outcome.class_name,
        tasks_completed: outcome.tasks_completed,
        transactional: true,
    }))
}

/// POST /api/bulk/duplicate-class
pub async fn duplicate_class(
    State(state): State<AppState>,
    BulkJson(req): BulkJson<DuplicateClassRequest>,
) -> Result<Json<DuplicateClassResponse>, BulkError> {
    let class_id = parse_id("classId", &req.class_id)?;
    let new_class_name = req
        .new_class_name
        .as_deref()
        .map(sanitize_string)
        .filter(|name| !name.trim().is_empty());

    let outcome = state
        .bulk_service
        .duplicate_class(class_id, new_class_name)
        .await?;

    Ok(Json(DuplicateClassResponse {
        message: "Class duplicated successfully".to_string(),
        new_class_id: outcome.new_class_id,
        new_class_name: outcome.new_class_name,
        tasks_copied: outcome.tasks_copied,
        transactional: true,
    }))
}
