//! Task CRUD with application-level referential checks.
//!
//! The datastore has no foreign key from tasks to classes, so this
//! service verifies the referenced class exists before creating a task
//! or reassigning one.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use studyhub_core::error::AppError;
use studyhub_core::result::AppResult;
use studyhub_database::repositories::{ClassRepository, TaskRepository};
use studyhub_entity::filter::TaskFilter;
use studyhub_entity::task::{CreateTask, Task, TaskWithClass, UpdateTask};

/// Manages task CRUD operations.
#[derive(Debug, Clone)]
pub struct TaskService {
    /// Task repository.
    task_repo: Arc<TaskRepository>,
    /// Class repository, for referential checks.
    class_repo: Arc<ClassRepository>,
}

impl TaskService {
    /// Creates a new task service.
    pub fn new(task_repo: Arc<TaskRepository>, class_repo: Arc<ClassRepository>) -> Self {
        Self {
            task_repo,
            class_repo,
        }
    }

    /// Lists tasks matching the filter, newest first, with class names
    /// resolved.
    pub async fn list_tasks(&self, filter: &TaskFilter) -> AppResult<Vec<TaskWithClass>> {
        self.task_repo.find_filtered(filter).await
    }

    /// Gets a task by ID, with its class name resolved.
    pub async fn get_task(&self, task_id: Uuid) -> AppResult<TaskWithClass> {
        self.task_repo
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| AppError::not_found("Task not found"))
    }

    /// Creates a new task under an existing class.
    pub async fn create_task(&self, data: CreateTask) -> AppResult<Task> {
        if data.name.trim().is_empty() {
            return Err(AppError::validation("Task name is required"));
        }
        if data.estimated_time < 0 {
            return Err(AppError::validation("estimatedTime cannot be negative"));
        }

        self.class_repo
            .find_by_id(data.class_id)
            .await?
            .ok_or_else(|| AppError::not_found("Class not found"))?;

        let task = self.task_repo.create(&data).await?;
        info!(task_id = %task.id, class_id = %task.class_id, "Task created");
        Ok(task)
    }

    /// Partially updates a task. Reassigning the task to another class
    /// requires that class to exist.
    pub async fn update_task(&self, task_id: Uuid, data: UpdateTask) -> AppResult<Task> {
        if let Some(name) = &data.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Task name cannot be empty"));
            }
        }
        if let Some(estimated_time) = data.estimated_time {
            if estimated_time < 0 {
                return Err(AppError::validation("estimatedTime cannot be negative"));
            }
        }
        if let Some(class_id) = data.class_id {
            self.class_repo
                .find_by_id(class_id)
                .await?
                .ok_or_else(|| AppError::not_found("Class not found"))?;
        }

        self.task_repo.update(task_id, &data).await
    }

    /// Deletes one task.
    pub async fn delete_task(&self, task_id: Uuid) -> AppResult<()> {
        let deleted = self.task_repo.delete(task_id).await?;
        if !deleted {
            return Err(AppError::not_found("Task not found"));
        }
        Ok(())
    }
}
