//! Class CRUD and the single-class cascade delete.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use studyhub_core::error::AppError;
use studyhub_core::result::AppResult;
use studyhub_database::TransactionExecutor;
use studyhub_database::repositories::{ClassRepository, TaskRepository};
use studyhub_entity::class::{Class, CreateClass, UpdateClass};

/// Outcome of a cascade delete: how many tasks went down with the class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CascadeDeleteOutcome {
    /// Tasks deleted alongside the class.
    pub tasks_deleted: u64,
}

/// Manages class CRUD operations.
#[derive(Debug, Clone)]
pub struct ClassService {
    /// Class repository.
    class_repo: Arc<ClassRepository>,
    /// Task repository, needed for the cascade.
    task_repo: Arc<TaskRepository>,
    /// Transaction executor for the cascade delete.
    executor: Arc<TransactionExecutor>,
}

impl ClassService {
    /// Creates a new class service.
    pub fn new(
        class_repo: Arc<ClassRepository>,
        task_repo: Arc<TaskRepository>,
        executor: Arc<TransactionExecutor>,
    ) -> Self {
        Self {
            class_repo,
            task_repo,
            executor,
        }
    }

    /// Lists all classes, newest first.
    pub async fn list_classes(&self) -> AppResult<Vec<Class>> {
        self.class_repo.find_all().await
    }

    /// Gets a class by ID.
    pub async fn get_class(&self, class_id: Uuid) -> AppResult<Class> {
        self.class_repo
            .find_by_id(class_id)
            .await?
            .ok_or_else(|| AppError::not_found("Class not found"))
    }

    /// Creates a new class.
    pub async fn create_class(&self, data: CreateClass) -> AppResult<Class> {
        if data.name.trim().is_empty() {
            return Err(AppError::validation("Class name is required"));
        }

        let class = self.class_repo.create(&data).await?;
        info!(class_id = %class.id, name = %class.name, "Class created");
        Ok(class)
    }

    /// Partially updates a class. Only supplied fields change.
    pub async fn update_class(&self, class_id: Uuid, data: UpdateClass) -> AppResult<Class> {
        if let Some(name) = &data.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Class name cannot be empty"));
            }
        }

        self.class_repo.update(class_id, &data).await
    }

    /// Deletes a class and every task referencing it, atomically.
    ///
    /// Either both the class and all its tasks are deleted, or neither
    /// is. The class's existence is checked before the transaction for a
    /// cheap 404; it is deleted inside the transaction, where a missing
    /// row aborts the whole unit of work so the task deletions roll back.
    pub async fn delete_class(&self, class_id: Uuid) -> AppResult<CascadeDeleteOutcome> {
        self.class_repo
            .find_by_id(class_id)
            .await?
            .ok_or_else(|| AppError::not_found("Class not found"))?;

        let class_repo = Arc::clone(&self.class_repo);
        let task_repo = Arc::clone(&self.task_repo);

        let tasks_deleted = self
            .executor
            .run(move |tx| {
                Box::pin(async move {
                    let tasks_deleted = task_repo.delete_by_class_with(&mut **tx, class_id).await?;
                    let deleted = class_repo.delete_with(&mut **tx, class_id).await?;
                    if !deleted {
                        return Err(AppError::not_found("Class not found"));
                    }
                    Ok(tasks_deleted)
                })
            })
            .await?;

        info!(
            class_id = %class_id,
            tasks_deleted,
            "Class and associated tasks deleted"
        );
        Ok(CascadeDeleteOutcome { tasks_deleted })
    }
}
