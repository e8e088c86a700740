//! Transactional bulk workflows.
//!
//! Each workflow validates its preconditions outside any transaction
//! (cheap existence lookups; a failure returns before a unit of work is
//! opened), then performs every mutation inside exactly one transaction.
//! Because the outside checks can go stale under concurrency, workflows
//! that depend on a class existing re-verify it inside the transaction's
//! snapshot before mutating.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use studyhub_core::error::AppError;
use studyhub_core::result::AppResult;
use studyhub_database::TransactionExecutor;
use studyhub_database::repositories::{ClassRepository, TaskRepository};
use studyhub_entity::class::CreateClass;
use studyhub_entity::task::CreateTask;

/// Outcome of moving all tasks between two classes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveTasksOutcome {
    /// Tasks reassigned.
    pub moved_count: u64,
    /// Source class name.
    pub from_class: String,
    /// Destination class name.
    pub to_class: String,
}

/// Outcome of bulk-deleting classes with their tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteClassesOutcome {
    /// Classes actually deleted (missing ids are tolerated).
    pub classes_deleted: u64,
    /// Tasks deleted across those classes.
    pub tasks_deleted: u64,
}

/// Outcome of completing every open task in a class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteAllOutcome {
    /// The class name.
    pub class_name: String,
    /// Tasks transitioned from open to completed.
    pub tasks_completed: u64,
}

/// Outcome of duplicating a class with its tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateClassOutcome {
    /// The new class's ID.
    pub new_class_id: Uuid,
    /// The new class's name.
    pub new_class_name: String,
    /// Task copies created.
    pub tasks_copied: u64,
}

/// The transactional bulk-operation subsystem: four multi-document
/// workflows with all-or-nothing semantics.
#[derive(Debug, Clone)]
pub struct BulkService {
    /// Class repository.
    class_repo: Arc<ClassRepository>,
    /// Task repository.
    task_repo: Arc<TaskRepository>,
    /// Transaction executor.
    executor: Arc<TransactionExecutor>,
}

impl BulkService {
    /// Creates a new bulk service.
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

    /// Moves every task of the source class to the destination class.
    ///
    /// Source and destination being the same id is not rejected: the
    /// update matches every task of the class and reports the matched
    /// count as moved.
    pub async fn move_tasks(
        &self,
        from_class_id: Uuid,
        to_class_id: Uuid,
    ) -> AppResult<MoveTasksOutcome> {
        let from_class = self
            .class_repo
            .find_by_id(from_class_id)
            .await?
            .ok_or_else(|| AppError::not_found("Source class not found"))?;
        let to_class = self
            .class_repo
            .find_by_id(to_class_id)
            .await?
            .ok_or_else(|| AppError::not_found("Destination class not found"))?;

        let class_repo = Arc::clone(&self.class_repo);
        let task_repo = Arc::clone(&self.task_repo);

        let moved_count = self
            .executor
            .run(move |tx| {
                Box::pin(async move {
                    // The destination could have been cascade-deleted since the
                    // precondition check; re-verify in the snapshot so no task
                    // ends up orphaned.
                    class_repo
                        .find_by_id_with(&mut **tx, to_class_id)
                        .await?
                        .ok_or_else(|| AppError::not_found("Destination class not found"))?;

                    task_repo
                        .reassign_class_with(&mut **tx, from_class_id, to_class_id)
                        .await
                })
            })
            .await?;

        info!(
            from = %from_class_id,
            to = %to_class_id,
            moved_count,
            "Moved tasks between classes"
        );
        Ok(MoveTasksOutcome {
            moved_count,
            from_class: from_class.name,
            to_class: to_class.name,
        })
    }

    /// Deletes every class in `class_ids` together with all their tasks.
    ///
    /// Ids that match no class are silently tolerated; the reported
    /// counts reflect actual matches, not the requested set size.
    pub async fn delete_classes(&self, class_ids: Vec<Uuid>) -> AppResult<DeleteClassesOutcome> {
        if class_ids.is_empty() {
            return Err(AppError::validation("classIds must be a non-empty array"));
        }

        let class_repo = Arc::clone(&self.class_repo);
        let task_repo = Arc::clone(&self.task_repo);

        let outcome = self
            .executor
            .run(move |tx| {
                Box::pin(async move {
                    let tasks_deleted = task_repo
                        .delete_by_classes_with(&mut **tx, &class_ids)
                        .await?;
                    let classes_deleted =
                        class_repo.delete_many_with(&mut **tx, &class_ids).await?;
                    Ok(DeleteClassesOutcome {
                        classes_deleted,
                        tasks_deleted,
                    })
                })
            })
            .await?;

        info!(
            classes_deleted = outcome.classes_deleted,
            tasks_deleted = outcome.tasks_deleted,
            "Bulk class deletion completed"
        );
        Ok(outcome)
    }

    /// Marks every open task of a class as completed.
    pub async fn complete_all_tasks(&self, class_id: Uuid) -> AppResult<CompleteAllOutcome> {
        let class = self
            .class_repo
            .find_by_id(class_id)
            .await?
            .ok_or_else(|| AppError::not_found("Class not found"))?;

        let task_repo = Arc::clone(&self.task_repo);

        let tasks_completed = self
            .executor
            .run(move |tx| {
                Box::pin(async move { task_repo.complete_all_with(&mut **tx, class_id).await })
            })
            .await?;

        info!(class_id = %class_id, tasks_completed, "Completed all tasks in class");
        Ok(CompleteAllOutcome {
            class_name: class.name,
            tasks_completed,
        })
    }

    /// Duplicates a class and all its tasks under a new identity.
    ///
    /// The copy takes the supplied name, or `"<original> (Copy)"` when
    /// none is given. Task copies keep every field except `completed`,
    /// which is reset to false. A class with zero tasks duplicates to a
    /// class with zero tasks.
    pub async fn duplicate_class(
        &self,
        class_id: Uuid,
        new_class_name: Option<String>,
    ) -> AppResult<DuplicateClassOutcome> {
        self.class_repo
            .find_by_id(class_id)
            .await?
            .ok_or_else(|| AppError::not_found("Class not found"))?;

        let class_repo = Arc::clone(&self.class_repo);
        let task_repo = Arc::clone(&self.task_repo);

        let outcome = self
            .executor
            .run(move |tx| {
                Box::pin(async move {
                    // Re-read the source from the snapshot: the class and its
                    // tasks are copied from one consistent point in time.
                    let original = class_repo
                        .find_by_id_with(&mut **tx, class_id)
                        .await?
                        .ok_or_else(|| AppError::not_found("Class not found"))?;
                    let original_tasks =
                        task_repo.find_by_class_with(&mut **tx, class_id).await?;

                    let new_class = class_repo
                        .insert_with(
                            &mut **tx,
                            &CreateClass {
                                name: new_class_name
                                    .unwrap_or_else(|| copy_name(&original.name)),
                                description: original.description.clone(),
                                user_id: original.user_id,
                            },
                        )
                        .await?;

                    let copies: Vec<CreateTask> = original_tasks
                        .iter()
                        .map(|task| CreateTask::copy_of(task, new_class.id))
                        .collect();
                    let tasks_copied = task_repo.insert_many_with(&mut **tx, &copies).await?;

                    Ok(DuplicateClassOutcome {
                        new_class_id: new_class.id,
                        new_class_name: new_class.name,
                        tasks_copied,
                    })
                })
            })
            .await?;

        info!(
            source = %class_id,
            new_class_id = %outcome.new_class_id,
            tasks_copied = outcome.tasks_copied,
            "Class duplicated"
        );
        Ok(outcome)
    }
}

/// Default name for a duplicated class.
fn copy_name(original: &str) -> String {
    format!("{original} (Copy)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_name_appends_suffix() {
        assert_eq!(copy_name("Math 101"), "Math 101 (Copy)");
        assert_eq!(copy_name(""), " (Copy)");
    }
}
