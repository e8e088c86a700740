//! Task repository implementation.

use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use studyhub_core::error::{AppError, ErrorKind};
use studyhub_core::result::AppResult;
use studyhub_entity::filter::TaskFilter;
use studyhub_entity::task::{CreateTask, Task, TaskWithClass, UpdateTask};

/// Columns selected when resolving the owning class's name.
const TASK_WITH_CLASS: &str = "SELECT t.id, t.name, t.description, t.class_id, \
     t.estimated_time, t.due_date, t.completed, t.priority, t.created_at, \
     c.name AS class_name \
     FROM tasks t LEFT JOIN classes c ON c.id = t.class_id";

/// Repository for task CRUD, filtered listing, and the en-masse
/// mutations the bulk workflows issue.
#[derive(Debug, Clone)]
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    /// Create a new task repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a task by ID, with the owning class's name resolved.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<TaskWithClass>> {
        sqlx::query_as::<_, TaskWithClass>(&format!("{TASK_WITH_CLASS} WHERE t.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find task", e))
    }

    /// List tasks matching the filter, newest first, each with the
    /// owning class's name resolved. Unset filter fields match all rows.
    pub async fn find_filtered(&self, filter: &TaskFilter) -> AppResult<Vec<TaskWithClass>> {
        sqlx::query_as::<_, TaskWithClass>(&format!(
            "{TASK_WITH_CLASS} \
             WHERE ($1::uuid IS NULL OR t.class_id = $1) \
               AND ($2::boolean IS NULL OR t.completed = $2) \
               AND ($3::task_priority IS NULL OR t.priority = $3) \
               AND ($4::integer IS NULL OR t.estimated_time >= $4) \
               AND ($5::integer IS NULL OR t.estimated_time <= $5) \
               AND ($6::timestamptz IS NULL OR t.due_date >= $6) \
               AND ($7::timestamptz IS NULL OR t.due_date <= $7) \
             ORDER BY t.created_at DESC"
        ))
        .bind(filter.class_id)
        .bind(filter.completed)
        .bind(filter.priority)
        .bind(filter.min_time)
        .bind(filter.max_time)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tasks", e))
    }

    /// List every task belonging to a class, oldest first.
    pub async fn find_by_class(&self, class_id: Uuid) -> AppResult<Vec<Task>> {
        sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks WHERE class_id = $1 ORDER BY created_at ASC",
        )
        .bind(class_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list class tasks", e))
    }

    /// List every task belonging to a class inside a transactional
    /// workflow, reading from the transaction's snapshot.
    pub async fn find_by_class_with<'e>(
        &self,
        executor: impl PgExecutor<'e>,
        class_id: Uuid,
    ) -> AppResult<Vec<Task>> {
        sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks WHERE class_id = $1 ORDER BY created_at ASC",
        )
        .bind(class_id)
        .fetch_all(executor)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::OperationFailed, "Failed to list class tasks", e)
        })
    }

    /// Create a new task.
    pub async fn create(&self, data: &CreateTask) -> AppResult<Task> {
        sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (name, description, class_id, estimated_time, \
             due_date, completed, priority) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.class_id)
        .bind(data.estimated_time)
        .bind(data.due_date)
        .bind(data.completed)
        .bind(data.priority)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create task", e))
    }

    /// Partially update a task. Only supplied fields change.
    pub async fn update(&self, id: Uuid, data: &UpdateTask) -> AppResult<Task> {
        sqlx::query_as::<_, Task>(
            "UPDATE tasks SET name = COALESCE($2, name), \
             description = COALESCE($3, description), \
             class_id = COALESCE($4, class_id), \
             estimated_time = COALESCE($5, estimated_time), \
             due_date = COALESCE($6, due_date), \
             completed = COALESCE($7, completed), \
             priority = COALESCE($8, priority) \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.class_id)
        .bind(data.estimated_time)
        .bind(data.due_date)
        .bind(data.completed)
        .bind(data.priority)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update task", e))?
        .ok_or_else(|| AppError::not_found(format!("Task {id} not found")))
    }

    /// Delete one task.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete task", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Reassign every task of `from_class` to `to_class`, inside a
    /// transactional workflow. Returns the number of rows moved.
    pub async fn reassign_class_with<'e>(
        &self,
        executor: impl PgExecutor<'e>,
        from_class: Uuid,
        to_class: Uuid,
    ) -> AppResult<u64> {
        let result = sqlx::query("UPDATE tasks SET class_id = $2 WHERE class_id = $1")
            .bind(from_class)
            .bind(to_class)
            .execute(executor)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::OperationFailed, "Failed to move tasks", e)
            })?;
        Ok(result.rows_affected())
    }

    /// Mark every open task of a class completed, inside a transactional
    /// workflow. Returns the number of tasks transitioned.
    pub async fn complete_all_with<'e>(
        &self,
        executor: impl PgExecutor<'e>,
        class_id: Uuid,
    ) -> AppResult<u64> {
        let result =
            sqlx::query("UPDATE tasks SET completed = TRUE WHERE class_id = $1 AND completed = FALSE")
                .bind(class_id)
                .execute(executor)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::OperationFailed, "Failed to complete tasks", e)
                })?;
        Ok(result.rows_affected())
    }

    /// Delete every task of one class, inside a transactional workflow.
    pub async fn delete_by_class_with<'e>(
        &self,
        executor: impl PgExecutor<'e>,
        class_id: Uuid,
    ) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM tasks WHERE class_id = $1")
            .bind(class_id)
            .execute(executor)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::OperationFailed, "Failed to delete class tasks", e)
            })?;
        Ok(result.rows_affected())
    }

    /// Delete every task whose class is in `class_ids`, inside a
    /// transactional workflow.
    pub async fn delete_by_classes_with<'e>(
        &self,
        executor: impl PgExecutor<'e>,
        class_ids: &[Uuid],
    ) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM tasks WHERE class_id = ANY($1)")
            .bind(class_ids)
            .execute(executor)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::OperationFailed, "Failed to delete class tasks", e)
            })?;
        Ok(result.rows_affected())
    }

    /// Insert a batch of tasks in one multi-row statement, inside a
    /// transactional workflow. A zero-length batch issues no query.
    pub async fn insert_many_with<'e>(
        &self,
        executor: impl PgExecutor<'e>,
        tasks: &[CreateTask],
    ) -> AppResult<u64> {
        if tasks.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO tasks (name, description, class_id, estimated_time, \
             due_date, completed, priority) ",
        );
        builder.push_values(tasks, |mut row, task| {
            row.push_bind(&task.name)
                .push_bind(&task.description)
                .push_bind(task.class_id)
                .push_bind(task.estimated_time)
                .push_bind(task.due_date)
                .push_bind(task.completed)
                .push_bind(task.priority);
        });

        let result = builder.build().execute(executor).await.map_err(|e| {
            AppError::with_source(ErrorKind::OperationFailed, "Failed to insert tasks", e)
        })?;
        Ok(result.rows_affected())
    }
}
