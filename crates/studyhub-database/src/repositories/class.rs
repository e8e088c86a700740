//! Class repository implementation.

use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use studyhub_core::error::{AppError, ErrorKind};
use studyhub_core::result::AppResult;
use studyhub_entity::class::{Class, CreateClass, UpdateClass};

/// Repository for class CRUD.
#[derive(Debug, Clone)]
pub struct ClassRepository {
    pool: PgPool,
}

impl ClassRepository {
    /// Create a new class repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all classes, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<Class>> {
        sqlx::query_as::<_, Class>("SELECT * FROM classes ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list classes", e))
    }

    /// Find a class by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Class>> {
        sqlx::query_as::<_, Class>("SELECT * FROM classes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find class", e))
    }

    /// Find a class by ID inside a transactional workflow.
    pub async fn find_by_id_with<'e>(
        &self,
        executor: impl PgExecutor<'e>,
        id: Uuid,
    ) -> AppResult<Option<Class>> {
        sqlx::query_as::<_, Class>("SELECT * FROM classes WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::OperationFailed, "Failed to find class", e)
            })
    }

    /// Create a new class.
    pub async fn create(&self, data: &CreateClass) -> AppResult<Class> {
        sqlx::query_as::<_, Class>(
            "INSERT INTO classes (name, description, user_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create class", e))
    }

    /// Insert a class inside a transactional workflow.
    pub async fn insert_with<'e>(
        &self,
        executor: impl PgExecutor<'e>,
        data: &CreateClass,
    ) -> AppResult<Class> {
        sqlx::query_as::<_, Class>(
            "INSERT INTO classes (name, description, user_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.user_id)
        .fetch_one(executor)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::OperationFailed, "Failed to insert class", e))
    }

    /// Partially update a class. Only supplied fields change.
    pub async fn update(&self, id: Uuid, data: &UpdateClass) -> AppResult<Class> {
        sqlx::query_as::<_, Class>(
            "UPDATE classes SET name = COALESCE($2, name), \
             description = COALESCE($3, description) WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update class", e))?
        .ok_or_else(|| AppError::not_found(format!("Class {id} not found")))
    }

    /// Delete one class inside a transactional workflow.
    pub async fn delete_with<'e>(&self, executor: impl PgExecutor<'e>, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM classes WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::OperationFailed, "Failed to delete class", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every class whose id is in `ids`, inside a transactional
    /// workflow. Missing ids are tolerated; the count reflects actual
    /// matches.
    pub async fn delete_many_with<'e>(
        &self,
        executor: impl PgExecutor<'e>,
        ids: &[Uuid],
    ) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM classes WHERE id = ANY($1)")
            .bind(ids)
            .execute(executor)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::OperationFailed, "Failed to delete classes", e)
            })?;
        Ok(result.rows_affected())
    }
}
