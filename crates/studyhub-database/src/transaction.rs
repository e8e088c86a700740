//! Transactional unit-of-work executor.
//!
//! Multi-document mutations that span both collections (or several rows
//! of one) run through [`TransactionExecutor::run`], which guarantees
//! all-or-nothing semantics: either every operation issued through the
//! transaction takes effect durably, or none do.

use futures::future::BoxFuture;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, warn};

use studyhub_core::error::AppError;
use studyhub_core::result::AppResult;

/// SQLSTATE codes PostgreSQL raises when a transaction loses a conflict
/// with a concurrent one: serialization_failure and deadlock_detected.
const CONFLICT_SQLSTATES: [&str; 2] = ["40001", "40P01"];

/// Runs caller-supplied workflows inside a single database transaction
/// with a fixed isolation policy.
///
/// Reads inside the workflow observe a consistent snapshot (PostgreSQL
/// `REPEATABLE READ`); a committed transaction is durable once the WAL
/// record is flushed. There is no automatic retry: a conflict surfaces
/// to the caller as [`studyhub_core::error::ErrorKind::CommitFailed`].
#[derive(Debug, Clone)]
pub struct TransactionExecutor {
    pool: PgPool,
}

impl TransactionExecutor {
    /// Create a new executor over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Execute `workflow` within a single transaction.
    ///
    /// 1. Acquires a unit-of-work from the pool (`SessionUnavailable` on
    ///    failure).
    /// 2. Pins the isolation level to `REPEATABLE READ` (snapshot
    ///    isolation). The policy is fixed and not caller-configurable.
    /// 3. Invokes the workflow with the live transaction handle.
    /// 4. On success, commits; a commit rejection surfaces as
    ///    `CommitFailed` and means full rollback.
    /// 5. On any workflow error, rolls back and re-raises the original
    ///    error unchanged.
    ///
    /// The handle is consumed on every exit path, so the underlying
    /// connection always returns to the pool.
    pub async fn run<T, F>(&self, workflow: F) -> AppResult<T>
    where
        T: Send,
        F: for<'t> FnOnce(&'t mut Transaction<'static, Postgres>) -> BoxFuture<'t, AppResult<T>>
            + Send,
    {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(
                studyhub_core::error::ErrorKind::SessionUnavailable,
                format!("Could not start a transaction: {e}"),
                e,
            )
        })?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(
                    studyhub_core::error::ErrorKind::OperationFailed,
                    format!("Could not set transaction isolation level: {e}"),
                    e,
                )
            })?;

        match workflow(&mut tx).await {
            Ok(value) => {
                tx.commit().await.map_err(|e| {
                    let message = if is_conflict(&e) {
                        format!("Transaction lost a write conflict at commit: {e}")
                    } else {
                        format!("Transaction commit failed: {e}")
                    };
                    AppError::with_source(
                        studyhub_core::error::ErrorKind::CommitFailed,
                        message,
                        e,
                    )
                })?;
                debug!("Transaction committed");
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "Transaction rollback failed");
                }
                debug!(error = %err, "Transaction aborted");
                Err(err)
            }
        }
    }

    /// Reports whether a transactional unit of work can be acquired
    /// right now.
    ///
    /// Acquires and immediately releases one pooled connection. Purely
    /// diagnostic: a workflow may still fail with `SessionUnavailable`
    /// if the deployment changes between this check and the call.
    pub async fn transactions_supported(&self) -> bool {
        match self.pool.acquire().await {
            Ok(conn) => {
                drop(conn);
                true
            }
            Err(e) => {
                warn!(error = %e, "Transactions not supported: could not acquire a connection");
                false
            }
        }
    }
}

/// Whether a sqlx error is a concurrency conflict raised by PostgreSQL.
fn is_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .code()
            .is_some_and(|code| CONFLICT_SQLSTATES.contains(&code.as_ref())),
        _ => false,
    }
}
