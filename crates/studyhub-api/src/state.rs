//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use studyhub_core::config::AppConfig;
use studyhub_database::connection::DatabasePool;
use studyhub_database::transaction::TransactionExecutor;
use studyhub_service::bulk::BulkService;
use studyhub_service::class::ClassService;
use studyhub_service::task::TaskService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool wrapper.
    pub db: DatabasePool,
    /// Transaction executor (exposed for the health endpoint).
    pub executor: Arc<TransactionExecutor>,
    /// Class CRUD and cascade delete.
    pub class_service: Arc<ClassService>,
    /// Task CRUD and filtered listing.
    pub task_service: Arc<TaskService>,
    /// Transactional bulk workflows.
    pub bulk_service: Arc<BulkService>,
}
