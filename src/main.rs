//! StudyHub Server — class and task management with transactional bulk
//! operations.
//!
//! Main entry point that wires all crates together and starts the server.

use std::future::IntoFuture;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use studyhub_core::config::AppConfig;
use studyhub_core::error::AppError;
use studyhub_database::repositories::{ClassRepository, TaskRepository};
use studyhub_database::{DatabasePool, TransactionExecutor};
use studyhub_service::bulk::BulkService;
use studyhub_service::class::ClassService;
use studyhub_service::task::TaskService;

#[tokio::main]
async fn main() {
    let env = std::env::var("STUDYHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting StudyHub v{}", env!("CARGO_PKG_VERSION"));

    // Database connection + migrations
    let db = DatabasePool::connect(&config.database).await?;
    db.run_migrations().await?;

    // Repositories
    let class_repo = Arc::new(ClassRepository::new(db.pool().clone()));
    let task_repo = Arc::new(TaskRepository::new(db.pool().clone()));

    // Transaction executor
    let executor = Arc::new(TransactionExecutor::new(db.pool().clone()));

    // Services
    let class_service = Arc::new(ClassService::new(
        Arc::clone(&class_repo),
        Arc::clone(&task_repo),
        Arc::clone(&executor),
    ));
    let task_service = Arc::new(TaskService::new(
        Arc::clone(&task_repo),
        Arc::clone(&class_repo),
    ));
    let bulk_service = Arc::new(BulkService::new(
        Arc::clone(&class_repo),
        Arc::clone(&task_repo),
        Arc::clone(&executor),
    ));

    let app_state = studyhub_api::AppState {
        config: Arc::new(config.clone()),
        db: db.clone(),
        executor,
        class_service,
        task_service,
        bulk_service,
    };

    let app = studyhub_api::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("StudyHub server listening on {addr}");

    // In-flight requests get shutdown_grace_seconds to finish once the
    // signal lands; after that the server is dropped.
    let grace = std::time::Duration::from_secs(config.server.shutdown_grace_seconds);
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
            let _ = shutdown_tx.send(());
        })
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
        }
        _ = async {
            let _ = shutdown_rx.await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!(
                grace_seconds = config.server.shutdown_grace_seconds,
                "Grace period elapsed, aborting in-flight requests"
            );
        }
    }

    db.close().await;
    tracing::info!("StudyHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
