//! Route definitions for the StudyHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(class_routes())
        .merge(task_routes())
        .merge(bulk_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Class CRUD with cascade delete
fn class_routes() -> Router<AppState> {
    Router::new()
        .route("/classes", get(handlers::class::list_classes))
        .route("/classes", post(handlers::class::create_class))
        .route("/classes/{id}", get(handlers::class::get_class))
        .route("/classes/{id}", put(handlers::class::update_class))
        .route("/classes/{id}", delete(handlers::class::delete_class))
}

/// Task CRUD and filtered listing
fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(handlers::task::list_tasks))
        .route("/tasks", post(handlers::task::create_task))
        .route("/tasks/{id}", get(handlers::task::get_task))
        .route("/tasks/{id}", put(handlers::task::update_task))
        .route("/tasks/{id}", delete(handlers::task::delete_task))
}

/// Transactional bulk operations
fn bulk_routes() -> Router<AppState> {
    Router::new()
        .route("/bulk/move-tasks", post(handlers::bulk::move_tasks))
        .route("/bulk/delete-classes", post(handlers::bulk::delete_classes))
        .route(
            "/bulk/complete-all-tasks",
            post(handlers::bulk::complete_all_tasks),
        )
        .route(
            "/bulk/duplicate-class",
            post(handlers::bulk::duplicate_class),
        )
}

/// Health check endpoint
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}
