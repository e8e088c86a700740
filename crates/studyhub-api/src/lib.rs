//! # studyhub-api
//!
//! HTTP API layer for StudyHub built on Axum.
//!
//! Provides all REST endpoints, middleware (CORS, logging), DTOs, input
//! sanitization, and error mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod sanitize;
pub mod state;

pub use router::build_router;
pub use state::AppState;
