//! HTTP request handlers, organized by domain.

pub mod bulk;
pub mod class;
pub mod health;
pub mod task;
