//! # studyhub-service
//!
//! Business logic service layer for StudyHub. Each service orchestrates
//! repositories and the transaction executor to implement
//! application-level use cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod bulk;
pub mod class;
pub mod task;

pub use bulk::BulkService;
pub use class::ClassService;
pub use task::TaskService;
