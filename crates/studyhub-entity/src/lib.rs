//! # studyhub-entity
//!
//! Domain entity models for StudyHub: classes, tasks, and the task list
//! filter. Entities are plain `sqlx::FromRow` structs; all cross-entity
//! integrity (a task's `class_id` referencing a live class) is enforced
//! by the service layer, not the database.

pub mod class;
pub mod filter;
pub mod priority;
pub mod task;

pub use class::{Class, CreateClass, UpdateClass};
pub use filter::TaskFilter;
pub use priority::Priority;
pub use task::{CreateTask, Task, TaskWithClass, UpdateTask};
