//! Repository implementations for the StudyHub entities.
//!
//! Reads and single-row CRUD run against the pool directly. Operations
//! that participate in a transactional workflow take an
//! `impl sqlx::PgExecutor` so the same method serves both the pool and
//! a live transaction.

pub mod class;
pub mod task;

pub use class::ClassRepository;
pub use task::TaskRepository;
