//! # studyhub-database
//!
//! PostgreSQL connection management, the transactional unit-of-work
//! executor, and concrete repository implementations for the StudyHub
//! entities.

pub mod connection;
pub mod repositories;
pub mod transaction;

pub use connection::DatabasePool;
pub use transaction::TransactionExecutor;
