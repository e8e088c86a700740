//! Task list filter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::priority::Priority;

/// Optional predicates for listing tasks. Every field is independent;
/// unset fields match everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskFilter {
    /// Only tasks belonging to this class.
    pub class_id: Option<Uuid>,
    /// Only tasks with this completion state.
    pub completed: Option<bool>,
    /// Only tasks with this priority.
    pub priority: Option<Priority>,
    /// Only tasks estimated at no less than this many minutes.
    pub min_time: Option<i32>,
    /// Only tasks estimated at no more than this many minutes.
    pub max_time: Option<i32>,
    /// Only tasks due on or after this instant.
    pub start_date: Option<DateTime<Utc>>,
    /// Only tasks due on or before this instant.
    pub end_date: Option<DateTime<Utc>>,
}
