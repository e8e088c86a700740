//! Task entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::priority::Priority;

/// A unit of work scoped to exactly one class.
///
/// `class_id` carries no foreign-key constraint at the storage layer; the
/// service layer keeps it pointing at a live class.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task identifier.
    pub id: Uuid,
    /// Task name.
    pub name: String,
    /// Free-form description (empty by default).
    pub description: String,
    /// The class this task belongs to.
    pub class_id: Uuid,
    /// Estimated effort in minutes. Never negative.
    pub estimated_time: i32,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Whether the task is done.
    pub completed: bool,
    /// Task priority.
    pub priority: Priority,
    /// When the task was created. Set once, never updated.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Whether the task is past its due date and still open.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < now)
    }
}

/// A task row joined with the name of its owning class.
///
/// The list and detail endpoints resolve the class reference, projecting
/// only the name field.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TaskWithClass {
    /// Unique task identifier.
    pub id: Uuid,
    /// Task name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// The class this task belongs to.
    pub class_id: Uuid,
    /// Estimated effort in minutes.
    pub estimated_time: i32,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Whether the task is done.
    pub completed: bool,
    /// Task priority.
    pub priority: Priority,
    /// When the task was created.
    pub created_at: DateTime<Utc>,
    /// Name of the owning class. `None` if the class no longer exists
    /// (an orphan that should not occur after successful cascades).
    pub class_name: Option<String>,
}

/// Data required to create a new task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Task name.
    pub name: String,
    /// Description.
    pub description: String,
    /// The owning class.
    pub class_id: Uuid,
    /// Estimated effort in minutes.
    pub estimated_time: i32,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Initial completion state.
    pub completed: bool,
    /// Priority.
    pub priority: Priority,
}

impl CreateTask {
    /// A copy of an existing task under a different class, with the
    /// completion state reset. Used by the duplicate-class workflow.
    pub fn copy_of(task: &Task, class_id: Uuid) -> Self {
        Self {
            name: task.name.clone(),
            description: task.description.clone(),
            class_id,
            estimated_time: task.estimated_time,
            due_date: task.due_date,
            completed: false,
            priority: task.priority,
        }
    }
}

/// Partial update payload for a task. Only supplied fields change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    /// New name, if changing.
    pub name: Option<String>,
    /// New description, if changing.
    pub description: Option<String>,
    /// Reassign the task to another class.
    pub class_id: Option<Uuid>,
    /// New time estimate in minutes.
    pub estimated_time: Option<i32>,
    /// New due date.
    pub due_date: Option<DateTime<Utc>>,
    /// New completion state.
    pub completed: Option<bool>,
    /// New priority.
    pub priority: Option<Priority>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_task() -> Task {
        Task {
            id: Uuid::new_v4(),
            name: "HW1".to_string(),
            description: "Chapter 3 problems".to_string(),
            class_id: Uuid::new_v4(),
            estimated_time: 90,
            due_date: None,
            completed: false,
            priority: Priority::High,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn overdue_requires_past_due_date_and_open_state() {
        let now = Utc::now();
        let mut task = sample_task();
        assert!(!task.is_overdue(now));

        task.due_date = Some(now - Duration::hours(1));
        assert!(task.is_overdue(now));

        task.completed = true;
        assert!(!task.is_overdue(now));
    }

    #[test]
    fn copy_resets_completion_and_retargets_class() {
        let mut task = sample_task();
        task.completed = true;
        let new_class = Uuid::new_v4();

        let copy = CreateTask::copy_of(&task, new_class);
        assert_eq!(copy.name, task.name);
        assert_eq!(copy.description, task.description);
        assert_eq!(copy.class_id, new_class);
        assert_eq!(copy.estimated_time, task.estimated_time);
        assert_eq!(copy.priority, task.priority);
        assert!(!copy.completed);
    }

    #[test]
    fn task_serializes_camel_case() {
        let json = serde_json::to_value(sample_task()).unwrap();
        assert!(json.get("classId").is_some());
        assert!(json.get("estimatedTime").is_some());
        assert!(json.get("dueDate").is_some());
        assert!(json.get("class_id").is_none());
    }
}
