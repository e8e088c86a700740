//! Request DTOs with validation.
//!
//! All string-typed identifiers arrive as raw strings, are sanitized,
//! and only then parsed, so stripped characters can never reach a query.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use studyhub_core::error::AppError;
use studyhub_core::result::AppResult;
use studyhub_entity::filter::TaskFilter;
use studyhub_entity::priority::Priority;

use crate::sanitize::sanitize_string;

/// Sanitize then parse a UUID field.
pub fn parse_id(field: &str, raw: &str) -> AppResult<Uuid> {
    let cleaned = sanitize_string(raw);
    Uuid::parse_str(&cleaned).map_err(|_| AppError::validation(format!("Invalid {field}")))
}

/// Create class request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassRequest {
    /// Class name.
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Owning user. Defaults to the nil UUID when omitted.
    pub user_id: Option<String>,
}

/// Update class request body. Only supplied fields change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClassRequest {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
}

/// Create task request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Task name.
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Owning class.
    #[validate(length(min = 1, message = "classId is required"))]
    pub class_id: String,
    /// Estimated effort in minutes.
    pub estimated_time: Option<i32>,
    /// Due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Initial completion state.
    pub completed: Option<bool>,
    /// Priority: low, medium, or high.
    pub priority: Option<String>,
}

/// Update task request body. Only supplied fields change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// Reassign to another class.
    pub class_id: Option<String>,
    /// New time estimate.
    pub estimated_time: Option<i32>,
    /// New due date.
    pub due_date: Option<DateTime<Utc>>,
    /// New completion state.
    pub completed: Option<bool>,
    /// New priority.
    pub priority: Option<String>,
}

/// Query parameters for the task list endpoint. Everything arrives as a
/// string and is parsed into a [`TaskFilter`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListQuery {
    /// Filter by owning class.
    pub class_id: Option<String>,
    /// Filter by completion state: `"true"` or `"false"`.
    pub completed: Option<String>,
    /// Filter by priority.
    pub priority: Option<String>,
    /// Minimum estimated time in minutes.
    pub min_time: Option<String>,
    /// Maximum estimated time in minutes.
    pub max_time: Option<String>,
    /// Earliest due date (inclusive).
    pub start_date: Option<String>,
    /// Latest due date (inclusive).
    pub end_date: Option<String>,
}

impl TaskListQuery {
    /// Parse the raw query parameters into a typed filter. Any malformed
    /// value is a validation error.
    pub fn into_filter(self) -> AppResult<TaskFilter> {
        let mut filter = TaskFilter::default();

        if let Some(raw) = &self.class_id {
            filter.class_id = Some(parse_id("classId", raw)?);
        }
        if let Some(raw) = &self.completed {
            filter.completed = Some(match raw.as_str() {
                "true" => true,
                "false" => false,
                _ => {
                    return Err(AppError::validation(
                        "completed must be 'true' or 'false'",
                    ));
                }
            });
        }
        if let Some(raw) = &self.priority {
            filter.priority = Some(sanitize_string(raw).parse::<Priority>()?);
        }
        if let Some(raw) = &self.min_time {
            filter.min_time = Some(parse_minutes("minTime", raw)?);
        }
        if let Some(raw) = &self.max_time {
            filter.max_time = Some(parse_minutes("maxTime", raw)?);
        }
        if let Some(raw) = &self.start_date {
            filter.start_date = Some(parse_date("startDate", raw)?);
        }
        if let Some(raw) = &self.end_date {
            filter.end_date = Some(parse_date("endDate", raw)?);
        }

        Ok(filter)
    }
}

/// Move-tasks request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTasksRequest {
    /// Source class.
    pub from_class_id: String,
    /// Destination class.
    pub to_class_id: String,
}

/// Bulk delete-classes request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteClassesRequest {
    /// Classes to delete, each with all their tasks.
    pub class_ids: Vec<String>,
}

/// Complete-all-tasks request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteAllTasksRequest {
    /// The class whose open tasks should be completed.
    pub class_id: String,
}

/// Duplicate-class request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateClassRequest {
    /// The class to duplicate.
    pub class_id: String,
    /// Name for the copy. Defaults to `"<original> (Copy)"`.
    pub new_class_name: Option<String>,
}

/// Parse a minutes field, rejecting negatives.
fn parse_minutes(field: &str, raw: &str) -> AppResult<i32> {
    let minutes: i32 = raw
        .parse()
        .map_err(|_| AppError::validation(format!("{field} must be an integer")))?;
    if minutes < 0 {
        return Err(AppError::validation(format!("{field} cannot be negative")));
    }
    Ok(minutes)
}

/// Parse a date query value: RFC 3339, or a bare `YYYY-MM-DD` taken as
/// midnight UTC.
fn parse_date(field: &str, raw: &str) -> AppResult<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    if let Some(midnight) = raw
        .parse::<NaiveDate>()
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }
    Err(AppError::validation(format!("Invalid {field}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_strips_injection_characters_first() {
        // A smuggled operator never reaches the parser as-is.
        assert!(parse_id("classId", "{$ne: null}").is_err());

        let id = Uuid::new_v4();
        assert_eq!(parse_id("classId", &id.to_string()).unwrap(), id);
    }

    #[test]
    fn filter_parses_all_fields() {
        let class_id = Uuid::new_v4();
        let query = TaskListQuery {
            class_id: Some(class_id.to_string()),
            completed: Some("false".to_string()),
            priority: Some("high".to_string()),
            min_time: Some("30".to_string()),
            max_time: Some("120".to_string()),
            start_date: Some("2026-01-01".to_string()),
            end_date: Some("2026-06-30T23:59:59Z".to_string()),
        };

        let filter = query.into_filter().unwrap();
        assert_eq!(filter.class_id, Some(class_id));
        assert_eq!(filter.completed, Some(false));
        assert_eq!(filter.priority, Some(Priority::High));
        assert_eq!(filter.min_time, Some(30));
        assert_eq!(filter.max_time, Some(120));
        assert!(filter.start_date.is_some());
        assert!(filter.end_date.is_some());
    }

    #[test]
    fn empty_query_is_match_all() {
        let filter = TaskListQuery::default().into_filter().unwrap();
        assert!(filter.class_id.is_none());
        assert!(filter.completed.is_none());
        assert!(filter.priority.is_none());
    }

    #[test]
    fn malformed_values_are_validation_errors() {
        let bad_time = TaskListQuery {
            min_time: Some("soon".to_string()),
            ..Default::default()
        };
        assert!(bad_time.into_filter().is_err());

        let negative_time = TaskListQuery {
            max_time: Some("-5".to_string()),
            ..Default::default()
        };
        assert!(negative_time.into_filter().is_err());

        let bad_completed = TaskListQuery {
            completed: Some("yes".to_string()),
            ..Default::default()
        };
        assert!(bad_completed.into_filter().is_err());

        let bad_priority = TaskListQuery {
            priority: Some("urgent".to_string()),
            ..Default::default()
        };
        assert!(bad_priority.into_filter().is_err());

        let bad_date = TaskListQuery {
            start_date: Some("next tuesday".to_string()),
            ..Default::default()
        };
        assert!(bad_date.into_filter().is_err());
    }

    #[test]
    fn bare_date_is_midnight_utc() {
        let parsed = parse_date("startDate", "2026-03-15").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-03-15T00:00:00+00:00");
    }
}
