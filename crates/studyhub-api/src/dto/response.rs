//! Response DTOs.
//!
//! Entities serialize directly as response bodies; the types here cover
//! confirmation messages and the bulk-operation outcomes, which all
//! carry the `transactional` atomicity marker.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Cascade delete confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteClassResponse {
    /// Confirmation message.
    pub message: String,
    /// Tasks deleted alongside the class.
    pub tasks_deleted: u64,
    /// Atomicity marker: always true.
    pub transactional: bool,
}

/// Move-tasks outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTasksResponse {
    /// Confirmation message.
    pub message: String,
    /// Tasks reassigned.
    pub moved_count: u64,
    /// Source class name.
    pub from_class: String,
    /// Destination class name.
    pub to_class: String,
    /// Atomicity marker: always true.
    pub transactional: bool,
}

/// Bulk delete-classes outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteClassesResponse {
    /// Confirmation message.
    pub message: String,
    /// Classes actually deleted.
    pub classes_deleted: u64,
    /// Tasks deleted across those classes.
    pub tasks_deleted: u64,
    /// Atomicity marker: always true.
    pub transactional: bool,
}

/// Complete-all-tasks outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteAllTasksResponse {
    /// Confirmation message.
    pub message: String,
    /// The class name.
    pub class_name: String,
    /// Tasks transitioned to completed.
    pub tasks_completed: u64,
    /// Atomicity marker: always true.
    pub transactional: bool,
}

/// Duplicate-class outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateClassResponse {
    /// Confirmation message.
    pub message: String,
    /// The new class's ID.
    pub new_class_id: Uuid,
    /// The new class's name.
    pub new_class_name: String,
    /// Task copies created.
    pub tasks_copied: u64,
    /// Atomicity marker: always true.
    pub transactional: bool,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Database connectivity: `"connected"` or `"unavailable"`.
    pub database: String,
    /// Whether a transactional unit of work can currently be acquired.
    pub transactions_supported: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bulk_responses_serialize_camel_case() {
        let response = MoveTasksResponse {
            message: "Successfully moved 3 tasks".to_string(),
            moved_count: 3,
            from_class: "Math 101".to_string(),
            to_class: "Math 102".to_string(),
            transactional: true,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["movedCount"], 3);
        assert_eq!(json["fromClass"], "Math 101");
        assert_eq!(json["transactional"], true);

        let response = DuplicateClassResponse {
            message: "Class duplicated successfully".to_string(),
            new_class_id: Uuid::nil(),
            new_class_name: "Math 101 (Copy)".to_string(),
            tasks_copied: 2,
            transactional: true,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["newClassName"], "Math 101 (Copy)");
        assert_eq!(json["tasksCopied"], 2);
    }
}
