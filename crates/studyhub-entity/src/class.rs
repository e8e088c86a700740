//! Class entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A class grouping tasks, e.g. a course a student is enrolled in.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    /// Unique class identifier.
    pub id: Uuid,
    /// Class name.
    pub name: String,
    /// Free-form description (empty by default).
    pub description: String,
    /// The owning user. Opaque reference; no user table exists in this
    /// service.
    pub user_id: Uuid,
    /// When the class was created. Set once, never updated.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClass {
    /// Class name.
    pub name: String,
    /// Description.
    pub description: String,
    /// The owning user.
    pub user_id: Uuid,
}

/// Partial update payload for a class. Only supplied fields change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateClass {
    /// New name, if changing.
    pub name: Option<String>,
    /// New description, if changing.
    pub description: Option<String>,
}

impl UpdateClass {
    /// Whether the update carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_serializes_camel_case() {
        let class = Class {
            id: Uuid::nil(),
            name: "Math 101".to_string(),
            description: String::new(),
            user_id: Uuid::nil(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&class).unwrap();
        assert!(json.get("userId").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn empty_update_detected() {
        assert!(UpdateClass::default().is_empty());
        assert!(
            !UpdateClass {
                name: Some("x".to_string()),
                description: None,
            }
            .is_empty()
        );
    }
}
