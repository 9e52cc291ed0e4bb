use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Completion state of a task.
/// Corresponds to the `task_status` SQL enum; the labels are stored and
/// serialized verbatim.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status")]
pub enum TaskStatus {
    Incomplete,
    Complete,
}

impl TaskStatus {
    /// The other of the two states.
    pub fn toggled(self) -> TaskStatus {
        match self {
            TaskStatus::Incomplete => TaskStatus::Complete,
            TaskStatus::Complete => TaskStatus::Incomplete,
        }
    }
}

/// A task row, owned by exactly one user.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier (UUID v4), assigned at creation.
    pub id: Uuid,
    /// Owning user. Immutable after creation; every query is scoped by it.
    pub user_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a task. The title is trimmed and validated by the
/// task registry; status always starts as `Incomplete`.
#[derive(Debug, Deserialize)]
pub struct TaskCreate {
    pub title: String,
    pub description: Option<String>,
}

/// Payload for a partial update. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_toggles_between_the_two_states() {
        assert_eq!(TaskStatus::Incomplete.toggled(), TaskStatus::Complete);
        assert_eq!(TaskStatus::Complete.toggled(), TaskStatus::Incomplete);
        assert_eq!(
            TaskStatus::Incomplete.toggled().toggled(),
            TaskStatus::Incomplete
        );
    }

    #[test]
    fn test_status_serializes_verbatim() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::Incomplete).unwrap(),
            "\"Incomplete\""
        );
        assert_eq!(
            serde_json::to_string(&TaskStatus::Complete).unwrap(),
            "\"Complete\""
        );

        let status: TaskStatus = serde_json::from_str("\"Complete\"").unwrap();
        assert_eq!(status, TaskStatus::Complete);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert!(serde_json::from_str::<TaskStatus>("\"Done\"").is_err());
        assert!(serde_json::from_str::<TaskStatus>("\"complete\"").is_err());
    }

    #[test]
    fn test_empty_update_payload_leaves_all_fields_unset() {
        let update: TaskUpdate = serde_json::from_str("{}").unwrap();
        assert!(update.title.is_none());
        assert!(update.description.is_none());
        assert!(update.status.is_none());
    }
}
