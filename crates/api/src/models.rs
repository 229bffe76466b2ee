//! Request and response bodies.

use records_domain::StudentDraft;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/students` and `PUT /api/students/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct StudentPayload {
    pub name: String,
    pub age: i32,
    pub grade: String,
}

impl From<StudentPayload> for StudentDraft {
    fn from(payload: StudentPayload) -> Self {
        StudentDraft::new(payload.name, payload.age, payload.grade)
    }
}

/// Generic success envelope for operations with nothing else to return.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Query string of `GET /api/students/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Server version string when reachable.
    pub database: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_deserializes_and_converts() {
        let payload: StudentPayload =
            serde_json::from_str(r#"{"name":"Alice","age":15,"grade":"10A"}"#).unwrap();
        let draft: StudentDraft = payload.into();
        assert_eq!(draft.name, "Alice");
        assert_eq!(draft.age, 15);
        assert_eq!(draft.grade, "10A");
    }

    #[test]
    fn test_payload_rejects_missing_fields() {
        assert!(serde_json::from_str::<StudentPayload>(r#"{"name":"Alice","age":15}"#).is_err());
        assert!(serde_json::from_str::<StudentPayload>(r#"{"age":15,"grade":"10A"}"#).is_err());
    }

    #[test]
    fn test_payload_rejects_non_integer_age() {
        assert!(
            serde_json::from_str::<StudentPayload>(r#"{"name":"A","age":"old","grade":"g"}"#)
                .is_err()
        );
    }

    #[test]
    fn test_message_response_shape() {
        let body = serde_json::to_value(MessageResponse::ok("Student deleted successfully")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"success": true, "message": "Student deleted successfully"})
        );
    }
}
