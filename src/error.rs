use std::fmt;

use serde_json::json;

use crate::dispatcher::HandlerResponse;

/// Errors surfaced by roster operations.
///
/// Every variant maps to an HTTP status and a JSON error body through
/// [`RosterError::status`] and [`RosterError::to_response`]; handlers return
/// them and the typed handler wrapper renders them at the request boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// No record carries the requested class id
    NotFound {
        /// The id that was looked up
        class_id: i64,
    },
    /// The request could not be turned into a valid [`StudentRecord`](crate::model::StudentRecord)
    /// or path parameter
    InvalidInput {
        /// Human readable reason
        message: String,
    },
    /// A record with this class id already exists
    DuplicateId {
        /// The conflicting id
        class_id: i64,
    },
}

impl RosterError {
    pub fn invalid(message: impl Into<String>) -> Self {
        RosterError::InvalidInput {
            message: message.into(),
        }
    }

    /// HTTP status code for this error.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            RosterError::NotFound { .. } => 404,
            RosterError::InvalidInput { .. } => 400,
            RosterError::DuplicateId { .. } => 409,
        }
    }

    /// Render as a JSON handler response.
    #[must_use]
    pub fn to_response(&self) -> HandlerResponse {
        let body = match self {
            RosterError::NotFound { class_id } => {
                json!({ "error": "Student not found", "classId": class_id })
            }
            RosterError::InvalidInput { message } => {
                json!({ "error": "Invalid input", "message": message })
            }
            RosterError::DuplicateId { class_id } => {
                json!({ "error": "Duplicate classId", "classId": class_id })
            }
        };
        HandlerResponse::json(self.status(), body)
    }
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::NotFound { class_id } => {
                write!(f, "no student with classId {class_id}")
            }
            RosterError::InvalidInput { message } => write!(f, "invalid input: {message}"),
            RosterError::DuplicateId { class_id } => {
                write!(f, "a student with classId {class_id} already exists")
            }
        }
    }
}

impl std::error::Error for RosterError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(RosterError::NotFound { class_id: 9 }.status(), 404);
        assert_eq!(RosterError::invalid("x").status(), 400);
        assert_eq!(RosterError::DuplicateId { class_id: 1 }.status(), 409);
    }

    #[test]
    fn test_not_found_body_names_the_id() {
        let resp = RosterError::NotFound { class_id: 999 }.to_response();
        assert_eq!(resp.status, 404);
        assert_eq!(resp.body["classId"], 999);
        assert_eq!(resp.body["error"], "Student not found");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            RosterError::DuplicateId { class_id: 3 }.to_string(),
            "a student with classId 3 already exists"
        );
    }
}
