//! Roster handlers, one module per route.
//!
//! | Handler | Route |
//! |---|---|
//! | [`list_students`] | `GET /devops` |
//! | [`count_students`] | `GET /devops-count` |
//! | [`add_student`] | `POST /students` |
//! | [`get_student`] | `GET /students/{id}` |

pub mod add_student;
pub mod count_students;
pub mod get_student;
pub mod list_students;

use crate::dispatcher::HandlerRequest;
use crate::error::RosterError;

/// Request type for handlers that read nothing from the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoInput;

impl TryFrom<HandlerRequest> for NoInput {
    type Error = RosterError;

    fn try_from(_req: HandlerRequest) -> Result<Self, Self::Error> {
        Ok(NoInput)
    }
}
