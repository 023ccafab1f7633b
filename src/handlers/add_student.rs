use std::sync::Arc;

use crate::dispatcher::HandlerRequest;
use crate::error::RosterError;
use crate::model::StudentRecord;
use crate::store::RosterStore;
use crate::typed::{Handler, TypedHandlerRequest};

/// Validated body of `POST /students`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddStudentRequest {
    pub record: StudentRecord,
}

impl TryFrom<HandlerRequest> for AddStudentRequest {
    type Error = RosterError;

    fn try_from(req: HandlerRequest) -> Result<Self, Self::Error> {
        let body = req
            .body
            .ok_or_else(|| RosterError::invalid("request body required"))?;
        Ok(Self {
            record: StudentRecord::from_json(body)?,
        })
    }
}

/// `POST /students`: append a record, answer 201 with it.
pub struct AddStudentController {
    pub store: Arc<dyn RosterStore>,
}

impl Handler for AddStudentController {
    type Request = AddStudentRequest;
    type Response = StudentRecord;

    const STATUS: u16 = 201;

    fn handle(
        &self,
        req: TypedHandlerRequest<AddStudentRequest>,
    ) -> Result<StudentRecord, RosterError> {
        self.store.insert(req.data.record)
    }
}
