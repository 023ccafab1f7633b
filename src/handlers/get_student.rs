use std::sync::Arc;

use crate::dispatcher::HandlerRequest;
use crate::error::RosterError;
use crate::model::StudentRecord;
use crate::store::RosterStore;
use crate::typed::{Handler, TypedHandlerRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetStudentRequest {
    pub class_id: i64,
}

impl TryFrom<HandlerRequest> for GetStudentRequest {
    type Error = RosterError;

    fn try_from(req: HandlerRequest) -> Result<Self, Self::Error> {
        let raw = req
            .get_path_param("id")
            .ok_or_else(|| RosterError::invalid("missing path parameter 'id'"))?;
        let class_id = raw
            .parse::<i64>()
            .map_err(|_| RosterError::invalid(format!("id must be an integer, got '{raw}'")))?;
        Ok(Self { class_id })
    }
}

/// `GET /students/{id}`: first record with the given class id, or 404.
pub struct GetStudentController {
    pub store: Arc<dyn RosterStore>,
}

impl Handler for GetStudentController {
    type Request = GetStudentRequest;
    type Response = StudentRecord;

    fn handle(
        &self,
        req: TypedHandlerRequest<GetStudentRequest>,
    ) -> Result<StudentRecord, RosterError> {
        self.store.find(req.data.class_id)
    }
}
