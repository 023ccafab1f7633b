use std::sync::Arc;

use super::NoInput;
use crate::error::RosterError;
use crate::model::StudentRecord;
use crate::store::RosterStore;
use crate::typed::{Handler, TypedHandlerRequest};

/// `GET /devops`: the whole roster in insertion order.
pub struct ListStudentsController {
    pub store: Arc<dyn RosterStore>,
}

impl Handler for ListStudentsController {
    type Request = NoInput;
    type Response = Vec<StudentRecord>;

    fn handle(&self, _req: TypedHandlerRequest<NoInput>) -> Result<Vec<StudentRecord>, RosterError> {
        Ok(self.store.list())
    }
}
