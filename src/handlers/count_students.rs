use std::sync::Arc;

use super::NoInput;
use crate::error::RosterError;
use crate::store::RosterStore;
use crate::typed::{Handler, TypedHandlerRequest};

/// `GET /devops-count`: number of records as a bare JSON integer.
pub struct CountStudentsController {
    pub store: Arc<dyn RosterStore>,
}

impl Handler for CountStudentsController {
    type Request = NoInput;
    type Response = usize;

    fn handle(&self, _req: TypedHandlerRequest<NoInput>) -> Result<usize, RosterError> {
        Ok(self.store.count())
    }
}
