//! # Typed Module
//!
//! Type-safe handlers on top of the raw dispatcher.
//!
//! A [`Handler`] declares a request type built from the raw
//! [`HandlerRequest`](crate::dispatcher::HandlerRequest) with `TryFrom` and a
//! response type that serializes to JSON. [`spawn_typed`] runs it in a
//! coroutine and takes care of the wire details:
//!
//! - conversion failure → 400 with the conversion message
//! - `Err(RosterError)` → the error's status and JSON body
//! - `Ok(response)` → [`Handler::STATUS`] with the serialized response
//! - panic → 500, the coroutine keeps serving
//!
//! ```rust,ignore
//! struct GetStudentController { store: Arc<dyn RosterStore> }
//!
//! impl Handler for GetStudentController {
//!     type Request = GetStudentRequest;
//!     type Response = StudentRecord;
//!
//!     fn handle(&self, req: TypedHandlerRequest<GetStudentRequest>) -> Result<StudentRecord, RosterError> {
//!         self.store.find(req.data.class_id)
//!     }
//! }
//! ```

mod core;

pub use core::{spawn_typed, Handler, TypedHandlerRequest};
