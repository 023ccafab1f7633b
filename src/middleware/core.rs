use std::time::Duration;

use crate::dispatcher::{HandlerRequest, HandlerResponse};

/// Hooks run by the dispatcher around every handler call.
///
/// Returning `Some` from `before` answers the request without calling the
/// handler; `after` always runs, including for such early responses.
pub trait Middleware: Send + Sync {
    fn before(&self, _req: &HandlerRequest) -> Option<HandlerResponse> {
        None
    }
    fn after(&self, _req: &HandlerRequest, _res: &mut HandlerResponse, _latency: Duration) {}
}
