use std::time::Duration;

use tracing::{info, info_span, warn};

use super::Middleware;
use crate::dispatcher::{HandlerRequest, HandlerResponse};

/// Logs one structured event per handled request.
///
/// Client errors are logged at `warn`, everything else at `info`.
pub struct TracingMiddleware;

impl Middleware for TracingMiddleware {
    fn after(&self, req: &HandlerRequest, res: &mut HandlerResponse, latency: Duration) {
        let span = info_span!(
            "request",
            request_id = %req.request_id,
            method = %req.method,
            path = %req.path,
            handler = %req.handler_name
        );
        let _entered = span.enter();
        let latency_ms = latency.as_millis() as u64;
        if res.status >= 400 {
            warn!(status = res.status, latency_ms, body = %res.body, "Request failed");
        } else {
            info!(status = res.status, latency_ms, "Request completed");
        }
    }
}
