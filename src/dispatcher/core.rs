use crate::ids::RequestId;
use crate::middleware::Middleware;
use crate::router::{ParamVec, RouteMatch};
use crate::routes::RouteMeta;
use crate::runtime_config::RuntimeConfig;
use http::Method;
use may::coroutine;
use may::sync::mpsc;
use serde::Serialize;
use serde_json::Value;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Request headers, names lowercased. Most requests fit inline.
pub type HeaderVec = SmallVec<[(Arc<str>, String); 16]>;

/// Request data passed to a handler coroutine
#[derive(Debug, Clone)]
pub struct HandlerRequest {
    /// Correlation id for logs
    pub request_id: RequestId,
    /// HTTP method
    pub method: Method,
    /// Request path as received
    pub path: String,
    /// Name of the handler that should process this request
    pub handler_name: String,
    /// Path parameters extracted by the router
    pub path_params: ParamVec,
    /// HTTP headers
    pub headers: HeaderVec,
    /// Parsed JSON body, if any
    pub body: Option<Value>,
    /// Channel for sending the response back to the dispatcher
    pub reply_tx: mpsc::Sender<HandlerResponse>,
}

impl HandlerRequest {
    /// Get a path parameter by name
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Response sent back from a handler coroutine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandlerResponse {
    /// HTTP status code
    pub status: u16,
    /// Body; serialized as JSON unless `content_type` says otherwise
    pub body: Value,
    /// `Content-Type` written on the wire
    #[serde(skip)]
    pub content_type: &'static str,
}

/// Content type of every handler and error response.
pub const JSON_CONTENT_TYPE: &str = "application/json";

impl HandlerResponse {
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body,
            content_type: JSON_CONTENT_TYPE,
        }
    }

    /// Raw text body written as-is with `content_type`.
    #[must_use]
    pub fn text(status: u16, body: String, content_type: &'static str) -> Self {
        Self {
            status,
            body: Value::String(body),
            content_type,
        }
    }

    /// `{"error": message}` with the given status
    #[must_use]
    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, serde_json::json!({ "error": message }))
    }
}

/// Sender half of a handler coroutine's request channel
pub type HandlerSender = mpsc::Sender<HandlerRequest>;

/// Routes requests to registered handler coroutines and runs middleware
/// around them.
#[derive(Clone, Default)]
pub struct Dispatcher {
    /// Handler name → request channel
    pub handlers: HashMap<String, HandlerSender>,
    /// Middleware in execution order
    pub middlewares: Vec<Arc<dyn Middleware>>,
}

impl Dispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an already spawned handler to a route.
    ///
    /// A handler registered earlier under the same name is replaced; dropping
    /// its sender closes the channel and its coroutine exits.
    pub fn add_route(&mut self, route: &RouteMeta, sender: HandlerSender) {
        if self
            .handlers
            .insert(route.handler_name.clone(), sender)
            .is_some()
        {
            warn!(
                handler_name = %route.handler_name,
                "Replaced existing handler - old coroutine will exit"
            );
        }
        info!(
            handler_name = %route.handler_name,
            total_handlers = self.handlers.len(),
            "Handler registered"
        );
    }

    /// Add middleware; runs in insertion order.
    pub fn add_middleware(&mut self, mw: Arc<dyn Middleware>) {
        self.middlewares.push(mw);
    }

    /// Spawn a coroutine running `handler_fn` for every request sent under `name`.
    ///
    /// Panics inside the handler are caught and answered with a 500 response;
    /// the coroutine keeps serving.
    ///
    /// # Safety
    ///
    /// Spawns a `may` coroutine. The handler must not rely on thread-local
    /// state across yields and must send exactly one reply per request.
    pub unsafe fn register_handler<F>(&mut self, name: &str, handler_fn: F)
    where
        F: Fn(HandlerRequest) + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<HandlerRequest>();
        let handler_name = name.to_string();
        let stack_size = RuntimeConfig::from_env().stack_size;

        // SAFETY: forwarded to the caller, see the function docs.
        let spawned = unsafe {
            coroutine::Builder::new()
                .name(handler_name.clone())
                .stack_size(stack_size)
                .spawn(move || {
                    debug!(handler_name = %handler_name, stack_size, "Handler coroutine start");
                    for req in rx.iter() {
                        let reply_tx = req.reply_tx.clone();
                        let request_id = req.request_id;
                        if let Err(panic) =
                            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| handler_fn(req)))
                        {
                            error!(
                                request_id = %request_id,
                                handler_name = %handler_name,
                                panic = ?panic,
                                "Handler panicked"
                            );
                            let _ = reply_tx.send(HandlerResponse::error(500, "Handler panicked"));
                        }
                    }
                    debug!(handler_name = %handler_name, "Handler coroutine exit");
                })
        };

        match spawned {
            Ok(_) => {
                self.handlers.insert(name.to_string(), tx);
            }
            Err(e) => error!(handler_name = %name, error = %e, "Failed to spawn handler coroutine"),
        }
    }

    /// Send a matched request to its handler and wait for the reply.
    ///
    /// Returns `None` when no handler is registered under the route's handler
    /// name.
    #[must_use]
    pub fn dispatch(
        &self,
        route_match: RouteMatch,
        path: &str,
        body: Option<Value>,
        headers: HeaderVec,
        request_id: RequestId,
    ) -> Option<HandlerResponse> {
        let Some(tx) = self.handlers.get(&route_match.handler_name) else {
            let available: Vec<&String> = self.handlers.keys().collect();
            error!(
                request_id = %request_id,
                handler_name = %route_match.handler_name,
                available_handlers = ?available,
                "Handler not found"
            );
            return None;
        };

        let (reply_tx, reply_rx) = mpsc::channel();
        let mut request = HandlerRequest {
            request_id,
            method: route_match.route.method.clone(),
            path: path.to_string(),
            handler_name: route_match.handler_name,
            path_params: route_match.path_params,
            headers,
            body,
            reply_tx,
        };

        let mut early: Option<HandlerResponse> = None;
        for mw in &self.middlewares {
            let resp = mw.before(&request);
            if early.is_none() {
                early = resp;
            }
        }

        let start = Instant::now();
        let mut resp = match early {
            Some(resp) => {
                debug!(request_id = %request_id, status = resp.status, "Middleware returned early response");
                resp
            }
            None => {
                debug!(
                    request_id = %request_id,
                    handler_name = %request.handler_name,
                    "Request dispatched to handler"
                );
                // Only the handler may hold the reply sender, so a handler that
                // drops the request closes the channel instead of hanging us.
                let (detached_tx, _) = mpsc::channel();
                let reply_tx = std::mem::replace(&mut request.reply_tx, detached_tx);
                let outbound = HandlerRequest {
                    reply_tx,
                    ..request.clone()
                };
                if let Err(e) = tx.send(outbound) {
                    error!(
                        request_id = %request_id,
                        handler_name = %request.handler_name,
                        error = %e,
                        "Failed to send request to handler"
                    );
                    HandlerResponse::error(503, "Handler is not accepting requests")
                } else {
                    match reply_rx.recv() {
                        Ok(resp) => resp,
                        Err(e) => {
                            error!(
                                request_id = %request_id,
                                handler_name = %request.handler_name,
                                error = %e,
                                "Handler channel closed before replying"
                            );
                            HandlerResponse::error(503, "Handler is not responding")
                        }
                    }
                }
            }
        };
        let latency: Duration = start.elapsed();

        for mw in &self.middlewares {
            mw.after(&request, &mut resp, latency);
        }
        Some(resp)
    }
}
