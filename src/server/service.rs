use super::request::{parse_request, ParsedRequest};
use super::response::{write_handler_response, METRICS_CONTENT_TYPE};
use crate::dispatcher::{Dispatcher, HandlerResponse};
use crate::ids::{RequestId, REQUEST_ID_HEADER};
use crate::middleware::MetricsMiddleware;
use crate::router::Router;
use http::Method;
use may_minihttp::{HttpService, Request, Response};
use serde_json::json;
use std::io;
use std::sync::Arc;
use tracing::warn;

/// The application: built-in endpoints, then router and dispatcher.
///
/// Cheap to clone; `may_minihttp` clones it per connection.
#[derive(Clone)]
pub struct AppService {
    pub router: Arc<Router>,
    pub dispatcher: Arc<Dispatcher>,
    pub metrics: Arc<MetricsMiddleware>,
}

/// `{"status": "ok"}`
#[must_use]
pub fn health_endpoint() -> HandlerResponse {
    HandlerResponse::json(200, json!({ "status": "ok" }))
}

fn not_found(method: &str, path: &str) -> HandlerResponse {
    HandlerResponse::json(
        404,
        json!({ "error": "Not Found", "method": method, "path": path }),
    )
}

impl AppService {
    #[must_use]
    pub fn new(router: Router, dispatcher: Dispatcher, metrics: Arc<MetricsMiddleware>) -> Self {
        Self {
            router: Arc::new(router),
            dispatcher: Arc::new(dispatcher),
            metrics,
        }
    }

    /// Answer one request in-process, without touching the network.
    ///
    /// This is the whole request pipeline; the `HttpService` impl only adds
    /// wire parsing and writing around it.
    #[must_use]
    pub fn handle(&self, req: ParsedRequest) -> HandlerResponse {
        if req.method == "GET" && req.path == "/health" {
            self.metrics.inc_top_level_request();
            return health_endpoint();
        }
        if req.method == "GET" && req.path == "/metrics" {
            self.metrics.inc_top_level_request();
            return HandlerResponse::text(200, self.metrics.render(), METRICS_CONTENT_TYPE);
        }

        let Ok(parsed_method) = req.method.parse::<Method>() else {
            return HandlerResponse::error(400, "Invalid HTTP method");
        };
        let Some(route_match) = self.router.route(parsed_method, &req.path) else {
            return not_found(&req.method, &req.path);
        };
        // Only a routed request gets its body parsed.
        let body = match req.json_body() {
            Ok(body) => body,
            Err(err) => return err.to_response(),
        };
        let ParsedRequest {
            method,
            path,
            headers,
            ..
        } = req;

        let request_id = RequestId::from_header_or_new(
            headers
                .iter()
                .find(|(k, _)| k.as_ref() == REQUEST_ID_HEADER)
                .map(|(_, v)| v.as_str()),
        );

        match self
            .dispatcher
            .dispatch(route_match, &path, body, headers, request_id)
        {
            Some(resp) => resp,
            None => HandlerResponse::json(
                500,
                json!({
                    "error": "Handler failed or not registered",
                    "method": method,
                    "path": path
                }),
            ),
        }
    }
}

impl HttpService for AppService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let response = match parse_request(req) {
            Ok(parsed) => self.handle(parsed),
            Err(err) => {
                warn!(error = %err, "Rejected unparsable request");
                err.to_response()
            }
        };
        write_handler_response(res, response);
        Ok(())
    }
}
