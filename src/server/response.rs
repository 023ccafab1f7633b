use may_minihttp::Response;
use serde_json::Value;
use tracing::error;

use crate::dispatcher::{HandlerResponse, JSON_CONTENT_TYPE};

/// Prometheus text exposition format.
pub const METRICS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

pub(crate) fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        404 => "Not Found",
        409 => "Conflict",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "OK",
    }
}

/// Write a handler response. JSON responses are serialized; any other
/// content type carries a string body written verbatim.
pub fn write_handler_response(res: &mut Response, response: HandlerResponse) {
    let HandlerResponse {
        status,
        body,
        content_type,
    } = response;
    let bytes = match body {
        Value::String(s) if content_type != JSON_CONTENT_TYPE => s.into_bytes(),
        other => match serde_json::to_vec(&other) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(status, error = %e, "Failed to encode response body");
                res.status_code(500, status_reason(500));
                res.header("Content-Type: application/json");
                res.body_vec(br#"{"error":"Failed to encode response"}"#.to_vec());
                return;
            }
        },
    };
    res.status_code(status as usize, status_reason(status));
    res.header(content_type_header(content_type));
    res.body_vec(bytes);
}

// may_minihttp only takes `&'static str` header lines.
fn content_type_header(content_type: &str) -> &'static str {
    match content_type {
        METRICS_CONTENT_TYPE => "Content-Type: text/plain; version=0.0.4",
        "text/plain" => "Content-Type: text/plain",
        _ => "Content-Type: application/json",
    }
}
