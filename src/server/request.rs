use crate::dispatcher::HeaderVec;
use crate::error::RosterError;
use may_minihttp::Request;
use serde_json::Value;
use std::io::Read;
use std::sync::Arc;
use tracing::{debug, info};

/// Request data extracted from the wire, ready for [`AppService::handle`](super::AppService::handle).
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRequest {
    /// HTTP method (GET, POST, ...)
    pub method: String,
    /// Path without the query string
    pub path: String,
    /// Headers, names lowercased
    pub headers: HeaderVec,
    /// Raw body, `None` when the body was empty
    pub body: Option<String>,
}

impl ParsedRequest {
    #[must_use]
    pub fn new(method: &str, path: &str) -> Self {
        Self {
            method: method.to_string(),
            path: strip_query(path).to_string(),
            headers: HeaderVec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .push((Arc::from(name.to_ascii_lowercase()), value.to_string()));
        self
    }

    /// Attach `body` serialized as JSON, with a JSON content type.
    #[must_use]
    pub fn with_json_body(self, body: &Value) -> Self {
        self.with_body("application/json", &body.to_string())
    }

    /// Attach a raw body sent with `content_type`.
    #[must_use]
    pub fn with_body(self, content_type: &str, body: &str) -> Self {
        let mut req = self.with_header("content-type", content_type);
        req.body = Some(body.to_string()).filter(|b| !b.trim().is_empty());
        req
    }

    /// Whether the declared content type is JSON (`application/json` or `*+json`).
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.header("content-type").is_some_and(|ct| {
            let media = ct.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
            media == "application/json" || media.ends_with("+json")
        })
    }

    /// The body parsed as JSON. Bodies without a JSON content type are
    /// ignored, like an empty body.
    ///
    /// # Errors
    ///
    /// [`RosterError::InvalidInput`] for a JSON-typed body that does not parse.
    pub fn json_body(&self) -> Result<Option<Value>, RosterError> {
        match &self.body {
            Some(raw) if self.is_json() => parse_body(raw),
            _ => Ok(None),
        }
    }

    /// Header value by name (case-insensitive)
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

fn strip_query(path: &str) -> &str {
    path.split('?').next().unwrap_or("/")
}

/// Parse a raw request body.
///
/// Empty or whitespace-only bodies are `None`.
///
/// # Errors
///
/// [`RosterError::InvalidInput`] when the body is not valid JSON.
pub fn parse_body(raw: &str) -> Result<Option<Value>, RosterError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(raw)
        .map(Some)
        .map_err(|e| RosterError::invalid(format!("malformed JSON body: {e}")))
}

/// Extract method, path, headers and raw body from a `may_minihttp::Request`.
///
/// # Errors
///
/// [`RosterError::InvalidInput`] when the body cannot be read as UTF-8.
pub fn parse_request(req: Request) -> Result<ParsedRequest, RosterError> {
    let method = req.method().to_string();
    let path = strip_query(req.path()).to_string();

    let headers: HeaderVec = req
        .headers()
        .iter()
        .map(|h| {
            (
                Arc::from(h.name.to_ascii_lowercase()),
                String::from_utf8_lossy(h.value).to_string(),
            )
        })
        .collect();
    debug!(
        header_count = headers.len(),
        header_names = ?headers.iter().map(|(k, _)| k.as_ref()).collect::<Vec<_>>(),
        "Headers extracted"
    );

    let mut raw = String::new();
    req.body()
        .read_to_string(&mut raw)
        .map_err(|e| RosterError::invalid(format!("unreadable body: {e}")))?;

    info!(
        method = %method,
        path = %path,
        body_size_bytes = raw.len(),
        "HTTP request parsed"
    );
    let body = Some(raw).filter(|b| !b.trim().is_empty());

    Ok(ParsedRequest {
        method,
        path,
        headers,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_body_empty() {
        assert_eq!(parse_body("").unwrap(), None);
        assert_eq!(parse_body("  \r\n").unwrap(), None);
    }

    #[test]
    fn test_parse_body_json() {
        assert_eq!(
            parse_body(r#"{"classId": 5}"#).unwrap(),
            Some(json!({"classId": 5}))
        );
    }

    #[test]
    fn test_parse_body_malformed() {
        let err = parse_body("{classId: 5").unwrap_err();
        assert_eq!(err.status(), 400);
        assert!(err.to_string().contains("malformed JSON body"));
    }

    #[test]
    fn test_json_body_requires_json_content_type() {
        let req = ParsedRequest::new("POST", "/students").with_body("text/plain", "hello");
        assert_eq!(req.json_body().unwrap(), None);

        let req = ParsedRequest::new("POST", "/students")
            .with_body("Application/JSON; charset=utf-8", r#"{"classId": 5}"#);
        assert!(req.is_json());
        assert_eq!(req.json_body().unwrap(), Some(json!({"classId": 5})));

        let req = ParsedRequest::new("POST", "/students").with_body("application/json", "hello");
        assert_eq!(req.json_body().unwrap_err().status(), 400);
    }

    #[test]
    fn test_untyped_body_is_ignored() {
        let mut req = ParsedRequest::new("GET", "/devops");
        req.body = Some("hello".to_string());
        assert!(!req.is_json());
        assert_eq!(req.json_body().unwrap(), None);
    }

    #[test]
    fn test_new_strips_query_and_lowercases_headers() {
        let req = ParsedRequest::new("GET", "/devops?x=1").with_header("X-Request-Id", "abc");
        assert_eq!(req.path, "/devops");
        assert_eq!(req.header("x-request-id"), Some("abc"));
        assert_eq!(req.headers[0].0.as_ref(), "x-request-id");
    }
}
