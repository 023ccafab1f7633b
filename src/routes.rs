//! Static route table for the roster service.

use http::Method;

/// Handler names, shared by the route table and the registry.
pub const LIST_STUDENTS: &str = "list_students";
pub const COUNT_STUDENTS: &str = "count_students";
pub const ADD_STUDENT: &str = "add_student";
pub const GET_STUDENT: &str = "get_student";

/// One entry of the routing table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMeta {
    /// HTTP method
    pub method: Method,
    /// Path pattern with `{name}` placeholders, e.g. `/students/{id}`
    pub path_pattern: String,
    /// Name the dispatcher registered the handler coroutine under
    pub handler_name: String,
}

impl RouteMeta {
    #[must_use]
    pub fn new(method: Method, path_pattern: &str, handler_name: &str) -> Self {
        Self {
            method,
            path_pattern: path_pattern.to_string(),
            handler_name: handler_name.to_string(),
        }
    }
}

/// Every route the service answers (besides `/health` and `/metrics`).
#[must_use]
pub fn route_table() -> Vec<RouteMeta> {
    vec![
        RouteMeta::new(Method::GET, "/devops", LIST_STUDENTS),
        RouteMeta::new(Method::GET, "/devops-count", COUNT_STUDENTS),
        RouteMeta::new(Method::POST, "/students", ADD_STUDENT),
        RouteMeta::new(Method::GET, "/students/{id}", GET_STUDENT),
    ]
}
