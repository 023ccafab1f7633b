//! HTTP layer: `may_minihttp` server, request parsing, response writing and
//! the [`AppService`] tying router and dispatcher together.

pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use request::{parse_body, parse_request, ParsedRequest};
pub use service::{health_endpoint, AppService};
