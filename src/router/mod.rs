//! # Router Module
//!
//! Matches an incoming method and path against the route table and extracts
//! path parameters.
//!
//! ## Architecture
//!
//! 1. **Compilation**: at startup every path pattern (e.g. `/students/{id}`) is
//!    turned into an anchored regex plus the ordered list of its parameter names.
//! 2. **Matching**: each request path is tested against the compiled routes for
//!    its method; the first hit yields a [`RouteMatch`].
//!
//! ## Example
//!
//! ```rust
//! use devops_roster::router::Router;
//! use devops_roster::routes::route_table;
//! use http::Method;
//!
//! let router = Router::new(route_table()).unwrap();
//! let m = router.route(Method::GET, "/students/1").unwrap();
//! assert_eq!(m.handler_name, "get_student");
//! assert_eq!(m.get_path_param("id"), Some("1"));
//! ```

mod core;

pub use core::{ParamVec, RouteMatch, Router, MAX_INLINE_PARAMS};
