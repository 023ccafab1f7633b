//! # Dispatcher Module
//!
//! Coroutine-based handler dispatch.
//!
//! ## Overview
//!
//! - Every handler runs in its own `may` coroutine, fed by an MPSC channel
//! - A request carries a one-shot reply channel the handler answers on
//! - Middleware runs before (may short-circuit) and after each handler
//!
//! ## Request Flow
//!
//! 1. Router matches the request → [`RouteMatch`](crate::router::RouteMatch)
//! 2. Dispatcher looks up the handler sender by name
//! 3. The [`HandlerRequest`] is sent to the handler coroutine
//! 4. The handler replies with a [`HandlerResponse`]
//! 5. Middleware `after` hooks see the response before it is returned
//!
//! ## Error Handling
//!
//! - Unknown handler names yield `None` (the service answers 500)
//! - Handler panics are caught inside the coroutine and answered with 500
//! - A closed handler channel is answered with 503

mod core;

pub use core::{
    Dispatcher, HandlerRequest, HandlerResponse, HandlerSender, HeaderVec, JSON_CONTENT_TYPE,
};
