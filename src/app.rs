//! Assembles the roster service from its parts.

use crate::dispatcher::Dispatcher;
use crate::middleware::{MetricsMiddleware, Middleware, TracingMiddleware};
use crate::registry::register_from_routes;
use crate::router::Router;
use crate::routes::route_table;
use crate::server::AppService;
use crate::store::{InMemoryRoster, RosterStore};
use anyhow::{Context, Result};
use std::sync::Arc;

/// Build a service over `store`: route table, one handler coroutine per
/// route, metrics and tracing middleware.
///
/// Nothing is bound to the network here; pass the result to
/// [`HttpServer`](crate::server::HttpServer) or call
/// [`AppService::handle`] directly.
///
/// # Errors
///
/// Fails if the route table does not compile or a handler cannot be spawned.
pub fn build_service(store: Arc<dyn RosterStore>) -> Result<AppService> {
    let routes = route_table();
    let router = Router::new(routes.clone()).context("failed to compile route table")?;

    let metrics = Arc::new(MetricsMiddleware::new());
    let mut dispatcher = Dispatcher::new();
    // SAFETY: handlers are plain store calls and reply exactly once per request.
    unsafe { register_from_routes(&mut dispatcher, &routes, &store)? };
    let metrics_mw: Arc<dyn Middleware> = Arc::clone(&metrics) as Arc<dyn Middleware>;
    dispatcher.add_middleware(metrics_mw);
    dispatcher.add_middleware(Arc::new(TracingMiddleware));

    Ok(AppService::new(router, dispatcher, metrics))
}

/// [`build_service`] over a freshly seeded in-memory roster.
///
/// # Errors
///
/// See [`build_service`].
pub fn build_default_service() -> Result<AppService> {
    build_service(Arc::new(InMemoryRoster::seeded()))
}
