use crate::routes::RouteMeta;
use http::Method;
use regex::Regex;
use smallvec::SmallVec;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Path parameters kept inline before spilling to the heap.
pub const MAX_INLINE_PARAMS: usize = 4;

/// Extracted `(name, value)` pairs. Names are shared with the compiled route.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Result of successfully matching a request path to a route
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route
    pub route: Arc<RouteMeta>,
    /// Path parameters extracted from the URL (e.g. `{id}` → `("id", "123")`)
    pub path_params: ParamVec,
    /// Name of the handler that should process this request
    pub handler_name: String,
}

impl RouteMatch {
    /// Get a path parameter by name (last occurrence wins)
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
struct CompiledRoute {
    method: Method,
    regex: Regex,
    meta: Arc<RouteMeta>,
    param_names: Vec<Arc<str>>,
}

/// Regex-backed router over a fixed route table.
///
/// Matching is a linear scan over the compiled routes; the table is small
/// and fixed at startup.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<CompiledRoute>,
}

impl Router {
    /// Compile the route table.
    ///
    /// # Errors
    ///
    /// Returns the regex error if a pattern fails to compile.
    pub fn new(routes: Vec<RouteMeta>) -> Result<Self, regex::Error> {
        let routes = routes
            .into_iter()
            .map(|route| {
                let (regex, names) = Self::path_to_regex(&route.path_pattern)?;
                Ok(CompiledRoute {
                    method: route.method.clone(),
                    regex,
                    meta: Arc::new(route),
                    param_names: names.into_iter().map(Arc::from).collect(),
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        let routes_summary: Vec<String> = routes
            .iter()
            .map(|r| format!("{} {}", r.method, r.meta.path_pattern))
            .collect();
        info!(
            routes_count = routes.len(),
            routes_summary = ?routes_summary,
            "Routing table loaded"
        );

        Ok(Self { routes })
    }

    /// Print all registered routes to stdout
    pub fn dump_routes(&self) {
        println!("[routes] count={}", self.routes.len());
        for r in &self.routes {
            println!(
                "[route] {} {} -> {}",
                r.method, r.meta.path_pattern, r.meta.handler_name
            );
        }
    }

    /// Registered `(method, pattern, handler)` triples in table order.
    #[must_use]
    pub fn routes(&self) -> Vec<(Method, String, String)> {
        self.routes
            .iter()
            .map(|r| {
                (
                    r.method.clone(),
                    r.meta.path_pattern.clone(),
                    r.meta.handler_name.clone(),
                )
            })
            .collect()
    }

    /// Match an HTTP request to a route.
    ///
    /// Returns `None` when no route matches (the service answers 404).
    #[must_use]
    pub fn route(&self, method: Method, path: &str) -> Option<RouteMatch> {
        debug!(method = %method, path = %path, "Route match attempt");
        let match_start = Instant::now();

        for compiled in self.routes.iter().filter(|r| r.method == method) {
            let Some(caps) = compiled.regex.captures(path) else {
                continue;
            };
            let path_params: ParamVec = compiled
                .param_names
                .iter()
                .zip(caps.iter().skip(1))
                .filter_map(|(name, m)| m.map(|m| (Arc::clone(name), m.as_str().to_string())))
                .collect();

            let duration = match_start.elapsed();
            if duration > Duration::from_millis(1) {
                warn!(
                    method = %method,
                    path = %path,
                    handler_name = %compiled.meta.handler_name,
                    duration_us = duration.as_micros(),
                    "Slow route matching detected"
                );
            } else {
                debug!(
                    method = %method,
                    path = %path,
                    handler_name = %compiled.meta.handler_name,
                    route_pattern = %compiled.meta.path_pattern,
                    path_params = ?path_params,
                    duration_us = duration.as_micros(),
                    "Route matched"
                );
            }

            return Some(RouteMatch {
                route: Arc::clone(&compiled.meta),
                path_params,
                handler_name: compiled.meta.handler_name.clone(),
            });
        }

        warn!(
            method = %method,
            path = %path,
            duration_us = match_start.elapsed().as_micros(),
            "No route matched"
        );
        None
    }

    /// Convert a path pattern to an anchored regex and its parameter names.
    ///
    /// `/students/{id}` becomes `^/students/([^/]+)$` with `["id"]`. Literal
    /// segments are escaped.
    pub(crate) fn path_to_regex(path: &str) -> Result<(Regex, Vec<String>), regex::Error> {
        if path == "/" {
            return Ok((Regex::new(r"^/$")?, Vec::new()));
        }

        let mut pattern = String::with_capacity(path.len() + 8);
        pattern.push('^');
        let mut param_names = Vec::with_capacity(path.matches('{').count());

        for segment in path.split('/').filter(|s| !s.is_empty()) {
            if let Some(name) = segment
                .strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
            {
                pattern.push_str("/([^/]+)");
                param_names.push(name.to_string());
            } else {
                pattern.push('/');
                pattern.push_str(&regex::escape(segment));
            }
        }

        // One trailing slash is tolerated: `/devops/` routes like `/devops`.
        pattern.push_str("/?$");
        Ok((Regex::new(&pattern)?, param_names))
    }
}
