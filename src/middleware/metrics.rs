use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use super::Middleware;
use crate::dispatcher::{HandlerRequest, HandlerResponse};

/// Request counters exported on `/metrics`.
///
/// All counters are relaxed atomics; values are eventually consistent.
#[derive(Debug, Default)]
pub struct MetricsMiddleware {
    request_count: AtomicUsize,
    error_count: AtomicUsize,
    total_latency_ns: AtomicU64,
    top_level_requests: AtomicUsize,
}

impl MetricsMiddleware {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that reached the dispatcher
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Dispatched requests answered with status >= 400
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Mean handler latency, zero before the first request.
    #[must_use]
    pub fn average_latency(&self) -> Duration {
        let count = self.request_count.load(Ordering::Relaxed) as u64;
        if count == 0 {
            Duration::ZERO
        } else {
            Duration::from_nanos(self.total_latency_ns.load(Ordering::Relaxed) / count)
        }
    }

    /// Count a request served outside the dispatcher (`/health`, `/metrics`)
    pub fn inc_top_level_request(&self) {
        self.top_level_requests.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn top_level_request_count(&self) -> usize {
        self.top_level_requests.load(Ordering::Relaxed)
    }

    /// Prometheus text exposition of the counters.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "# HELP roster_requests_total Total number of dispatched requests\n\
             # TYPE roster_requests_total counter\n\
             roster_requests_total {}\n\
             # HELP roster_request_errors_total Dispatched requests answered with status >= 400\n\
             # TYPE roster_request_errors_total counter\n\
             roster_request_errors_total {}\n\
             # HELP roster_top_level_requests_total Requests to built-in endpoints\n\
             # TYPE roster_top_level_requests_total counter\n\
             roster_top_level_requests_total {}\n\
             # HELP roster_request_latency_seconds Average request latency in seconds\n\
             # TYPE roster_request_latency_seconds gauge\n\
             roster_request_latency_seconds {}\n\
             # HELP roster_coroutine_stack_bytes Configured coroutine stack size\n\
             # TYPE roster_coroutine_stack_bytes gauge\n\
             roster_coroutine_stack_bytes {}\n",
            self.request_count(),
            self.error_count(),
            self.top_level_request_count(),
            self.average_latency().as_secs_f64(),
            may::config().get_stack_size(),
        )
    }
}

impl Middleware for MetricsMiddleware {
    fn before(&self, _req: &HandlerRequest) -> Option<HandlerResponse> {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        None
    }

    fn after(&self, _req: &HandlerRequest, res: &mut HandlerResponse, latency: Duration) {
        self.total_latency_ns
            .fetch_add(latency.as_nanos() as u64, Ordering::Relaxed);
        if res.status >= 400 {
            self.error_count.fetch_add(1, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_latency_starts_at_zero() {
        let m = MetricsMiddleware::new();
        assert_eq!(m.average_latency(), Duration::ZERO);
        assert_eq!(m.request_count(), 0);
    }

    #[test]
    fn test_render_contains_counters() {
        let m = MetricsMiddleware::new();
        m.inc_top_level_request();
        let text = m.render();
        assert!(text.contains("roster_requests_total 0"));
        assert!(text.contains("roster_top_level_requests_total 1"));
    }
}
