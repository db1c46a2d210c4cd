// Private module declaration
mod server;

use prometheus::{HistogramOpts, HistogramTimer, HistogramVec, IntCounter, IntCounterVec, Opts, Registry};

// Re-export for public API
pub use server::{health_handler, start_metrics_server};

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Tracks the customer endpoints:
// - Requests per operation and outcome
// - Request latency
// - Customers created
//
// All metrics are registered with Prometheus and can be scraped via /metrics
// ============================================================================

pub const OUTCOME_SUCCESS: &str = "success";
pub const OUTCOME_FAILURE: &str = "failure";

/// Central metrics registry for the service
pub struct Metrics {
    registry: Registry,

    pub requests_total: IntCounterVec,
    pub request_duration: HistogramVec,
    pub customers_created: IntCounter,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new("customer_requests_total", "Total customer requests handled"),
            &["operation", "outcome"],
        )?;
        registry.register(Box::new(requests_total.clone()))?;

        let request_duration = HistogramVec::new(
            HistogramOpts::new(
                "customer_request_duration_seconds",
                "Customer request duration including the store round trip",
            )
            .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["operation"],
        )?;
        registry.register(Box::new(request_duration.clone()))?;

        let customers_created = IntCounter::new(
            "customers_created_total",
            "Total customers persisted",
        )?;
        registry.register(Box::new(customers_created.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            request_duration,
            customers_created,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Start timing an operation; the sample is recorded when the timer drops.
    pub fn start_timer(&self, operation: &str) -> HistogramTimer {
        self.request_duration
            .with_label_values(&[operation])
            .start_timer()
    }

    /// Count a finished operation by outcome.
    pub fn observe<T, E>(&self, operation: &str, result: &Result<T, E>) {
        let outcome = if result.is_ok() {
            OUTCOME_SUCCESS
        } else {
            OUTCOME_FAILURE
        };
        self.requests_total
            .with_label_values(&[operation, outcome])
            .inc();
    }

    /// Count a request turned away before it reached the store.
    pub fn observe_rejected(&self, operation: &str) {
        self.requests_total
            .with_label_values(&[operation, OUTCOME_FAILURE])
            .inc();
    }
}
