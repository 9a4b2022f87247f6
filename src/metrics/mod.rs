use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry};

// ============================================================================
// Metrics Module - Prometheus metrics for the order service
// ============================================================================
//
// Tracks:
// - Orders created
// - Successful transitions (placed, shipped, delivered, cancelled)
// - Failed operations by error kind
// - Operation latency
//
// Metrics live in a private registry; callers can gather() it to export.
// ============================================================================

pub struct OrderMetrics {
    registry: Registry,

    pub orders_created: IntCounter,
    pub order_transitions: IntCounterVec,
    pub operation_failures: IntCounterVec,
    pub operation_duration: HistogramVec,
}

impl OrderMetrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let orders_created = IntCounter::new("orders_created_total", "Total orders created")?;
        registry.register(Box::new(orders_created.clone()))?;

        let order_transitions = IntCounterVec::new(
            Opts::new("order_transitions_total", "Successful order status transitions"),
            &["transition"],
        )?;
        registry.register(Box::new(order_transitions.clone()))?;

        let operation_failures = IntCounterVec::new(
            Opts::new("order_operation_failures_total", "Order operations that returned an error"),
            &["operation", "kind"],
        )?;
        registry.register(Box::new(operation_failures.clone()))?;

        let operation_duration = HistogramVec::new(
            HistogramOpts::new("order_operation_duration_seconds", "Order service operation duration")
                .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1]),
            &["operation"],
        )?;
        registry.register(Box::new(operation_duration.clone()))?;

        Ok(Self {
            registry,
            orders_created,
            order_transitions,
            operation_failures,
            operation_duration,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_created(&self) {
        self.orders_created.inc();
    }

    pub fn record_transition(&self, transition: &str) {
        self.order_transitions.with_label_values(&[transition]).inc();
    }

    pub fn record_failure(&self, operation: &str, kind: &str) {
        self.operation_failures.with_label_values(&[operation, kind]).inc();
    }

    pub fn observe_duration(&self, operation: &str, duration_secs: f64) {
        self.operation_duration.with_label_values(&[operation]).observe(duration_secs);
    }
}
