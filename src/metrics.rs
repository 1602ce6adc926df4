//! Prometheus metrics registry and instruments.
//!
//! This module is framework-agnostic and can be used from any layer.

use lazy_static::lazy_static;
use prometheus::{HistogramOpts, IntCounterVec, IntGaugeVec, Opts, Registry};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // Resolution metrics
    pub static ref RESOLUTIONS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("actorlens_resolutions_total", "Total number of profile resolutions"),
        &["outcome"]
    ).expect("metric can be created");
    pub static ref RESOLUTION_DURATION_SECONDS: prometheus::HistogramVec = prometheus::HistogramVec::new(
        HistogramOpts::new(
            "actorlens_resolution_duration_seconds",
            "Profile resolution duration in seconds"
        ).buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["step"]
    ).expect("metric can be created");

    // Error metrics
    pub static ref ERRORS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("actorlens_errors_total", "Total number of errors by class"),
        &["error_type"]
    ).expect("metric can be created");

    // Cache metrics
    pub static ref CACHE_HITS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("actorlens_cache_hits_total", "Total number of cache hits"),
        &["cache_name"]
    ).expect("metric can be created");
    pub static ref CACHE_MISSES_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("actorlens_cache_misses_total", "Total number of cache misses"),
        &["cache_name"]
    ).expect("metric can be created");
    pub static ref CACHE_SIZE: IntGaugeVec = IntGaugeVec::new(
        Opts::new("actorlens_cache_size", "Current number of cache entries"),
        &["cache_name"]
    ).expect("metric can be created");
}

/// Register all metrics with the global registry.
///
/// Call once at startup. Registration failures are logged and skipped so
/// that a duplicate call does not abort the process.
pub fn init_metrics() {
    let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(RESOLUTIONS_TOTAL.clone()),
        Box::new(RESOLUTION_DURATION_SECONDS.clone()),
        Box::new(ERRORS_TOTAL.clone()),
        Box::new(CACHE_HITS_TOTAL.clone()),
        Box::new(CACHE_MISSES_TOTAL.clone()),
        Box::new(CACHE_SIZE.clone()),
    ];

    for collector in collectors {
        if let Err(error) = REGISTRY.register(collector) {
            tracing::warn!(%error, "Failed to register metric");
        }
    }

    tracing::debug!("Metrics initialized");
}

/// Render the registry in the Prometheus text exposition format.
pub fn gather() -> String {
    use prometheus::Encoder;

    let encoder = prometheus::TextEncoder::new();
    let mut buffer = Vec::new();
    if let Err(error) = encoder.encode(&REGISTRY.gather(), &mut buffer) {
        tracing::warn!(%error, "Failed to encode metrics");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
