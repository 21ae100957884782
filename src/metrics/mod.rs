/*!
 * # Metrics Module
 *
 * In-process counters, gauges and histograms for the logistics API.
 *
 * Metrics are exposed in the following formats:
 * - Prometheus text format at `/metrics`
 * - JSON format at `/metrics/json`
 */

use axum::{extract::Request, middleware::Next, response::Response};
use dashmap::DashMap;
use once_cell::sync::Lazy;
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Failed to export metrics: {0}")]
    ExportError(String),
}

#[derive(Debug, Clone, Default)]
pub struct Counter {
    value: Arc<AtomicU64>,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc(&self) {
        self.value.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_by(&self, value: u64) {
        self.value.fetch_add(value, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Gauge {
    value: Arc<AtomicU64>,
}

impl Gauge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, value: u64) {
        self.value.store(value, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}

/// Sum/count histogram; sum is kept in microseconds for durations.
#[derive(Debug, Clone, Default)]
pub struct Histogram {
    sum: Arc<AtomicU64>,
    count: Arc<AtomicU64>,
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe_duration(&self, duration: Duration) {
        self.sum
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn get_sum_seconds(&self) -> f64 {
        self.sum.load(Ordering::Relaxed) as f64 / 1_000_000.0
    }
}

#[derive(Debug, Default)]
pub struct MetricsRegistry {
    counters: DashMap<String, Counter>,
    gauges: DashMap<String, Gauge>,
    histograms: DashMap<String, Histogram>,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create_counter(&self, name: &str) -> Counter {
        self.counters
            .entry(name.to_string())
            .or_insert_with(Counter::new)
            .clone()
    }

    pub fn get_or_create_gauge(&self, name: &str) -> Gauge {
        self.gauges
            .entry(name.to_string())
            .or_insert_with(Gauge::new)
            .clone()
    }

    pub fn get_or_create_histogram(&self, name: &str) -> Histogram {
        self.histograms
            .entry(name.to_string())
            .or_insert_with(Histogram::new)
            .clone()
    }

    pub fn export_metrics(&self) -> Result<String, MetricsError> {
        let mut output = String::new();

        let mut counters: Vec<_> = self
            .counters
            .iter()
            .map(|e| (e.key().clone(), e.value().get()))
            .collect();
        counters.sort();
        for (name, value) in counters {
            output.push_str(&format!("# TYPE {} counter\n{} {}\n", name, name, value));
        }

        let mut gauges: Vec<_> = self
            .gauges
            .iter()
            .map(|e| (e.key().clone(), e.value().get()))
            .collect();
        gauges.sort();
        for (name, value) in gauges {
            output.push_str(&format!("# TYPE {} gauge\n{} {}\n", name, name, value));
        }

        let mut histograms: Vec<_> = self
            .histograms
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();
        histograms.sort_by(|a, b| a.0.cmp(&b.0));
        for (name, histogram) in histograms {
            output.push_str(&format!("# TYPE {} histogram\n", name));
            output.push_str(&format!("{}_count {}\n", name, histogram.get_count()));
            output.push_str(&format!("{}_sum {}\n", name, histogram.get_sum_seconds()));
        }

        Ok(output)
    }

    pub fn export_metrics_json(&self) -> Result<serde_json::Value, MetricsError> {
        let mut counters = serde_json::Map::new();
        for entry in self.counters.iter() {
            counters.insert(entry.key().clone(), json!(entry.value().get()));
        }

        let mut gauges = serde_json::Map::new();
        for entry in self.gauges.iter() {
            gauges.insert(entry.key().clone(), json!(entry.value().get()));
        }

        let mut histograms = serde_json::Map::new();
        for entry in self.histograms.iter() {
            histograms.insert(
                entry.key().clone(),
                json!({
                    "count": entry.value().get_count(),
                    "sum_seconds": entry.value().get_sum_seconds(),
                }),
            );
        }

        Ok(json!({
            "counters": counters,
            "gauges": gauges,
            "histograms": histograms,
        }))
    }
}

/// Global metrics registry
pub static METRICS: Lazy<MetricsRegistry> = Lazy::new(MetricsRegistry::new);

pub fn increment_counter(name: &str) {
    METRICS.get_or_create_counter(name).inc();
}

pub fn increment_counter_by(name: &str, value: u64) {
    METRICS.get_or_create_counter(name).inc_by(value);
}

pub fn set_gauge(name: &str, value: u64) {
    METRICS.get_or_create_gauge(name).set(value);
}

/// Records the duration and outcome of a named service operation
pub fn record_operation(name: &str, duration: Duration, success: bool) {
    METRICS
        .get_or_create_histogram(&format!("operation_duration_seconds_{}", sanitize(name)))
        .observe_duration(duration);
    if !success {
        increment_counter(&format!("operation_errors_total_{}", sanitize(name)));
    }
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Domain counters for the container ledger and code allocation
pub struct LogisticsMetrics {
    pub containers_registered: Counter,
    pub movements_recorded: Counter,
    pub bulk_updates_rejected: Counter,
    pub jobs_created: Counter,
    pub code_allocation_retries: Counter,
    pub code_allocation_fallbacks: Counter,
}

impl LogisticsMetrics {
    fn new() -> Self {
        Self {
            containers_registered: METRICS.get_or_create_counter("containers_registered_total"),
            movements_recorded: METRICS.get_or_create_counter("movements_recorded_total"),
            bulk_updates_rejected: METRICS.get_or_create_counter("bulk_updates_rejected_total"),
            jobs_created: METRICS.get_or_create_counter("jobs_created_total"),
            code_allocation_retries: METRICS.get_or_create_counter("code_allocation_retries_total"),
            code_allocation_fallbacks: METRICS
                .get_or_create_counter("code_allocation_fallbacks_total"),
        }
    }
}

pub static LOGISTICS_METRICS: Lazy<LogisticsMetrics> = Lazy::new(LogisticsMetrics::new);

/// HTTP request counters by status class
pub struct EndpointMetrics {
    pub requests_total: Counter,
    pub latency: Histogram,
    pub status_2xx: Counter,
    pub status_4xx: Counter,
    pub status_5xx: Counter,
}

impl EndpointMetrics {
    fn new() -> Self {
        Self {
            requests_total: METRICS.get_or_create_counter("http_requests_total"),
            latency: METRICS.get_or_create_histogram("http_request_duration_seconds"),
            status_2xx: METRICS.get_or_create_counter("http_status_2xx_total"),
            status_4xx: METRICS.get_or_create_counter("http_status_4xx_total"),
            status_5xx: METRICS.get_or_create_counter("http_status_5xx_total"),
        }
    }

    pub fn record_request(&self, duration: Duration, status_code: u16) {
        self.requests_total.inc();
        self.latency.observe_duration(duration);

        match status_code {
            200..=299 => self.status_2xx.inc(),
            400..=499 => self.status_4xx.inc(),
            500..=599 => self.status_5xx.inc(),
            _ => {}
        }
    }
}

pub static ENDPOINT_METRICS: Lazy<EndpointMetrics> = Lazy::new(EndpointMetrics::new);

/// Middleware recording request counts and latency
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let response = next.run(request).await;
    ENDPOINT_METRICS.record_request(start.elapsed(), response.status().as_u16());
    response
}

// HTTP endpoint handlers for metrics
pub async fn metrics_handler() -> Result<String, MetricsError> {
    METRICS.export_metrics()
}

pub async fn metrics_json_handler() -> Result<serde_json::Value, MetricsError> {
    METRICS.export_metrics_json()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prometheus_export_lists_counters_and_histograms() {
        let registry = MetricsRegistry::new();
        registry.get_or_create_counter("widgets_total").inc_by(3);
        registry
            .get_or_create_histogram("widget_seconds")
            .observe_duration(Duration::from_millis(500));

        let text = registry.export_metrics().unwrap();
        assert!(text.contains("# TYPE widgets_total counter"));
        assert!(text.contains("widgets_total 3"));
        assert!(text.contains("widget_seconds_count 1"));
        assert!(text.contains("widget_seconds_sum 0.5"));
    }

    #[test]
    fn record_operation_counts_failures_only() {
        record_operation("metrics.test-op", Duration::from_millis(1), true);
        record_operation("metrics.test-op", Duration::from_millis(1), false);

        let json = METRICS.export_metrics_json().unwrap();
        assert_eq!(
            json["counters"]["operation_errors_total_metrics_test_op"],
            json!(1)
        );
        assert_eq!(
            json["histograms"]["operation_duration_seconds_metrics_test_op"]["count"],
            json!(2)
        );
    }
}
