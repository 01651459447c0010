use anyhow::Context;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use service_core::error::AppError;
use std::time::Duration;

/// How an upstream call ended, as seen by the analyze path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamOutcome {
    Success,
    /// The API answered with a non-2xx status.
    UpstreamError,
    /// Transport failure, timeout or unreadable response.
    Failure,
}

impl UpstreamOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpstreamOutcome::Success => "success",
            UpstreamOutcome::UpstreamError => "upstream_error",
            UpstreamOutcome::Failure => "failure",
        }
    }
}

/// Prometheus collectors owned by the application state.
pub struct Metrics {
    registry: Registry,
    http_requests_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
    upstream_requests_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "path", "status"],
        )?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            ),
            &["method", "path", "status"],
        )?;

        let upstream_requests_total = IntCounterVec::new(
            Opts::new(
                "upstream_requests_total",
                "Messages API calls by outcome",
            ),
            &["outcome"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(upstream_requests_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            upstream_requests_total,
        })
    }

    pub fn observe_http(&self, method: &str, path: &str, status: u16, duration: Duration) {
        let status = status.to_string();
        let labels = [method, path, status.as_str()];

        self.http_requests_total.with_label_values(&labels).inc();
        self.http_request_duration_seconds
            .with_label_values(&labels)
            .observe(duration.as_secs_f64());
    }

    pub fn record_upstream(&self, outcome: UpstreamOutcome) {
        self.upstream_requests_total
            .with_label_values(&[outcome.as_str()])
            .inc();
    }

    /// Text exposition format.
    pub fn render(&self) -> Result<String, AppError> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buffer)
            .context("Failed to encode metrics")?;

        Ok(String::from_utf8(buffer).context("Metrics output is not UTF-8")?)
    }
}
