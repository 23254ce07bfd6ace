use std::sync::atomic::{AtomicU64, Ordering};
use serde::Serialize;

// terminal state of one forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    ConfigMissing,
    MethodRejected,
    UpstreamRelayed,
    UnhandledException,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::ConfigMissing => "config_missing",
            Outcome::MethodRejected => "method_rejected",
            Outcome::UpstreamRelayed => "upstream_relayed",
            Outcome::UnhandledException => "unhandled_exception",
        }
    }
}

#[derive(Debug, Default)]
pub struct Metrics {
    pub total_requests: AtomicU64,
    pub config_missing: AtomicU64,
    pub method_rejected: AtomicU64,
    pub upstream_relayed: AtomicU64,
    pub upstream_errors: AtomicU64,
    pub unhandled: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {

        Self::default()

    }

    pub fn record(&self, outcome: Outcome) {

        let counter = match outcome {
            Outcome::ConfigMissing => &self.config_missing,
            Outcome::MethodRejected => &self.method_rejected,
            Outcome::UpstreamRelayed => &self.upstream_relayed,
            Outcome::UnhandledException => &self.unhandled,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        self.total_requests.fetch_add(1, Ordering::Relaxed);

    }

    // relayed reply with a non-2xx upstream status
    pub fn record_upstream_error(&self) {

        self.upstream_errors.fetch_add(1, Ordering::Relaxed);

    }

    pub fn snapshot(&self) -> MetricsSnapshot {

        let upstream_relayed = self.upstream_relayed.load(Ordering::Relaxed);
        let upstream_errors = self.upstream_errors.load(Ordering::Relaxed);

        MetricsSnapshot {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            config_missing: self.config_missing.load(Ordering::Relaxed),
            method_rejected: self.method_rejected.load(Ordering::Relaxed),
            upstream_relayed,
            upstream_errors,
            unhandled: self.unhandled.load(Ordering::Relaxed),
            upstream_error_rate: error_rate(upstream_errors, upstream_relayed),
        }
    }
}

fn error_rate(errors: u64, relayed: u64) -> f64 {

    if relayed == 0 {
        return 0.0;
    }
    (errors as f64 / relayed as f64) * 100.0

}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub config_missing: u64,
    pub method_rejected: u64,
    pub upstream_relayed: u64,
    pub upstream_errors: u64,
    pub unhandled: u64,
    pub upstream_error_rate: f64,
}
