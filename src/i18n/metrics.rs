//! Resolver metrics and observability.
//!
//! Tracks how translation lookups are resolved: how often the default
//! language is used, how often language data is missing and how often
//! assembly fails.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for translation lookups made through one resolver.
#[derive(Debug, Default)]
pub struct ResolverMetrics {
    /// Number of lookups started
    requests: AtomicUsize,

    /// Number of lookups where no language was detected in the path
    default_language_used: AtomicUsize,

    /// Number of lookups rejected because the language had no data
    missing_language: AtomicUsize,

    /// Number of lookups that fell back to the default language's data
    policy_fallbacks: AtomicUsize,

    /// Number of lookups whose assembly step failed
    assembly_failures: AtomicUsize,

    /// Number of lookups that produced a dictionary
    successes: AtomicUsize,
}

impl ResolverMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_default_language(&self) {
        self.default_language_used.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_missing_language(&self) {
        self.missing_language.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_policy_fallback(&self) {
        self.policy_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_assembly_failure(&self) {
        self.assembly_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_success(&self) {
        self.successes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }

    pub fn default_language_used(&self) -> usize {
        self.default_language_used.load(Ordering::Relaxed)
    }

    pub fn missing_language(&self) -> usize {
        self.missing_language.load(Ordering::Relaxed)
    }

    pub fn policy_fallbacks(&self) -> usize {
        self.policy_fallbacks.load(Ordering::Relaxed)
    }

    pub fn assembly_failures(&self) -> usize {
        self.assembly_failures.load(Ordering::Relaxed)
    }

    pub fn successes(&self) -> usize {
        self.successes.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let requests = self.requests();
        let successes = self.successes();
        let success_rate = if requests > 0 {
            (successes as f64 / requests as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            requests,
            default_language_used: self.default_language_used(),
            missing_language: self.missing_language(),
            policy_fallbacks: self.policy_fallbacks(),
            assembly_failures: self.assembly_failures(),
            successes,
            success_rate,
            generated_at: Utc::now(),
        }
    }
}

/// Point-in-time snapshot of resolver metrics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub requests: usize,
    pub default_language_used: usize,
    pub missing_language: usize,
    pub policy_fallbacks: usize,
    pub assembly_failures: usize,
    pub successes: usize,
    /// Percentage of requests that produced a dictionary (0.0 - 100.0)
    pub success_rate: f64,
    pub generated_at: DateTime<Utc>,
}
