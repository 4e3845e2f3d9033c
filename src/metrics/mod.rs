//! Basic metrics instrumentation for tracking performance.
//!
//! Provides counters for HTTP traffic, rule mining and served recommendations.

use crate::models::RecommendationSource;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector shared by the client and the recommendation engine.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Total number of HTTP requests made
    http_requests_total: Arc<AtomicU64>,

    /// Total number of HTTP errors
    http_errors_total: Arc<AtomicU64>,

    /// Total duration of all HTTP requests in milliseconds
    http_duration_total_ms: Arc<AtomicU64>,

    /// Number of bookmark rows fetched
    bookmarks_fetched_total: Arc<AtomicU64>,

    /// Number of rules produced by mining runs
    rules_mined_total: Arc<AtomicU64>,

    rule_cache_hits: Arc<AtomicU64>,
    rule_cache_misses: Arc<AtomicU64>,

    /// Recommendations served, per source
    rule_recommendations_total: Arc<AtomicU64>,
    popularity_recommendations_total: Arc<AtomicU64>,
    random_recommendations_total: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            http_requests_total: Arc::new(AtomicU64::new(0)),
            http_errors_total: Arc::new(AtomicU64::new(0)),
            http_duration_total_ms: Arc::new(AtomicU64::new(0)),
            bookmarks_fetched_total: Arc::new(AtomicU64::new(0)),
            rules_mined_total: Arc::new(AtomicU64::new(0)),
            rule_cache_hits: Arc::new(AtomicU64::new(0)),
            rule_cache_misses: Arc::new(AtomicU64::new(0)),
            rule_recommendations_total: Arc::new(AtomicU64::new(0)),
            popularity_recommendations_total: Arc::new(AtomicU64::new(0)),
            random_recommendations_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record an HTTP request with duration.
    pub fn record_http_request(&self, duration: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record an HTTP error.
    pub fn record_http_error(&self) {
        self.http_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_bookmarks_fetched(&self, count: usize) {
        self.bookmarks_fetched_total
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_rules_mined(&self, count: usize) {
        self.rules_mined_total
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.rule_cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.rule_cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one served recommendation under its source.
    pub fn record_recommendation(&self, source: &RecommendationSource) {
        let counter = match source {
            RecommendationSource::Rule { .. } => &self.rule_recommendations_total,
            RecommendationSource::Popularity { .. } => &self.popularity_recommendations_total,
            RecommendationSource::Random => &self.random_recommendations_total,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total HTTP requests.
    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP errors.
    pub fn http_errors_total(&self) -> u64 {
        self.http_errors_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP duration in milliseconds.
    pub fn http_duration_total_ms(&self) -> u64 {
        self.http_duration_total_ms.load(Ordering::Relaxed)
    }

    /// Get average HTTP request duration in milliseconds.
    pub fn http_duration_avg_ms(&self) -> f64 {
        let total = self.http_duration_total_ms.load(Ordering::Relaxed);
        let count = self.http_requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    pub fn bookmarks_fetched_total(&self) -> u64 {
        self.bookmarks_fetched_total.load(Ordering::Relaxed)
    }

    pub fn rules_mined_total(&self) -> u64 {
        self.rules_mined_total.load(Ordering::Relaxed)
    }

    pub fn rule_cache_hits(&self) -> u64 {
        self.rule_cache_hits.load(Ordering::Relaxed)
    }

    pub fn rule_cache_misses(&self) -> u64 {
        self.rule_cache_misses.load(Ordering::Relaxed)
    }

    /// Fraction of rule lookups served from cache.
    pub fn rule_cache_hit_rate(&self) -> f64 {
        let hits = self.rule_cache_hits();
        let total = hits + self.rule_cache_misses();
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }

    pub fn rule_recommendations_total(&self) -> u64 {
        self.rule_recommendations_total.load(Ordering::Relaxed)
    }

    pub fn popularity_recommendations_total(&self) -> u64 {
        self.popularity_recommendations_total.load(Ordering::Relaxed)
    }

    pub fn random_recommendations_total(&self) -> u64 {
        self.random_recommendations_total.load(Ordering::Relaxed)
    }

    /// Reset all metrics to zero.
    pub fn reset(&self) {
        for counter in [
            &self.http_requests_total,
            &self.http_errors_total,
            &self.http_duration_total_ms,
            &self.bookmarks_fetched_total,
            &self.rules_mined_total,
            &self.rule_cache_hits,
            &self.rule_cache_misses,
            &self.rule_recommendations_total,
            &self.popularity_recommendations_total,
            &self.random_recommendations_total,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_duration_total_ms: self.http_duration_total_ms(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
            bookmarks_fetched_total: self.bookmarks_fetched_total(),
            rules_mined_total: self.rules_mined_total(),
            rule_cache_hits: self.rule_cache_hits(),
            rule_cache_misses: self.rule_cache_misses(),
            rule_recommendations_total: self.rule_recommendations_total(),
            popularity_recommendations_total: self.popularity_recommendations_total(),
            random_recommendations_total: self.random_recommendations_total(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_total_ms: u64,
    pub http_duration_avg_ms: f64,
    pub bookmarks_fetched_total: u64,
    pub rules_mined_total: u64,
    pub rule_cache_hits: u64,
    pub rule_cache_misses: u64,
    pub rule_recommendations_total: u64,
    pub popularity_recommendations_total: u64,
    pub random_recommendations_total: u64,
}

/// Helper for timing HTTP requests.
pub struct HttpTimer {
    start: Instant,
    metrics: Metrics,
}

impl HttpTimer {
    /// Start timing an HTTP request.
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Complete the timing and record the duration.
    pub fn complete(self) {
        let duration = self.start.elapsed();
        self.metrics.record_http_request(duration);
    }

    /// Complete the timing and record as an error.
    pub fn complete_with_error(self) {
        let duration = self.start.elapsed();
        self.metrics.record_http_request(duration);
        self.metrics.record_http_error();
    }
}
