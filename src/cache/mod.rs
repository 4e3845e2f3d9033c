//! Caching utilities for the service recommender.
//!
//! This module provides a single-slot rule cache keyed by snapshot fingerprint
//! with TTL support.

pub mod rule_cache;

pub use rule_cache::RuleCache;
