//! The recommendation pipeline bound to one catalog.

use super::orchestrator::orchestrate;
use super::random::RandomFallback;
use crate::cache::RuleCache;
use crate::catalog::CatalogIndex;
use crate::config::Config;
use crate::metrics::Metrics;
use crate::mining::{MiningConfig, RuleMiner, RuleSet};
use crate::models::{BookmarkSnapshot, Recommendation};
use std::sync::Arc;

/// Mines rules (through the cache) and builds slates for a fixed catalog.
///
/// Cheap to clone; clones share the catalog, cache and metrics.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    catalog: Arc<CatalogIndex>,
    miner: RuleMiner,
    random: RandomFallback,
    cache: RuleCache,
    metrics: Metrics,
}

impl RecommendationEngine {
    /// Engine with default thresholds, seed 42 and caching disabled.
    pub fn new(catalog: Arc<CatalogIndex>) -> Self {
        Self {
            catalog,
            miner: RuleMiner::default(),
            random: RandomFallback::default(),
            cache: RuleCache::new(0),
            metrics: Metrics::new(),
        }
    }

    pub fn from_config(catalog: Arc<CatalogIndex>, config: &Config, metrics: Metrics) -> Self {
        let mining = MiningConfig {
            min_support: config.min_support,
            min_confidence: config.min_confidence,
            max_transaction_len: config.max_transaction_len,
            ..MiningConfig::default()
        };

        Self::new(catalog)
            .with_miner(RuleMiner::new(mining))
            .with_random(RandomFallback::new(config.random_seed))
            .with_cache(RuleCache::new(config.rule_cache_ttl_seconds))
            .with_metrics(metrics)
    }

    pub fn with_miner(mut self, miner: RuleMiner) -> Self {
        self.miner = miner;
        self
    }

    pub fn with_random(mut self, random: RandomFallback) -> Self {
        self.random = random;
        self
    }

    pub fn with_cache(mut self, cache: RuleCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn catalog(&self) -> &CatalogIndex {
        &self.catalog
    }

    pub fn cache(&self) -> &RuleCache {
        &self.cache
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Rules for `snapshot`, reused from the cache when its fingerprint matches.
    pub fn rules_for(&self, snapshot: &BookmarkSnapshot) -> Arc<RuleSet> {
        let fingerprint = snapshot.fingerprint();

        if let Some(rules) = self.cache.get(fingerprint) {
            self.metrics.record_cache_hit();
            tracing::debug!(rules = rules.len(), "Rule cache hit");
            return rules;
        }
        if self.cache.is_enabled() {
            self.metrics.record_cache_miss();
        }

        let rules = Arc::new(self.miner.mine(snapshot));
        self.metrics.record_rules_mined(rules.len());
        self.cache.insert(fingerprint, rules.clone());
        rules
    }

    /// Up to `top_k` services for `user_id`. Never fails; an unknown user or
    /// a cold-start snapshot falls through to popularity and random picks.
    pub fn recommend(
        &self,
        user_id: &str,
        snapshot: &BookmarkSnapshot,
        top_k: usize,
    ) -> Vec<Recommendation> {
        if top_k == 0 {
            return Vec::new();
        }

        let rules = self.rules_for(snapshot);
        let results = orchestrate(
            user_id,
            snapshot,
            &rules.rules,
            &self.catalog,
            &self.random,
            top_k,
        );

        for rec in &results {
            self.metrics.record_recommendation(&rec.source);
        }

        results
    }
}
