//! Recommendation records returned to callers.

use super::service::{Category, Service};
use serde::{Deserialize, Serialize};

/// Which strategy produced a recommendation, with that strategy's evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum RecommendationSource {
    /// Mined from an association rule.
    Rule {
        confidence: f64,
        lift: f64,
        support: f64,
        rule_strength: f64,
    },

    /// Bookmarked often by other users.
    Popularity { bookmark_count: usize },

    /// Sampled at random to fill the slate.
    Random,
}

impl RecommendationSource {
    /// Rank of the strategy in the final slate (lower comes first).
    pub fn priority(&self) -> u8 {
        match self {
            RecommendationSource::Rule { .. } => 0,
            RecommendationSource::Popularity { .. } => 1,
            RecommendationSource::Random => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecommendationSource::Rule { .. } => "rule",
            RecommendationSource::Popularity { .. } => "popularity",
            RecommendationSource::Random => "random",
        }
    }
}

/// A recommended service, denormalized for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub service_id: String,
    pub name: String,
    pub category: Category,
    pub area: String,
    pub rating: f64,
    pub price: f64,
    pub image: String,

    #[serde(flatten)]
    pub source: RecommendationSource,
}

impl Recommendation {
    pub fn new(service: &Service, source: RecommendationSource) -> Self {
        Self {
            service_id: service.service_id.clone(),
            name: service.name.clone(),
            category: service.category,
            area: service.area.clone(),
            rating: service.rating,
            price: service.price,
            image: service.category.image_url().to_string(),
            source,
        }
    }

    pub fn is_rule(&self) -> bool {
        matches!(self.source, RecommendationSource::Rule { .. })
    }

    pub fn rule_strength(&self) -> Option<f64> {
        match self.source {
            RecommendationSource::Rule { rule_strength, .. } => Some(rule_strength),
            _ => None,
        }
    }

    pub fn bookmark_count(&self) -> Option<usize> {
        match self.source {
            RecommendationSource::Popularity { bookmark_count } => Some(bookmark_count),
            _ => None,
        }
    }
}
