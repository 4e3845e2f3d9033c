//! Seeded random fill for slates the other strategies cannot complete.

use crate::catalog::CatalogIndex;
use crate::models::{Recommendation, RecommendationSource};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

pub const DEFAULT_SEED: u64 = 42;

/// Samples catalog entries uniformly without replacement.
///
/// A fresh RNG is seeded on every call, so the same seed, exclusions and
/// catalog always produce the same sequence.
#[derive(Debug, Clone, Copy)]
pub struct RandomFallback {
    seed: u64,
}

impl Default for RandomFallback {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RandomFallback {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Up to `n` services not in `exclude`. Returns every eligible service
    /// when fewer than `n` remain.
    pub fn sample(
        &self,
        catalog: &CatalogIndex,
        exclude: &HashSet<String>,
        n: usize,
    ) -> Vec<Recommendation> {
        if n == 0 {
            return Vec::new();
        }

        let eligible: Vec<_> = catalog
            .iter()
            .filter(|service| !exclude.contains(&service.service_id))
            .collect();

        let amount = n.min(eligible.len());
        let mut rng = StdRng::seed_from_u64(self.seed);

        rand::seq::index::sample(&mut rng, eligible.len(), amount)
            .into_iter()
            .map(|i| Recommendation::new(eligible[i], RecommendationSource::Random))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Service};

    fn catalog(count: usize) -> CatalogIndex {
        CatalogIndex::from_services((0..count).map(|i| Service {
            service_id: format!("coworking_{:04}_0000abcd", i),
            name: format!("Desk {}", i),
            category: Category::Coworking,
            area: String::new(),
            rating: 3.5,
            price: 300.0,
        }))
    }

    fn ids(recs: &[Recommendation]) -> Vec<String> {
        recs.iter().map(|r| r.service_id.clone()).collect()
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let catalog = catalog(30);
        let exclude: HashSet<String> = ["coworking_0003_0000abcd".to_string()].into_iter().collect();

        let first = RandomFallback::new(7).sample(&catalog, &exclude, 5);
        let second = RandomFallback::new(7).sample(&catalog, &exclude, 5);
        assert_eq!(ids(&first), ids(&second));
        assert_eq!(first.len(), 5);
    }

    #[test]
    fn test_no_duplicates_and_no_excluded() {
        let catalog = catalog(10);
        let exclude: HashSet<String> = (0..5)
            .map(|i| format!("coworking_{:04}_0000abcd", i))
            .collect();

        let recs = RandomFallback::default().sample(&catalog, &exclude, 5);
        let unique: HashSet<String> = ids(&recs).into_iter().collect();
        assert_eq!(unique.len(), 5);
        assert!(unique.is_disjoint(&exclude));
        assert!(recs
            .iter()
            .all(|r| r.source == RecommendationSource::Random));
    }

    #[test]
    fn test_fewer_eligible_than_requested() {
        let catalog = catalog(3);
        let recs = RandomFallback::default().sample(&catalog, &HashSet::new(), 10);
        assert_eq!(recs.len(), 3);
    }

    #[test]
    fn test_empty_catalog_and_zero_request() {
        let fallback = RandomFallback::default();
        assert!(fallback.sample(&CatalogIndex::default(), &HashSet::new(), 4).is_empty());
        assert!(fallback.sample(&catalog(4), &HashSet::new(), 0).is_empty());
    }
}
