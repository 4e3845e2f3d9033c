//! Combines the rule, popularity and random stages into one slate.

use super::popularity::popularity_recommendations;
use super::random::RandomFallback;
use super::rule_based::rule_recommendations;
use crate::catalog::CatalogIndex;
use crate::models::{AssociationRule, BookmarkSnapshot, Recommendation, RecommendationSource};
use std::collections::HashSet;

/// Build a slate of at most `k` services for `user_id`.
///
/// Stages run in order until the slate is full: association rules, then
/// popularity among other users, then seeded random picks. The user's own
/// bookmarks never appear. The result is ranked by source and, within a
/// source, by that source's metric.
pub fn orchestrate(
    user_id: &str,
    snapshot: &BookmarkSnapshot,
    rules: &[AssociationRule],
    catalog: &CatalogIndex,
    random: &RandomFallback,
    k: usize,
) -> Vec<Recommendation> {
    if k == 0 {
        return Vec::new();
    }

    let user_bookmarks = snapshot.user_bookmarks(user_id);

    let mut results = rule_recommendations(&user_bookmarks, rules, catalog, k);
    let rule_count = results.len();

    if results.len() < k {
        let chosen = chosen_ids(&results);
        let popular =
            popularity_recommendations(snapshot, user_id, &chosen, catalog, k - results.len());
        results.extend(popular);
    }
    let popularity_count = results.len() - rule_count;

    if results.len() < k {
        let mut exclude = chosen_ids(&results);
        exclude.extend(user_bookmarks.iter().cloned());
        results.extend(random.sample(catalog, &exclude, k - results.len()));
    }

    tracing::debug!(
        user_id,
        rule = rule_count,
        popularity = popularity_count,
        random = results.len() - rule_count - popularity_count,
        "Recommendation stages complete"
    );

    rank(&mut results);
    results.truncate(k);
    results
}

fn chosen_ids(results: &[Recommendation]) -> HashSet<String> {
    results.iter().map(|r| r.service_id.clone()).collect()
}

/// Stable sort by source priority, then the source's metric descending.
pub fn rank(results: &mut [Recommendation]) {
    results.sort_by(|a, b| {
        a.source
            .priority()
            .cmp(&b.source.priority())
            .then_with(|| metric(b).total_cmp(&metric(a)))
    });
}

fn metric(rec: &Recommendation) -> f64 {
    match rec.source {
        RecommendationSource::Rule { rule_strength, .. } => rule_strength,
        RecommendationSource::Popularity { bookmark_count } => bookmark_count as f64,
        RecommendationSource::Random => rec.rating,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Service};

    fn catalog(ids: &[(&str, f64)]) -> CatalogIndex {
        CatalogIndex::from_services(ids.iter().map(|(id, rating)| Service {
            service_id: id.to_string(),
            name: id.to_string(),
            category: Category::Accommodation,
            area: "kothrud".to_string(),
            rating: *rating,
            price: 9000.0,
        }))
    }

    fn rule(antecedent: &[&str], consequent: &[&str], confidence: f64, lift: f64) -> AssociationRule {
        AssociationRule {
            antecedent: antecedent.iter().map(|s| s.to_string()).collect(),
            consequent: consequent.iter().map(|s| s.to_string()).collect(),
            support: 0.5,
            confidence,
            lift,
        }
    }

    #[test]
    fn test_zero_k_is_empty() {
        let catalog = catalog(&[("a", 1.0)]);
        let recs = orchestrate(
            "u1",
            &BookmarkSnapshot::default(),
            &[],
            &catalog,
            &RandomFallback::default(),
            0,
        );
        assert!(recs.is_empty());
    }

    #[test]
    fn test_stages_fill_in_order() {
        let catalog = catalog(&[("x", 1.0), ("y", 2.0), ("z", 3.0), ("p", 4.0), ("r1", 1.5), ("r2", 4.5)]);
        let snapshot = BookmarkSnapshot::from_pairs([
            ("target", "x"),
            ("u1", "x"),
            ("u1", "z"),
            ("u2", "p"),
            ("u3", "p"),
        ]);
        let rules = vec![rule(&["x"], &["z"], 1.0, 2.0)];

        let recs = orchestrate("target", &snapshot, &rules, &catalog, &RandomFallback::default(), 5);

        assert_eq!(recs.len(), 5);
        assert_eq!(recs[0].service_id, "z");
        assert!(recs[0].is_rule());
        // x is owned and z already chosen, so only p is left to count.
        assert_eq!(recs[1].service_id, "p");
        assert_eq!(recs[1].bookmark_count(), Some(2));
        // Remaining three are random, ordered by rating.
        let random: Vec<&Recommendation> = recs[2..].iter().collect();
        assert!(random.iter().all(|r| r.source == RecommendationSource::Random));
        assert!(random.windows(2).all(|w| w[0].rating >= w[1].rating));
        assert!(recs.iter().all(|r| r.service_id != "x"));
    }

    #[test]
    fn test_popularity_ranks_before_random() {
        let catalog = catalog(&[("a", 3.0), ("b", 3.0)]);
        let mut recs = vec![
            Recommendation::new(catalog.get("a").unwrap(), RecommendationSource::Random),
            Recommendation::new(
                catalog.get("b").unwrap(),
                RecommendationSource::Popularity { bookmark_count: 1 },
            ),
        ];
        rank(&mut recs);
        assert_eq!(recs[0].service_id, "b");
        assert_eq!(recs[1].service_id, "a");
    }

    #[test]
    fn test_small_catalog_returns_what_exists() {
        let catalog = catalog(&[("a", 1.0), ("b", 2.0), ("c", 3.0), ("mine", 5.0)]);
        let snapshot = BookmarkSnapshot::from_pairs([("target", "mine")]);

        let recs = orchestrate("target", &snapshot, &[], &catalog, &RandomFallback::default(), 5);
        assert_eq!(recs.len(), 3);
        assert!(recs.iter().all(|r| r.service_id != "mine"));
    }
}
