//! Behavioral properties of the full recommendation pipeline.

mod fixtures;

use fixtures::{catalog_of, numbered_catalog, snapshot};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use service_recommender::models::{BookmarkSnapshot, RecommendationSource};
use service_recommender::{RandomFallback, RecommendationEngine, RuleMiner};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

fn engine(catalog: service_recommender::CatalogIndex) -> RecommendationEngine {
    RecommendationEngine::new(Arc::new(catalog))
}

/// Nine users bookmark X, Y and Z; user A bookmarks only X and Y.
fn co_bookmark_pairs(with_unrelated_users: bool) -> Vec<(String, String)> {
    let mut pairs = vec![
        ("A".to_string(), "X".to_string()),
        ("A".to_string(), "Y".to_string()),
    ];
    for i in 0..9 {
        for item in ["X", "Y", "Z"] {
            pairs.push((format!("u{}", i), item.to_string()));
        }
    }
    if with_unrelated_users {
        for user in ["v1", "v2"] {
            pairs.push((user.to_string(), "P".to_string()));
            pairs.push((user.to_string(), "Q".to_string()));
        }
    }
    pairs
}

#[test]
fn test_co_bookmarked_item_is_top_rule_recommendation() {
    let snap = BookmarkSnapshot::from_pairs(co_bookmark_pairs(true));

    let antecedent: BTreeSet<String> = ["X", "Y"].iter().map(|s| s.to_string()).collect();
    let consequent: BTreeSet<String> = ["Z"].iter().map(|s| s.to_string()).collect();

    let rules = RuleMiner::default().mine(&snap);
    let rule = rules
        .rules
        .iter()
        .find(|r| r.antecedent == antecedent && r.consequent == consequent)
        .expect("rule {X,Y} -> {Z}");
    assert!(rule.confidence >= 0.9 - 1e-9);
    assert!(rule.lift > 1.0);

    let engine = engine(catalog_of(&["X", "Y", "Z", "P", "Q"]));
    let recs = engine.recommend("A", &snap, 5);
    assert_eq!(recs[0].service_id, "Z");
    assert!(recs[0].is_rule());
}

#[test]
fn test_co_bookmark_without_unrelated_users() {
    // Z appears in nine of ten transactions, so lift is exactly 1 here.
    let snap = BookmarkSnapshot::from_pairs(co_bookmark_pairs(false));

    let rules = RuleMiner::default().mine(&snap);
    let rule = rules
        .rules
        .iter()
        .find(|r| r.antecedent.len() == 2 && r.consequent.contains("Z"))
        .expect("rule {X,Y} -> {Z}");
    assert!(rule.confidence >= 0.9 - 1e-9);
    assert!(rule.lift >= 1.0 - 1e-9);

    let recs = engine(catalog_of(&["X", "Y", "Z"])).recommend("A", &snap, 5);
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].service_id, "Z");
    assert!(recs[0].is_rule());
}

#[test]
fn test_widely_bookmarked_service_ranks_first() {
    let mut pairs: Vec<(String, String)> = Vec::new();
    for i in 0..20 {
        pairs.push((format!("u{:02}", i), format!("s{:02}", i)));
        if i < 15 {
            pairs.push((format!("u{:02}", i), "P".to_string()));
        }
    }
    let snap = BookmarkSnapshot::from_pairs(pairs);

    let mut ids: Vec<String> = (0..20).map(|i| format!("s{:02}", i)).collect();
    ids.push("P".to_string());
    let id_refs: Vec<&str> = ids.iter().map(|s| s.as_str()).collect();

    let recs = engine(catalog_of(&id_refs)).recommend("u19", &snap, 5);

    assert_eq!(recs[0].service_id, "P");
    assert_eq!(recs[0].bookmark_count(), Some(15));
    assert!(recs[1..]
        .iter()
        .all(|r| r.bookmark_count().map_or(true, |count| count < 15)));
}

#[test]
fn test_returns_only_what_is_eligible() {
    let snap = snapshot(&[("target", "a")]);
    let recs = engine(catalog_of(&["a", "b", "c", "d"])).recommend("target", &snap, 5);

    assert_eq!(recs.len(), 3);
    assert!(recs.iter().all(|r| r.service_id != "a"));
}

#[test]
fn test_sparse_data_yields_no_rule_items() {
    // Only one user has two or more bookmarks.
    let snap = snapshot(&[("u1", "s01"), ("u1", "s02"), ("u2", "s01"), ("u3", "s03")]);
    let recs = engine(numbered_catalog(10)).recommend("u2", &snap, 5);

    assert_eq!(recs.len(), 5);
    assert!(recs.iter().all(|r| !r.is_rule()));
}

#[test]
fn test_same_seed_same_random_fill() {
    let snap = snapshot(&[("u1", "s03")]);
    let first = engine(numbered_catalog(40))
        .with_random(RandomFallback::new(9))
        .recommend("u1", &snap, 8);
    let second = engine(numbered_catalog(40))
        .with_random(RandomFallback::new(9))
        .recommend("u1", &snap, 8);

    let ids = |recs: &[service_recommender::Recommendation]| -> Vec<String> {
        recs.iter().map(|r| r.service_id.clone()).collect()
    };
    assert_eq!(ids(&first), ids(&second));
    assert!(first.iter().all(|r| r.source == RecommendationSource::Random));
}

#[test]
fn test_random_snapshots_respect_bounds() {
    let catalog = numbered_catalog(25);
    let engine = engine(catalog);
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..30 {
        let users = rng.gen_range(0..12);
        let mut pairs = Vec::new();
        for u in 0..users {
            for _ in 0..rng.gen_range(0..6) {
                // Some ids fall outside the catalog on purpose.
                pairs.push((format!("u{}", u), format!("s{:02}", rng.gen_range(0..30))));
            }
        }
        let snap = BookmarkSnapshot::from_pairs(pairs);

        for user in ["u0", "u3", "nobody"] {
            let k = rng.gen_range(0..10);
            let recs = engine.recommend(user, &snap, k);
            let owned = snap.user_bookmarks(user);

            assert!(recs.len() <= k);
            let unique: HashSet<&str> = recs.iter().map(|r| r.service_id.as_str()).collect();
            assert_eq!(unique.len(), recs.len());
            assert!(recs.iter().all(|r| !owned.contains(&r.service_id)));
            assert!(recs.iter().all(|r| (0.0..=5.0).contains(&r.rating)));
            // Sources come out grouped in priority order.
            assert!(recs
                .windows(2)
                .all(|w| w[0].source.priority() <= w[1].source.priority()));
        }
    }
}

#[test]
fn test_placeholder_user_does_not_stall_recommendations() {
    // Each catalog is seeded with one user holding every listing.
    let mut pairs: Vec<(String, String)> = (0..500)
        .map(|i| ("system".to_string(), format!("s{:03}", i)))
        .collect();
    for user in ["u1", "u2"] {
        pairs.push((user.to_string(), "s000".to_string()));
        pairs.push((user.to_string(), "s001".to_string()));
    }
    pairs.push(("u3".to_string(), "s000".to_string()));
    let snap = BookmarkSnapshot::from_pairs(pairs);

    let ids: Vec<String> = (0..500).map(|i| format!("s{:03}", i)).collect();
    let id_refs: Vec<&str> = ids.iter().map(|s| s.as_str()).collect();
    let engine = engine(catalog_of(&id_refs));

    let started = std::time::Instant::now();
    let recs = engine.recommend("u3", &snap, 5);

    assert!(started.elapsed() < std::time::Duration::from_secs(1));
    assert_eq!(recs.len(), 5);
    assert_eq!(recs[0].service_id, "s001");
    assert!(recs[0].is_rule());
}
