//! Candidates from association rules that fire for a user's bookmarks.

use crate::catalog::CatalogIndex;
use crate::models::{AssociationRule, Recommendation, RecommendationSource};
use std::collections::{BTreeSet, HashMap};

/// Recommend consequents of rules whose antecedent the user has fully
/// bookmarked and whose consequent is entirely new to them.
///
/// Each candidate keeps its strongest rule (`confidence * lift`); an equal
/// strength later on does not replace the first. Candidates are ordered by
/// strength descending, then service id ascending. Ids missing from the
/// catalog are skipped.
pub fn rule_recommendations(
    user_bookmarks: &BTreeSet<String>,
    rules: &[AssociationRule],
    catalog: &CatalogIndex,
    k: usize,
) -> Vec<Recommendation> {
    if k == 0 || rules.is_empty() || user_bookmarks.is_empty() {
        return Vec::new();
    }

    let mut best: HashMap<&str, &AssociationRule> = HashMap::new();
    for rule in rules.iter().filter(|r| r.applies_to(user_bookmarks)) {
        for service_id in &rule.consequent {
            best.entry(service_id.as_str())
                .and_modify(|current| {
                    if rule.strength() > current.strength() {
                        *current = rule;
                    }
                })
                .or_insert(rule);
        }
    }

    let mut candidates: Vec<(&str, &AssociationRule)> = best.into_iter().collect();
    candidates.sort_by(|(id_a, a), (id_b, b)| {
        b.strength()
            .total_cmp(&a.strength())
            .then_with(|| id_a.cmp(id_b))
    });

    candidates
        .into_iter()
        .filter_map(|(service_id, rule)| {
            let service = catalog.get(service_id)?;
            Some(Recommendation::new(
                service,
                RecommendationSource::Rule {
                    confidence: rule.confidence,
                    lift: rule.lift,
                    support: rule.support,
                    rule_strength: rule.strength(),
                },
            ))
        })
        .take(k)
        .collect()
}
