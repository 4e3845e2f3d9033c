//! Association rules mined from co-bookmarking patterns.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// `antecedent -> consequent` with the usual market-basket measures.
///
/// Both sides are non-empty and disjoint. `support` is the fraction of
/// transactions containing both sides, `confidence` is
/// `support(A ∪ C) / support(A)` and `lift` is `confidence / support(C)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationRule {
    pub antecedent: BTreeSet<String>,
    pub consequent: BTreeSet<String>,
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
}

impl AssociationRule {
    /// Score used to rank rule-based candidates.
    pub fn strength(&self) -> f64 {
        self.confidence * self.lift
    }

    /// True when the rule fires for `bookmarks` and would suggest something new.
    pub fn applies_to(&self, bookmarks: &BTreeSet<String>) -> bool {
        self.antecedent.is_subset(bookmarks) && self.consequent.is_disjoint(bookmarks)
    }
}
