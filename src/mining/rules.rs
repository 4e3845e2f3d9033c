//! Association rule generation from frequent itemsets.

use super::apriori::{Itemset, MAX_ITEMSET_LEN};
use super::transactions::TransactionSet;
use crate::models::AssociationRule;
use std::collections::{BTreeMap, BTreeSet};

const CONFIDENCE_EPSILON: f64 = 1e-12;

/// Split every frequent itemset of two or more items into every
/// antecedent/consequent pair and keep the pairs meeting `min_confidence`.
///
/// Rules come out ordered by itemset size, then itemset, then antecedent mask.
pub fn generate_rules(
    transactions: &TransactionSet,
    frequent: &BTreeMap<Itemset, usize>,
    min_confidence: f64,
) -> Vec<AssociationRule> {
    let n = transactions.len() as f64;
    if n == 0.0 {
        return Vec::new();
    }

    let mut itemsets: Vec<(&Itemset, usize)> = frequent
        .iter()
        .filter(|(itemset, _)| (2..=MAX_ITEMSET_LEN).contains(&itemset.len()))
        .map(|(itemset, &count)| (itemset, count))
        .collect();
    itemsets.sort_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

    let mut rules = Vec::new();
    for (itemset, count) in itemsets {
        let full_mask: u32 = (1 << itemset.len()) - 1;

        for mask in 1..full_mask {
            let (antecedent, consequent) = split(itemset, mask);

            // Downward closure guarantees both halves are frequent.
            let (Some(&antecedent_count), Some(&consequent_count)) =
                (frequent.get(&antecedent), frequent.get(&consequent))
            else {
                continue;
            };

            let confidence = count as f64 / antecedent_count as f64;
            if confidence + CONFIDENCE_EPSILON < min_confidence {
                continue;
            }

            let consequent_support = consequent_count as f64 / n;
            let lift = confidence / consequent_support;

            rules.push(AssociationRule {
                antecedent: names(transactions, &antecedent),
                consequent: names(transactions, &consequent),
                support: count as f64 / n,
                confidence,
                lift,
            });
        }
    }

    rules
}

fn split(itemset: &[u32], mask: u32) -> (Itemset, Itemset) {
    let mut antecedent = Vec::new();
    let mut consequent = Vec::new();
    for (pos, &item) in itemset.iter().enumerate() {
        if mask & (1 << pos) != 0 {
            antecedent.push(item);
        } else {
            consequent.push(item);
        }
    }
    (antecedent, consequent)
}

fn names(transactions: &TransactionSet, itemset: &[u32]) -> BTreeSet<String> {
    itemset
        .iter()
        .map(|&id| transactions.item(id).to_string())
        .collect()
}
