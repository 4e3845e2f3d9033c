//! Level-wise frequent itemset search (Apriori).

use super::transactions::TransactionSet;
use std::collections::{BTreeMap, HashSet};

/// Sorted, de-duplicated item ids.
pub type Itemset = Vec<u32>;

/// Tolerance for comparing a support fraction against its threshold.
const SUPPORT_EPSILON: f64 = 1e-9;

/// Hard ceiling on itemset length. Rule generation enumerates splits with a
/// `u32` bit mask.
pub const MAX_ITEMSET_LEN: usize = 16;

/// Every itemset of length `1..=max_len` whose support is at least `min_support`,
/// mapped to the number of transactions containing it.
///
/// Pairs are counted straight from the transactions. From triples on, a level
/// whose candidate count would exceed `max_candidates` is not built and the
/// search stops with the levels found so far.
pub fn frequent_itemsets(
    transactions: &TransactionSet,
    min_support: f64,
    max_len: usize,
    max_candidates: usize,
) -> BTreeMap<Itemset, usize> {
    let mut frequent = BTreeMap::new();
    let n = transactions.len();
    let max_len = max_len.min(MAX_ITEMSET_LEN);
    if n == 0 || max_len == 0 {
        return frequent;
    }

    let min_count = min_support * n as f64 - SUPPORT_EPSILON;
    let is_frequent = |count: usize| count > 0 && count as f64 >= min_count;

    let mut singles = vec![0usize; transactions.item_count()];
    for transaction in transactions.transactions() {
        for &item in transaction {
            singles[item as usize] += 1;
        }
    }

    for (item, &count) in singles.iter().enumerate() {
        if is_frequent(count) {
            frequent.insert(vec![item as u32], count);
        }
    }

    if max_len < 2 {
        return frequent;
    }

    let mut pairs: BTreeMap<Itemset, usize> = BTreeMap::new();
    for transaction in transactions.transactions() {
        let kept: Vec<u32> = transaction
            .iter()
            .copied()
            .filter(|&item| is_frequent(singles[item as usize]))
            .collect();
        for (pos, &left) in kept.iter().enumerate() {
            for &right in &kept[pos + 1..] {
                *pairs.entry(vec![left, right]).or_insert(0) += 1;
            }
        }
    }

    let mut level: Vec<Itemset> = Vec::new();
    for (pair, count) in pairs {
        if is_frequent(count) {
            frequent.insert(pair.clone(), count);
            level.push(pair);
        }
    }

    let mut size = 2;
    while !level.is_empty() && size < max_len {
        let Some(candidates) = generate_candidates(&level, max_candidates) else {
            tracing::warn!(
                size = size + 1,
                max_candidates,
                "Apriori candidate limit reached, keeping smaller itemsets"
            );
            break;
        };
        size += 1;

        let mut next = Vec::new();
        for candidate in candidates {
            let count = transactions
                .transactions()
                .iter()
                .filter(|t| is_sorted_subset(&candidate, t))
                .count();
            if is_frequent(count) {
                frequent.insert(candidate.clone(), count);
                next.push(candidate);
            }
        }

        tracing::trace!(size, itemsets = next.len(), "Apriori level complete");
        level = next;
    }

    frequent
}

/// Join itemsets that share all but their last item, then drop any candidate
/// with an infrequent subset. `level` must be sorted. `None` once more than
/// `limit` candidates turn up.
fn generate_candidates(level: &[Itemset], limit: usize) -> Option<Vec<Itemset>> {
    let known: HashSet<&Itemset> = level.iter().collect();
    let mut candidates = Vec::new();

    for (i, left) in level.iter().enumerate() {
        let prefix = &left[..left.len() - 1];
        for right in &level[i + 1..] {
            if &right[..right.len() - 1] != prefix {
                break;
            }

            let mut candidate = left.clone();
            candidate.push(right[right.len() - 1]);

            let all_subsets_frequent = (0..candidate.len()).all(|skip| {
                let subset: Itemset = candidate
                    .iter()
                    .enumerate()
                    .filter(|&(pos, _)| pos != skip)
                    .map(|(_, &item)| item)
                    .collect();
                known.contains(&subset)
            });

            if all_subsets_frequent {
                if candidates.len() == limit {
                    return None;
                }
                candidates.push(candidate);
            }
        }
    }

    Some(candidates)
}

/// `needle ⊆ haystack` for two ascending slices.
fn is_sorted_subset(needle: &[u32], haystack: &[u32]) -> bool {
    let mut rest = haystack.iter();
    needle
        .iter()
        .all(|item| rest.by_ref().any(|candidate| candidate == item))
}
