//! Transaction encoding for itemset mining.

use crate::models::BookmarkSnapshot;
use std::collections::{BTreeSet, HashMap};

/// Per-user bookmark sets with service ids interned to dense integers.
///
/// Only transactions with at least two items are kept; a single bookmark
/// cannot support an `antecedent -> consequent` rule. Items are numbered in
/// sorted id order, so every encoded transaction is sorted ascending.
#[derive(Debug, Clone, Default)]
pub struct TransactionSet {
    items: Vec<String>,
    transactions: Vec<Vec<u32>>,
}

impl TransactionSet {
    pub const MIN_TRANSACTION_LEN: usize = 2;

    pub fn from_snapshot(snapshot: &BookmarkSnapshot) -> Self {
        Self::from_sets(snapshot.by_user().values())
    }

    /// Like [`from_snapshot`](Self::from_snapshot), but users holding more than
    /// `max_len` bookmarks are skipped. Returns the set and the skip count.
    pub fn from_snapshot_bounded(snapshot: &BookmarkSnapshot, max_len: usize) -> (Self, usize) {
        let mut skipped = 0;
        let sets: Vec<&BTreeSet<String>> = snapshot
            .by_user()
            .iter()
            .filter_map(|(user_id, set)| {
                if set.len() > max_len {
                    tracing::warn!(
                        user_id = user_id.as_str(),
                        bookmarks = set.len(),
                        max_len,
                        "Skipping oversized transaction in rule mining"
                    );
                    skipped += 1;
                    None
                } else {
                    Some(set)
                }
            })
            .collect();

        (Self::from_sets(sets), skipped)
    }

    pub fn from_sets<'a>(sets: impl IntoIterator<Item = &'a BTreeSet<String>>) -> Self {
        let kept: Vec<&BTreeSet<String>> = sets
            .into_iter()
            .filter(|set| set.len() >= Self::MIN_TRANSACTION_LEN)
            .collect();

        let vocabulary: BTreeSet<&String> = kept.iter().flat_map(|set| set.iter()).collect();
        let items: Vec<String> = vocabulary.into_iter().cloned().collect();
        let ids: HashMap<&str, u32> = items
            .iter()
            .enumerate()
            .map(|(i, item)| (item.as_str(), i as u32))
            .collect();

        let transactions = kept
            .iter()
            .map(|set| set.iter().map(|item| ids[item.as_str()]).collect())
            .collect();

        Self {
            items,
            transactions,
        }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn item(&self, id: u32) -> &str {
        &self.items[id as usize]
    }

    pub fn transactions(&self) -> &[Vec<u32>] {
        &self.transactions
    }
}
