//! Association rule mining over user bookmark sets.
//!
//! Every user is one transaction (the set of services they bookmarked).
//! Frequent itemsets are found with Apriori and split into rules carrying
//! support, confidence and lift. Rules are derived per snapshot and never
//! persisted.

pub mod apriori;
pub mod rules;
pub mod transactions;

pub use apriori::{frequent_itemsets, Itemset, MAX_ITEMSET_LEN};
pub use rules::generate_rules;
pub use transactions::TransactionSet;

use crate::models::{AssociationRule, BookmarkSnapshot};
use chrono::{DateTime, Utc};

/// Thresholds for rule mining.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MiningConfig {
    /// Minimum fraction of transactions an itemset must appear in (default: 0.02)
    pub min_support: f64,

    /// Minimum rule confidence (default: 0.1)
    pub min_confidence: f64,

    /// Largest itemset Apriori will build (default: 4, at most [`MAX_ITEMSET_LEN`])
    pub max_itemset_len: usize,

    /// Users with more bookmarks than this are left out of mining (default: 50)
    pub max_transaction_len: usize,

    /// Candidate ceiling per Apriori level from triples on (default: 5000)
    pub max_candidates_per_level: usize,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            min_support: 0.02,
            min_confidence: 0.1,
            max_itemset_len: 4,
            max_transaction_len: 50,
            max_candidates_per_level: 5_000,
        }
    }
}

/// The rules mined from one bookmark snapshot.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub rules: Vec<AssociationRule>,

    /// Transactions that took part (users with two or more bookmarks)
    pub transaction_count: usize,

    /// Users left out for holding more than `max_transaction_len` bookmarks
    pub skipped_transactions: usize,

    pub frequent_itemset_count: usize,

    pub mined_at: DateTime<Utc>,
}

impl RuleSet {
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            transaction_count: 0,
            skipped_transactions: 0,
            frequent_itemset_count: 0,
            mined_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Mines association rules from bookmark snapshots.
#[derive(Debug, Clone, Default)]
pub struct RuleMiner {
    config: MiningConfig,
}

impl RuleMiner {
    pub fn new(mut config: MiningConfig) -> Self {
        config.max_itemset_len = config.max_itemset_len.min(MAX_ITEMSET_LEN);
        Self { config }
    }

    pub fn config(&self) -> &MiningConfig {
        &self.config
    }

    /// Mine rules from a snapshot.
    ///
    /// Returns an empty set when fewer than two users exist or fewer than two
    /// users have two or more bookmarks; that is the normal cold-start state.
    /// Users above `max_transaction_len` bookmarks are not mined.
    pub fn mine(&self, snapshot: &BookmarkSnapshot) -> RuleSet {
        let (transactions, skipped) =
            TransactionSet::from_snapshot_bounded(snapshot, self.config.max_transaction_len);

        if snapshot.user_count() < 2 || transactions.len() < 2 {
            tracing::debug!(
                users = snapshot.user_count(),
                transactions = transactions.len(),
                "Not enough data to mine rules"
            );
            return RuleSet {
                transaction_count: transactions.len(),
                skipped_transactions: skipped,
                ..RuleSet::empty()
            };
        }

        let frequent = frequent_itemsets(
            &transactions,
            self.config.min_support,
            self.config.max_itemset_len,
            self.config.max_candidates_per_level,
        );
        let rules = generate_rules(&transactions, &frequent, self.config.min_confidence);

        tracing::debug!(
            transactions = transactions.len(),
            skipped,
            items = transactions.item_count(),
            frequent_itemsets = frequent.len(),
            rules = rules.len(),
            "Rule mining complete"
        );

        RuleSet {
            rules,
            transaction_count: transactions.len(),
            skipped_transactions: skipped,
            frequent_itemset_count: frequent.len(),
            mined_at: Utc::now(),
        }
    }
}
