//! Bookmark rows and the per-request snapshot built from them.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, BTreeSet};
use std::hash::{Hash, Hasher};

/// Treat a JSON `null` as an empty string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One user/service bookmark as stored in the `wishlists` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Bookmark {
    #[serde(deserialize_with = "null_as_empty")]
    pub user_id: String,

    #[serde(deserialize_with = "null_as_empty")]
    pub service_id: String,

    /// Opaque listing summary written by the id assigner; ignored by the engine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_data: Option<serde_json::Value>,
}

impl Bookmark {
    pub fn new(user_id: impl Into<String>, service_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            service_id: service_id.into(),
            service_data: None,
        }
    }
}

/// An immutable view of every bookmark at one point in time.
///
/// Rows with an empty user or service id are discarded on construction.
/// Duplicate rows are kept in [`bookmarks`](Self::bookmarks) (popularity counts
/// them) but collapse in the per-user sets.
#[derive(Debug, Clone, Default)]
pub struct BookmarkSnapshot {
    bookmarks: Vec<Bookmark>,
    by_user: BTreeMap<String, BTreeSet<String>>,
    fingerprint: u64,
}

impl BookmarkSnapshot {
    pub fn new(bookmarks: Vec<Bookmark>) -> Self {
        let bookmarks: Vec<Bookmark> = bookmarks
            .into_iter()
            .filter(|b| !b.user_id.trim().is_empty() && !b.service_id.trim().is_empty())
            .collect();

        let mut by_user: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for bookmark in &bookmarks {
            by_user
                .entry(bookmark.user_id.clone())
                .or_default()
                .insert(bookmark.service_id.clone());
        }

        let fingerprint = Self::compute_fingerprint(&bookmarks);

        Self {
            bookmarks,
            by_user,
            fingerprint,
        }
    }

    /// Build a snapshot from `(user_id, service_id)` pairs.
    pub fn from_pairs<U, S>(pairs: impl IntoIterator<Item = (U, S)>) -> Self
    where
        U: Into<String>,
        S: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(user, service)| Bookmark::new(user, service))
                .collect(),
        )
    }

    /// Order-independent hash of the rows; changes whenever the data does.
    fn compute_fingerprint(bookmarks: &[Bookmark]) -> u64 {
        let mut pairs: Vec<(&str, &str)> = bookmarks
            .iter()
            .map(|b| (b.user_id.as_str(), b.service_id.as_str()))
            .collect();
        pairs.sort_unstable();

        let mut hasher = DefaultHasher::new();
        pairs.hash(&mut hasher);
        hasher.finish()
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Distinct services a user has bookmarked (empty if the user is unknown).
    pub fn user_bookmarks(&self, user_id: &str) -> BTreeSet<String> {
        self.by_user.get(user_id).cloned().unwrap_or_default()
    }

    /// `user_id -> bookmarked service ids`, sorted by user.
    pub fn by_user(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.by_user
    }

    /// Distinct user ids, sorted.
    pub fn user_ids(&self) -> Vec<String> {
        self.by_user.keys().cloned().collect()
    }

    pub fn user_count(&self) -> usize {
        self.by_user.len()
    }
}
