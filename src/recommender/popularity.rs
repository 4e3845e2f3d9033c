//! Candidates ranked by how often other users bookmarked them.

use crate::catalog::CatalogIndex;
use crate::models::{BookmarkSnapshot, Recommendation, RecommendationSource};
use std::collections::{HashMap, HashSet};

/// Bookmark rows per service, sorted by count descending then id ascending.
///
/// Duplicate rows count once each. Rows belonging to `skip_user` are ignored.
pub fn bookmark_counts(snapshot: &BookmarkSnapshot, skip_user: Option<&str>) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for bookmark in snapshot.bookmarks() {
        if skip_user == Some(bookmark.user_id.as_str()) {
            continue;
        }
        *counts.entry(bookmark.service_id.as_str()).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(id, count)| (id.to_string(), count))
        .collect();
    ranked.sort_by(|(id_a, a), (id_b, b)| b.cmp(a).then_with(|| id_a.cmp(id_b)));
    ranked
}

/// The `k` services other users bookmarked most, skipping the target's own
/// bookmarks, anything in `exclude`, and ids the catalog does not know.
pub fn popularity_recommendations(
    snapshot: &BookmarkSnapshot,
    user_id: &str,
    exclude: &HashSet<String>,
    catalog: &CatalogIndex,
    k: usize,
) -> Vec<Recommendation> {
    if k == 0 {
        return Vec::new();
    }

    let own = snapshot.user_bookmarks(user_id);

    bookmark_counts(snapshot, Some(user_id))
        .into_iter()
        .filter(|(id, _)| !own.contains(id) && !exclude.contains(id))
        .filter_map(|(id, count)| {
            let service = catalog.get(&id)?;
            Some(Recommendation::new(
                service,
                RecommendationSource::Popularity {
                    bookmark_count: count,
                },
            ))
        })
        .take(k)
        .collect()
}
