//! Bookmark popularity summary.

use super::popularity::bookmark_counts;
use crate::catalog::CatalogIndex;
use crate::models::BookmarkSnapshot;
use serde::Serialize;

const TOP_SERVICES: usize = 10;

/// One service and how many bookmark rows point at it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceCount {
    pub service_id: String,
    pub bookmark_count: usize,

    /// Display name when the catalog knows the id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Counts over every bookmark row in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct PopularityStats {
    pub total_bookmarks: usize,
    pub unique_services: usize,
    pub most_popular_service: Option<String>,
    pub max_bookmarks: usize,
    pub top_services: Vec<ServiceCount>,
}

impl PopularityStats {
    pub fn from_snapshot(snapshot: &BookmarkSnapshot, catalog: &CatalogIndex) -> Self {
        let counts = bookmark_counts(snapshot, None);

        let top_services = counts
            .iter()
            .take(TOP_SERVICES)
            .map(|(id, count)| ServiceCount {
                service_id: id.clone(),
                bookmark_count: *count,
                name: catalog.get(id).map(|s| s.name.clone()),
            })
            .collect();

        Self {
            total_bookmarks: snapshot.len(),
            unique_services: counts.len(),
            most_popular_service: counts.first().map(|(id, _)| id.clone()),
            max_bookmarks: counts.first().map(|(_, count)| *count).unwrap_or(0),
            top_services,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Service};

    #[test]
    fn test_stats_from_snapshot() {
        let catalog = CatalogIndex::from_services([Service {
            service_id: "b".to_string(),
            name: "Blue Nest PG".to_string(),
            category: Category::Accommodation,
            area: String::new(),
            rating: 4.0,
            price: 7000.0,
        }]);
        let snapshot = BookmarkSnapshot::from_pairs([
            ("u1", "a"),
            ("u1", "b"),
            ("u2", "b"),
            ("u3", "b"),
            ("u3", "c"),
        ]);

        let stats = PopularityStats::from_snapshot(&snapshot, &catalog);
        assert_eq!(stats.total_bookmarks, 5);
        assert_eq!(stats.unique_services, 3);
        assert_eq!(stats.most_popular_service.as_deref(), Some("b"));
        assert_eq!(stats.max_bookmarks, 3);
        assert_eq!(stats.top_services[0].name.as_deref(), Some("Blue Nest PG"));
        assert_eq!(stats.top_services[1].service_id, "a");
        assert!(stats.top_services[1].name.is_none());
    }

    #[test]
    fn test_top_list_is_capped() {
        let pairs: Vec<(String, String)> = (0..15)
            .map(|i| (format!("u{}", i), format!("s{:02}", i)))
            .collect();
        let stats =
            PopularityStats::from_snapshot(&BookmarkSnapshot::from_pairs(pairs), &CatalogIndex::default());

        assert_eq!(stats.unique_services, 15);
        assert_eq!(stats.top_services.len(), 10);
    }

    #[test]
    fn test_empty_snapshot() {
        let stats =
            PopularityStats::from_snapshot(&BookmarkSnapshot::default(), &CatalogIndex::default());
        assert_eq!(stats, PopularityStats::default());
    }
}
