//! Recommendation strategies and the orchestrator that combines them.
//!
//! Three strategies contribute to a slate, in priority order:
//! - **Rules**: consequents of association rules the user's bookmarks trigger
//! - **Popularity**: services other users bookmarked most
//! - **Random**: seeded sampling from the rest of the catalog
//!
//! Everything here is synchronous and works on an already-fetched
//! [`BookmarkSnapshot`](crate::models::BookmarkSnapshot).

pub mod engine;
pub mod orchestrator;
pub mod popularity;
pub mod random;
pub mod rule_based;
pub mod stats;

pub use engine::RecommendationEngine;
pub use orchestrator::{orchestrate, rank};
pub use popularity::{bookmark_counts, popularity_recommendations};
pub use random::RandomFallback;
pub use rule_based::rule_recommendations;
pub use stats::{PopularityStats, ServiceCount};
