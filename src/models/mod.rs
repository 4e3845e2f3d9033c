//! Data models for the recommendation engine.
//!
//! This module contains catalog services, bookmark rows and snapshots,
//! association rules, and the recommendation records handed back to callers.

pub mod bookmark;
pub mod recommendation;
pub mod rule;
pub mod service;

pub use bookmark::{Bookmark, BookmarkSnapshot};
pub use recommendation::{Recommendation, RecommendationSource};
pub use rule::AssociationRule;
pub use service::{Category, Service};
