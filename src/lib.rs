//! Service Recommender - bookmark-driven recommendations for accommodation,
//! food and tiffin listings, served over the Model Context Protocol.
//!
//! # Architecture
//!
//! - **models**: Services, bookmarks, association rules and recommendations
//! - **catalog**: Normalization of raw listing exports into one indexed table
//! - **mining**: Apriori frequent itemsets and association rules
//! - **recommender**: Rule, popularity and random strategies plus the orchestrator
//! - **cache**: Fingerprint-keyed rule cache
//! - **client**: HTTP client for the Supabase bookmark table
//! - **repositories**: Bookmark and catalog data access
//! - **services**: Request validation and per-request snapshots
//! - **identifiers**: Service id assignment and placeholder bookmark seeding
//! - **server**: MCP protocol server

pub mod cache;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod identifiers;
pub mod metrics;
pub mod mining;
pub mod models;
pub mod recommender;
pub mod repositories;
pub mod server;
pub mod services;

pub use cache::RuleCache;
pub use catalog::{CatalogIndex, RawCatalog};
pub use client::SupabaseClient;
pub use config::Config;
pub use error::{ConfigError, RepositoryError, RepositoryResult};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use mining::{MiningConfig, RuleMiner, RuleSet};
pub use models::{
    AssociationRule, Bookmark, BookmarkSnapshot, Category, Recommendation, RecommendationSource,
    Service,
};
pub use recommender::{PopularityStats, RandomFallback, RecommendationEngine};
pub use server::RecommenderMcpServer;
