//! Service Recommender - Main entry point
//!
//! Serves bookmark-driven service recommendations over the Model Context
//! Protocol (MCP) on stdio.

use anyhow::Result;
use service_recommender::client::{AsyncSupabaseClient, AsyncSupabaseClientImpl};
use service_recommender::repositories::{
    BookmarkRepository, CatalogRepository, JsonCatalogRepository, SupabaseBookmarkRepository,
};
use service_recommender::services::{RecommendationService, RecommendationServiceImpl};
use service_recommender::{
    CatalogIndex, Config, Metrics, RecommendationEngine, RecommenderMcpServer, SupabaseClient,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(std::env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string()))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Starting service recommender with Supabase URL: {}",
        config.supabase_url
    );

    let metrics = Metrics::new();

    // Catalog is loaded once and shared read-only
    let catalog_repo = JsonCatalogRepository::new(&config.catalog_dir);
    let raw_catalogs = catalog_repo.load_all().await?;
    let catalog = Arc::new(CatalogIndex::from_raw(&raw_catalogs));
    for (category, count) in catalog.counts_by_category() {
        info!("Catalog {}: {} services", category, count);
    }

    let sync_client = SupabaseClient::new(&config).with_metrics(metrics.clone());
    let client =
        Arc::new(AsyncSupabaseClientImpl::new(sync_client)) as Arc<dyn AsyncSupabaseClient>;
    let bookmark_repo =
        Arc::new(SupabaseBookmarkRepository::new(client)) as Arc<dyn BookmarkRepository>;

    let engine = RecommendationEngine::from_config(catalog, &config, metrics.clone());
    let service = Arc::new(
        RecommendationServiceImpl::new(bookmark_repo, engine)
            .with_limits(config.default_top_k, config.max_top_k),
    ) as Arc<dyn RecommendationService>;

    let server = RecommenderMcpServer::new(service);

    info!(
        "Rule cache TTL: {} seconds, min_support: {}, min_confidence: {}, max_transaction_len: {}",
        config.rule_cache_ttl_seconds,
        config.min_support,
        config.min_confidence,
        config.max_transaction_len
    );

    // Run the server (this will block until the server exits)
    info!("Starting MCP server with stdio transport");
    service_recommender::server::run_server(server).await?;

    info!("Service recommender shutdown complete: {:?}", metrics.summary());
    Ok(())
}
