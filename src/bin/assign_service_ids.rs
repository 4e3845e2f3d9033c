//! Assign fresh service ids to every catalog record and seed the bookmark
//! table with one placeholder row per service.
//!
//! Usage: `assign-service-ids [--clear] [--no-upload]`
//!
//! - `--clear`: delete every existing bookmark row first
//! - `--no-upload`: only rewrite the catalog files

use anyhow::Result;
use service_recommender::client::{AsyncSupabaseClient, AsyncSupabaseClientImpl};
use service_recommender::identifiers::{
    assign_service_ids, placeholder_bookmarks, upload_in_batches, UPLOAD_BATCH_SIZE,
};
use service_recommender::repositories::{CatalogRepository, JsonCatalogRepository};
use service_recommender::{Config, SupabaseClient};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Args {
    clear: bool,
    no_upload: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--clear" => args.clear = true,
            "--no-upload" => args.no_upload = true,
            other => anyhow::bail!("Unknown argument: {}", other),
        }
    }
    if args.clear && args.no_upload {
        anyhow::bail!("--clear cannot be combined with --no-upload");
    }
    Ok(args)
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;

    let (catalog_dir, client) = if args.no_upload {
        let dir = std::env::var("CATALOG_DIR").unwrap_or_else(|_| "data".to_string());
        (PathBuf::from(dir), None)
    } else {
        let config = Config::from_env().map_err(|e| {
            error!("Failed to load configuration: {}", e);
            e
        })?;
        let client = Arc::new(AsyncSupabaseClientImpl::new(SupabaseClient::new(&config)))
            as Arc<dyn AsyncSupabaseClient>;
        (config.catalog_dir, Some(client))
    };

    if let (true, Some(client)) = (args.clear, client.as_ref()) {
        warn!("Clearing existing wishlists table");
        client.clear_wishlists().await?;
        info!("Existing wishlists cleared");
    }

    let repo = JsonCatalogRepository::new(catalog_dir);
    let catalogs = repo.load_all().await?;
    if catalogs.is_empty() {
        warn!("No catalog files found, nothing to do");
        return Ok(());
    }

    let mut total = 0;
    for mut catalog in catalogs {
        let assigned = assign_service_ids(&mut catalog);
        repo.save(&catalog).await?;
        info!("{}: {} entries with new service ids", catalog.category, assigned);
        total += assigned;

        if let Some(client) = client.as_ref() {
            let rows = placeholder_bookmarks(&catalog);
            let report = upload_in_batches(client.as_ref(), rows, UPLOAD_BATCH_SIZE).await;
            info!(
                "{}: uploaded {} rows in {} batches ({} batches failed)",
                catalog.category, report.uploaded, report.batches, report.failed_batches
            );
        }
    }

    info!("Total: {} services assigned ids", total);
    Ok(())
}
