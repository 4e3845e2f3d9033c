use crate::catalog::{RawCatalog, RawRecord};
use crate::error::{RepositoryError, RepositoryResult};
use crate::models::Category;
use crate::repositories::traits::CatalogRepository;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// One catalog file and the category its records belong to.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSource {
    pub category: Category,
    pub file_name: String,
}

impl CatalogSource {
    pub fn new(category: Category, file_name: impl Into<String>) -> Self {
        Self {
            category,
            file_name: file_name.into(),
        }
    }
}

/// The three listing exports shipped with the app.
pub fn default_sources() -> Vec<CatalogSource> {
    vec![
        CatalogSource::new(Category::Accommodation, "accom.json"),
        CatalogSource::new(Category::Food, "food.json"),
        CatalogSource::new(Category::Tiffin, "tif.json"),
    ]
}

/// Catalog repository reading JSON arrays of records from a directory.
#[derive(Debug, Clone)]
pub struct JsonCatalogRepository {
    dir: PathBuf,
    sources: Vec<CatalogSource>,
}

impl JsonCatalogRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            sources: default_sources(),
        }
    }

    pub fn with_sources(mut self, sources: Vec<CatalogSource>) -> Self {
        self.sources = sources;
        self
    }

    pub fn sources(&self) -> &[CatalogSource] {
        &self.sources
    }

    /// File backing `category`, if one is configured.
    pub fn path_for(&self, category: Category) -> Option<PathBuf> {
        self.sources
            .iter()
            .find(|s| s.category == category)
            .map(|s| self.dir.join(&s.file_name))
    }
}

fn read_records(path: &Path) -> RepositoryResult<Option<Vec<RawRecord>>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)?;
    let records: Vec<RawRecord> = serde_json::from_str(&contents)?;
    Ok(Some(records))
}

fn write_records(path: &Path, records: &[RawRecord]) -> RepositoryResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(records)?;
    std::fs::write(path, contents)?;
    Ok(())
}

fn join_error(e: tokio::task::JoinError) -> RepositoryError {
    RepositoryError::Other(format!("Task join error: {}", e))
}

#[async_trait]
impl CatalogRepository for JsonCatalogRepository {
    async fn load_all(&self) -> RepositoryResult<Vec<RawCatalog>> {
        let mut catalogs = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            let path = self.dir.join(&source.file_name);
            let read_path = path.clone();

            let records = tokio::task::spawn_blocking(move || read_records(&read_path))
                .await
                .map_err(join_error)?
                .map_err(|e| {
                    tracing::error!("Failed to read catalog {}: {}", path.display(), e);
                    e
                })?;

            match records {
                Some(records) => {
                    tracing::debug!(
                        category = source.category.as_str(),
                        records = records.len(),
                        "Loaded catalog {}",
                        path.display()
                    );
                    catalogs.push(RawCatalog::new(source.category, records));
                }
                None => {
                    tracing::warn!(
                        category = source.category.as_str(),
                        "Catalog file {} not found, skipping",
                        path.display()
                    );
                }
            }
        }

        Ok(catalogs)
    }

    async fn save(&self, catalog: &RawCatalog) -> RepositoryResult<()> {
        let path = self.path_for(catalog.category).ok_or_else(|| {
            RepositoryError::InvalidRequest(format!(
                "No catalog file configured for category {}",
                catalog.category
            ))
        })?;
        let records = catalog.records.clone();

        tokio::task::spawn_blocking(move || write_records(&path, &records))
            .await
            .map_err(join_error)?
    }
}
