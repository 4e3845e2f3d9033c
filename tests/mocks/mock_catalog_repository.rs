use async_trait::async_trait;
use service_recommender::catalog::RawCatalog;
use service_recommender::error::RepositoryResult;
use service_recommender::repositories::CatalogRepository;
use std::sync::{Arc, Mutex};

/// Mock catalog repository keeping catalogs in memory.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockCatalogRepository {
    catalogs: Arc<Mutex<Vec<RawCatalog>>>,
}

#[allow(dead_code)]
impl MockCatalogRepository {
    pub fn new(catalogs: Vec<RawCatalog>) -> Self {
        Self {
            catalogs: Arc::new(Mutex::new(catalogs)),
        }
    }

    pub fn catalogs(&self) -> Vec<RawCatalog> {
        self.catalogs.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogRepository for MockCatalogRepository {
    async fn load_all(&self) -> RepositoryResult<Vec<RawCatalog>> {
        Ok(self.catalogs())
    }

    async fn save(&self, catalog: &RawCatalog) -> RepositoryResult<()> {
        let mut catalogs = self.catalogs.lock().unwrap();
        match catalogs.iter_mut().find(|c| c.category == catalog.category) {
            Some(existing) => *existing = catalog.clone(),
            None => catalogs.push(catalog.clone()),
        }
        Ok(())
    }
}
