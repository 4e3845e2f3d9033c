//! Immutable lookup table over the merged catalog.

use super::normalizer::{normalize_all, RawCatalog};
use crate::models::{Category, Service};
use std::collections::{BTreeMap, HashMap};

/// The merged service table, keyed by `service_id`.
///
/// Built once per process and shared read-only between requests. Iteration
/// follows catalog order, which keeps the random fallback reproducible.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    services: Vec<Service>,
    by_id: HashMap<String, usize>,
}

impl CatalogIndex {
    /// Index already-normalized services. Later duplicates of an id are ignored.
    pub fn from_services(services: impl IntoIterator<Item = Service>) -> Self {
        let mut index = Self::default();
        for service in services {
            if index.by_id.contains_key(&service.service_id) {
                continue;
            }
            index
                .by_id
                .insert(service.service_id.clone(), index.services.len());
            index.services.push(service);
        }
        index
    }

    /// Normalize raw catalogs and index the result.
    pub fn from_raw(catalogs: &[RawCatalog]) -> Self {
        let index = Self::from_services(normalize_all(catalogs));
        tracing::info!(services = index.len(), "Catalog index built");
        index
    }

    pub fn get(&self, service_id: &str) -> Option<&Service> {
        self.by_id.get(service_id).map(|&i| &self.services[i])
    }

    pub fn contains(&self, service_id: &str) -> bool {
        self.by_id.contains_key(service_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Service> {
        self.services.iter()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Number of services per category.
    pub fn counts_by_category(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for service in &self.services {
            *counts.entry(service.category).or_insert(0) += 1;
        }
        counts
    }
}
