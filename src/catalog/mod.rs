//! Catalog normalization and lookup.
//!
//! Raw records from each source catalog are mapped through a per-category field
//! table into strongly-typed [`Service`](crate::models::Service) values, then
//! merged into a [`CatalogIndex`].

pub mod field_map;
pub mod index;
pub mod normalizer;

pub use field_map::FieldMapping;
pub use index::CatalogIndex;
pub use normalizer::{
    clean_area, first_number_token, normalize_all, normalize_catalog, parse_price, parse_rating,
    RawCatalog, RawRecord,
};
