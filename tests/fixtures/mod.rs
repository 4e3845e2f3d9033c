//! Test fixtures and sample data.
//!
//! Builders for catalog entries, raw listing exports and bookmark tables.

#![allow(dead_code)]

use serde_json::{json, Value};
use service_recommender::catalog::{RawCatalog, RawRecord};
use service_recommender::models::{BookmarkSnapshot, Category, Service};
use service_recommender::CatalogIndex;

/// A food service with the given id and rating.
pub fn service(id: &str, rating: f64) -> Service {
    Service {
        service_id: id.to_string(),
        name: format!("Listing {}", id),
        category: Category::Food,
        area: "pune".to_string(),
        rating,
        price: 150.0,
    }
}

/// A catalog holding one service per id, all rated 3.0.
pub fn catalog_of(ids: &[&str]) -> CatalogIndex {
    CatalogIndex::from_services(ids.iter().map(|id| service(id, 3.0)))
}

/// A catalog of `count` services named `s00`, `s01`, ...
pub fn numbered_catalog(count: usize) -> CatalogIndex {
    CatalogIndex::from_services((0..count).map(|i| service(&format!("s{:02}", i), (i % 6) as f64)))
}

pub fn snapshot(pairs: &[(&str, &str)]) -> BookmarkSnapshot {
    BookmarkSnapshot::from_pairs(pairs.iter().map(|(u, s)| (u.to_string(), s.to_string())))
}

fn record(value: Value) -> RawRecord {
    value.as_object().cloned().unwrap_or_default()
}

/// Raw exports for the three shipped categories, with the quirks they carry:
/// string ratings, ranged prices, missing areas and a duplicate id.
pub fn sample_raw_catalogs() -> Vec<RawCatalog> {
    vec![
        RawCatalog::new(
            Category::Accommodation,
            vec![
                record(json!({
                    "service_id": "accommodation_0000_1a2b3c4d",
                    "Project/Owner Name": "Sunrise Residency",
                    "Locality / Area": "Kothrud",
                    "City": "Pune",
                    "Rating": 4.3,
                    "Rent Price": "₹12,500"
                })),
                record(json!({
                    "service_id": "accommodation_0001_5e6f7a8b",
                    "Project/Owner Name": "Green Nest PG",
                    "Locality / Area": null,
                    "City": "Pune",
                    "Rating": "7.5",
                    "Rent Price": 8000
                })),
            ],
        ),
        RawCatalog::new(
            Category::Food,
            vec![
                record(json!({
                    "service_id": "food_0000_9c0d1e2f",
                    "restaurant_name": "Vaishali",
                    "city": "Pune",
                    "location": "FC Road",
                    "rating": "4.6",
                    "price": 250
                })),
                record(json!({
                    "service_id": "food_0001_3a4b5c6d",
                    "restaurant_name": "No Rating Cafe",
                    "city": "Pune",
                    "rating": "new",
                    "price": "not listed"
                })),
                record(json!({
                    "restaurant_name": "Missing Id Dhaba",
                    "city": "Pune"
                })),
            ],
        ),
        RawCatalog::new(
            Category::Tiffin,
            vec![
                record(json!({
                    "service_id": "tiffin_0000_7e8f9a0b",
                    "Name": "Aai's Kitchen",
                    "City": "Pune",
                    "Rating": 4.8,
                    "Estimated_Price_Per_Tiffin_INR": "₹70 - ₹120"
                })),
                record(json!({
                    "service_id": "food_0000_9c0d1e2f",
                    "Name": "Duplicate Id Tiffin",
                    "City": "Pune",
                    "Rating": 3.0
                })),
            ],
        ),
    ]
}
