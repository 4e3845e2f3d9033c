//! Conversion of raw, source-shaped catalog records into [`Service`] values.

use super::field_map::FieldMapping;
use crate::models::{Category, Service};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

static NUMBER_TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d[\d,]*(?:\.\d+)?").expect("Failed to compile number token regex")
});

/// One record exactly as the source catalog stores it.
pub type RawRecord = Map<String, Value>;

/// All records of one source catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCatalog {
    pub category: Category,
    pub records: Vec<RawRecord>,
}

impl RawCatalog {
    pub fn new(category: Category, records: Vec<RawRecord>) -> Self {
        Self { category, records }
    }
}

/// Normalize every record of one catalog, dropping records without a service id.
pub fn normalize_catalog(catalog: &RawCatalog) -> Vec<Service> {
    let mapping = FieldMapping::for_category(catalog.category);

    let services: Vec<Service> = catalog
        .records
        .iter()
        .filter_map(|record| normalize_record(record, catalog.category, mapping))
        .collect();

    let dropped = catalog.records.len() - services.len();
    if dropped > 0 {
        tracing::warn!(
            category = %catalog.category,
            dropped,
            "Dropped catalog records without a service_id"
        );
    }

    services
}

/// Normalize and merge several catalogs into one table.
///
/// When two records share an id the first one is kept.
pub fn normalize_all(catalogs: &[RawCatalog]) -> Vec<Service> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for catalog in catalogs {
        for service in normalize_catalog(catalog) {
            if seen.insert(service.service_id.clone()) {
                merged.push(service);
            } else {
                tracing::warn!(
                    service_id = %service.service_id,
                    "Duplicate service_id in catalog, keeping first occurrence"
                );
            }
        }
    }

    merged
}

fn normalize_record(
    record: &RawRecord,
    category: Category,
    mapping: &FieldMapping,
) -> Option<Service> {
    let service_id = service_id_of(record)?;

    Some(Service {
        service_id,
        name: first_present(record, mapping.name)
            .map(text_of)
            .unwrap_or_default()
            .trim()
            .to_string(),
        category,
        area: clean_area(first_present(record, mapping.area)),
        rating: parse_rating(first_present(record, mapping.rating)),
        price: parse_price(first_present(record, mapping.price)),
    })
}

fn service_id_of(record: &RawRecord) -> Option<String> {
    match record.get("service_id") {
        Some(Value::String(id)) => {
            let id = id.trim();
            if id.is_empty() || id.eq_ignore_ascii_case("nan") {
                None
            } else {
                Some(id.to_string())
            }
        }
        _ => None,
    }
}

/// First candidate field that exists on the record and is not null.
fn first_present<'a>(record: &'a RawRecord, fields: &[&str]) -> Option<&'a Value> {
    fields
        .iter()
        .filter_map(|field| record.get(*field))
        .find(|value| !value.is_null())
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Trim an area and turn missing-value markers into the empty string.
pub fn clean_area(value: Option<&Value>) -> String {
    let area = value.map(text_of).unwrap_or_default();
    let area = area.trim();
    if area.eq_ignore_ascii_case("nan") {
        String::new()
    } else {
        area.to_string()
    }
}

/// Strict numeric coercion; anything unparseable becomes 0. Clamped to `[0, 5]`.
pub fn parse_rating(value: Option<&Value>) -> f64 {
    let rating = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };

    if rating.is_finite() {
        rating.clamp(0.0, 5.0)
    } else {
        0.0
    }
}

/// Numeric coercion that falls back to the first number embedded in a string,
/// so `"₹70 - ₹120"` becomes 70. No number at all gives 0.
pub fn parse_price(value: Option<&Value>) -> f64 {
    let price = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => first_number_token(s).unwrap_or(0.0),
        },
        _ => 0.0,
    };

    if price.is_finite() {
        price
    } else {
        0.0
    }
}

/// First run of digits in `s` (thousands separators allowed), as a number.
pub fn first_number_token(s: &str) -> Option<f64> {
    NUMBER_TOKEN_REGEX
        .find(s)
        .and_then(|m| m.as_str().replace(',', "").parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_normalize_accommodation_uses_locality_then_city() {
        let catalog = RawCatalog::new(
            Category::Accommodation,
            vec![
                record(json!({
                    "service_id": "accommodation_0000_1a2b3c4d",
                    "Project/Owner Name": "Sunrise PG",
                    "Locality / Area": "  Kothrud ",
                    "City": "Pune",
                    "Rating": 4.5,
                    "Rent Price": "8500"
                })),
                record(json!({
                    "service_id": "accommodation_0001_5e6f7a8b",
                    "Project/Owner Name": "Blue Nest",
                    "City": "Mumbai",
                    "Rating": "7.2",
                    "Rent Price": 12000
                })),
            ],
        );

        let services = normalize_catalog(&catalog);
        assert_eq!(services.len(), 2);
        assert_eq!(services[0].area, "Kothrud");
        assert_eq!(services[0].price, 8500.0);
        assert_eq!(services[1].area, "Mumbai");
        assert_eq!(services[1].rating, 5.0);
        assert!(services.iter().all(|s| s.category == Category::Accommodation));
    }

    #[test]
    fn test_normalize_drops_records_without_id() {
        let catalog = RawCatalog::new(
            Category::Food,
            vec![
                record(json!({"restaurant_name": "No Id Dhaba", "rating": 4})),
                record(json!({"service_id": "", "restaurant_name": "Blank"})),
                record(json!({"service_id": null, "restaurant_name": "Null"})),
                record(json!({"service_id": "food_0003_cafebabe", "restaurant_name": "Kept"})),
            ],
        );

        let services = normalize_catalog(&catalog);
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].name, "Kept");
        assert_eq!(services[0].rating, 0.0);
        assert_eq!(services[0].price, 0.0);
        assert_eq!(services[0].area, "");
    }

    #[test]
    fn test_tiffin_price_string_takes_first_number() {
        let catalog = RawCatalog::new(
            Category::Tiffin,
            vec![record(json!({
                "service_id": "tiffin_0000_00ff00ff",
                "Name": "Maa ki Rasoi",
                "City": "nan",
                "Rating": "not rated",
                "Estimated_Price_Per_Tiffin_INR": "₹70 - ₹120"
            }))],
        );

        let services = normalize_catalog(&catalog);
        assert_eq!(services[0].price, 70.0);
        assert_eq!(services[0].area, "");
        assert_eq!(services[0].rating, 0.0);
    }

    #[test]
    fn test_parse_price_variants() {
        assert_eq!(parse_price(Some(&json!(99.5))), 99.5);
        assert_eq!(parse_price(Some(&json!("1,250 per month"))), 1250.0);
        assert_eq!(parse_price(Some(&json!("free"))), 0.0);
        assert_eq!(parse_price(Some(&json!("NaN"))), 0.0);
        assert_eq!(parse_price(None), 0.0);
    }

    #[test]
    fn test_parse_rating_clamps() {
        assert_eq!(parse_rating(Some(&json!(-1))), 0.0);
        assert_eq!(parse_rating(Some(&json!(12))), 5.0);
        assert_eq!(parse_rating(Some(&json!("3.9"))), 3.9);
        assert_eq!(parse_rating(Some(&json!("inf"))), 0.0);
        assert_eq!(parse_rating(Some(&json!([]))), 0.0);
    }

    #[test]
    fn test_normalize_all_keeps_first_duplicate() {
        let food = RawCatalog::new(
            Category::Food,
            vec![record(json!({"service_id": "dup_0000_aaaaaaaa", "restaurant_name": "First"}))],
        );
        let tiffin = RawCatalog::new(
            Category::Tiffin,
            vec![record(json!({"service_id": "dup_0000_aaaaaaaa", "Name": "Second"}))],
        );

        let merged = normalize_all(&[food, tiffin]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name, "First");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let catalog = RawCatalog::new(
            Category::Food,
            vec![record(json!({
                "service_id": "food_0000_12345678",
                "restaurant_name": "Idli House",
                "location": "Indiranagar",
                "rating": "4.1",
                "price": "₹150 for two"
            }))],
        );

        assert_eq!(normalize_catalog(&catalog), normalize_catalog(&catalog));
    }
}
