//! Service id assignment and placeholder bookmark seeding.
//!
//! Ids look like `food_0042_9f1c2ab3`: category, zero-padded record index and
//! the first eight hex digits of a random UUID. Each catalog also gets one
//! placeholder bookmark per record under a per-catalog system user, so the
//! `wishlists` table knows every listing.

use crate::catalog::{parse_price, parse_rating, FieldMapping, RawCatalog, RawRecord};
use crate::client::AsyncSupabaseClient;
use crate::models::{Bookmark, Category};
use futures::stream::{self, StreamExt};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Rows per insert request.
pub const UPLOAD_BATCH_SIZE: usize = 100;

/// Batches in flight at once.
const UPLOAD_CONCURRENCY: usize = 4;

static SERVICE_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]+_\d{4,}_[0-9a-f]{8}$").expect("Invalid service id regex"));

/// A new id for the record at `index` of a `category` catalog.
pub fn generate_service_id(category: Category, index: usize) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}_{:04}_{}", category.as_str(), index, &suffix[..8])
}

pub fn is_valid_service_id(id: &str) -> bool {
    SERVICE_ID_PATTERN.is_match(id)
}

/// Give every record a fresh `service_id`, replacing any existing one.
/// Returns the number of records updated.
pub fn assign_service_ids(catalog: &mut RawCatalog) -> usize {
    let category = catalog.category;
    for (index, record) in catalog.records.iter_mut().enumerate() {
        record.insert(
            "service_id".to_string(),
            Value::String(generate_service_id(category, index)),
        );
    }
    catalog.records.len()
}

enum Field {
    Text(&'static str, &'static str),
    Rating(&'static str, &'static str),
    Price(&'static str, &'static str),
}

const ACCOMMODATION_SUMMARY: &[Field] = &[
    Field::Text("name", "Project/Owner Name"),
    Field::Text("city", "City"),
    Field::Text("area", "Locality / Area"),
    Field::Text("property_type", "Property Type"),
    Field::Text("bedrooms", "Bedrooms"),
    Field::Text("rent_price", "Rent Price"),
    Field::Rating("rating", "Rating"),
];

const FOOD_SUMMARY: &[Field] = &[
    Field::Text("name", "restaurant_name"),
    Field::Text("city", "city"),
    Field::Text("platform", "platform"),
    Field::Text("cuisine", "cuisine"),
    Field::Text("dish", "dish"),
    Field::Price("price", "price"),
    Field::Rating("rating", "rating"),
];

const TIFFIN_SUMMARY: &[Field] = &[
    Field::Text("name", "Name"),
    Field::Text("city", "City"),
    Field::Rating("rating", "Rating"),
    Field::Text("reviews", "Reviews"),
    Field::Text("type", "Type"),
    Field::Price("estimated_price", "Estimated_Price_Per_Tiffin_INR"),
    Field::Text("address", "Address"),
    Field::Text("hours", "Hours"),
];

fn text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn first_present<'a>(record: &'a RawRecord, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find(|v| !v.is_null())
}

/// The display summary stored in a placeholder row's `service_data`.
pub fn service_data(category: Category, record: &RawRecord) -> Value {
    let table = match category {
        Category::Accommodation => Some(ACCOMMODATION_SUMMARY),
        Category::Food => Some(FOOD_SUMMARY),
        Category::Tiffin => Some(TIFFIN_SUMMARY),
        _ => None,
    };

    let mut summary = Map::new();
    match table {
        Some(fields) => {
            for field in fields {
                let (key, value) = match field {
                    Field::Text(key, source) => (*key, Value::from(text(record.get(*source)))),
                    Field::Rating(key, source) => (*key, Value::from(parse_rating(record.get(*source)))),
                    Field::Price(key, source) => (*key, Value::from(parse_price(record.get(*source)))),
                };
                summary.insert(key.to_string(), value);
            }
        }
        None => {
            let mapping = FieldMapping::for_category(category);
            summary.insert(
                "name".to_string(),
                Value::from(text(first_present(record, mapping.name))),
            );
            summary.insert(
                "area".to_string(),
                Value::from(text(first_present(record, mapping.area))),
            );
            summary.insert(
                "rating".to_string(),
                Value::from(parse_rating(first_present(record, mapping.rating))),
            );
            summary.insert(
                "price".to_string(),
                Value::from(parse_price(first_present(record, mapping.price))),
            );
        }
    }
    summary.insert("category".to_string(), Value::from(category.as_str()));

    Value::Object(summary)
}

/// One placeholder row per record that has a service id, all under a single
/// freshly generated system user.
pub fn placeholder_bookmarks(catalog: &RawCatalog) -> Vec<Bookmark> {
    let system_user = Uuid::new_v4().to_string();

    catalog
        .records
        .iter()
        .filter_map(|record| {
            let service_id = record.get("service_id")?.as_str()?;
            Some(Bookmark {
                user_id: system_user.clone(),
                service_id: service_id.to_string(),
                service_data: Some(service_data(catalog.category, record)),
            })
        })
        .collect()
}

/// Outcome of a batched upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadReport {
    pub batches: usize,
    pub uploaded: usize,
    pub failed_batches: usize,
    pub failed_rows: usize,
}

/// Insert `rows` in batches of `batch_size`. A failed batch is logged and
/// skipped; the rest still go out.
pub async fn upload_in_batches(
    client: &dyn AsyncSupabaseClient,
    rows: Vec<Bookmark>,
    batch_size: usize,
) -> UploadReport {
    let batch_size = batch_size.max(1);
    let total = rows.len();
    let batches: Vec<Vec<Bookmark>> = rows.chunks(batch_size).map(|c| c.to_vec()).collect();

    let results: Vec<(usize, usize, bool)> = stream::iter(batches.into_iter().enumerate())
        .map(|(number, batch)| async move {
            let len = batch.len();
            match client.insert_wishlists(batch).await {
                Ok(()) => (number, len, true),
                Err(e) => {
                    tracing::error!("Error uploading batch {}: {}", number + 1, e);
                    (number, len, false)
                }
            }
        })
        .buffered(UPLOAD_CONCURRENCY)
        .collect()
        .await;

    let mut report = UploadReport {
        batches: results.len(),
        ..UploadReport::default()
    };
    for (number, len, ok) in results {
        if ok {
            report.uploaded += len;
            tracing::info!(
                "Uploaded batch {}: {}/{} records",
                number + 1,
                report.uploaded,
                total
            );
        } else {
            report.failed_batches += 1;
            report.failed_rows += len;
        }
    }

    report
}
