//! Per-category source field names.
//!
//! Each source catalog was scraped from a different site and names its columns
//! differently. The table below is consulted once per record during
//! normalization; the first field present on a record wins.

use crate::models::Category;

/// Ordered candidate field names for each canonical `Service` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    pub name: &'static [&'static str],
    pub area: &'static [&'static str],
    pub rating: &'static [&'static str],
    pub price: &'static [&'static str],
}

const ACCOMMODATION: FieldMapping = FieldMapping {
    name: &["Project/Owner Name"],
    area: &["Locality / Area", "City"],
    rating: &["Rating"],
    price: &["Rent Price"],
};

const FOOD: FieldMapping = FieldMapping {
    name: &["restaurant_name"],
    area: &["city", "location"],
    rating: &["rating"],
    price: &["price"],
};

const TIFFIN: FieldMapping = FieldMapping {
    name: &["Name"],
    area: &["City", "city"],
    rating: &["Rating"],
    price: &["Estimated_Price_Per_Tiffin_INR", "price"],
};

// Categories without a scraped source use plain snake_case names.
const GENERIC: FieldMapping = FieldMapping {
    name: &["name"],
    area: &["area", "city", "location"],
    rating: &["rating"],
    price: &["price"],
};

impl FieldMapping {
    pub fn for_category(category: Category) -> &'static FieldMapping {
        match category {
            Category::Accommodation => &ACCOMMODATION,
            Category::Food => &FOOD,
            Category::Tiffin => &TIFFIN,
            Category::Transport | Category::Coworking | Category::Utilities => &GENERIC,
        }
    }
}
