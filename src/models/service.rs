//! Service model: one normalized catalog listing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x300";

/// The kind of listing a service belongs to.
///
/// Only accommodation, food and tiffin have catalog sources today; the other
/// variants exist so ids and bookmarks written by other parts of the app still
/// deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Accommodation,
    Food,
    Tiffin,
    Transport,
    Coworking,
    Utilities,
}

impl Category {
    /// All categories, in catalog order.
    pub const ALL: [Category; 6] = [
        Category::Accommodation,
        Category::Food,
        Category::Tiffin,
        Category::Transport,
        Category::Coworking,
        Category::Utilities,
    ];

    /// The lowercase tag used in service ids and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Accommodation => "accommodation",
            Category::Food => "food",
            Category::Tiffin => "tiffin",
            Category::Transport => "transport",
            Category::Coworking => "coworking",
            Category::Utilities => "utilities",
        }
    }

    /// Stock image shown next to recommendations of this category.
    pub fn image_url(&self) -> &'static str {
        match self {
            Category::Accommodation => "https://images.pexels.com/photos/1571460/pexels-photo-1571460.jpeg?auto=compress&cs=tinysrgb&w=400",
            Category::Food => "https://images.pexels.com/photos/1640777/pexels-photo-1640777.jpeg?auto=compress&cs=tinysrgb&w=400",
            Category::Tiffin => "https://images.pexels.com/photos/958545/pexels-photo-958545.jpeg?auto=compress&cs=tinysrgb&w=400",
            Category::Transport => "https://images.pexels.com/photos/385998/pexels-photo-385998.jpeg?auto=compress&cs=tinysrgb&w=400",
            Category::Coworking => "https://images.pexels.com/photos/7147649/pexels-photo-7147649.jpeg?auto=compress&cs=tinysrgb&w=400",
            Category::Utilities => "https://images.pexels.com/photos/3847490/pexels-photo-3847490.jpeg?auto=compress&cs=tinysrgb&w=400",
        }
    }

    /// Image lookup by free-form category name, falling back to a placeholder.
    pub fn image_for(name: &str) -> &'static str {
        name.parse::<Category>()
            .map(|c| c.image_url())
            .unwrap_or(PLACEHOLDER_IMAGE)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// A catalog listing after normalization.
///
/// `service_id` is unique across the merged catalog. `rating` is always in
/// `[0, 5]`; `area` is an empty string when the source had nothing usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub service_id: String,
    pub name: String,
    pub category: Category,
    pub area: String,
    pub rating: f64,
    pub price: f64,
}
