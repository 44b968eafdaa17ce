//! Accessory Model

use serde::{Deserialize, Serialize};

/// Optional add-on sold with a product
///
/// Selected accessories add their price to the total but never
/// contribute to the part code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Accessory {
    pub id: i64,
    pub product_id: i64,
    pub name: String,
    /// The accessory's own catalog code, shown in summaries/exports
    pub part_code: String,
    pub description: Option<String>,
    /// The catalog service omits this column for some rows; treat as free
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub accessory_category: String,
    pub image_url: Option<String>,
}
