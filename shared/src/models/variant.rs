//! Product Variant Model

use serde::{Deserialize, Serialize};

/// Power-rating variant of a product
///
/// Exactly one variant is selected at a time; its `base_price` is the
/// starting point of every price derivation. The performance numbers
/// are informational only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: i64,
    pub product_id: i64,
    pub variant_name: String,
    /// Appended to the product base part code when non-empty
    #[serde(default)]
    pub part_code_suffix: String,
    /// Lumen output (informational)
    #[serde(default)]
    pub system_output: i32,
    /// Wattage (informational)
    #[serde(default)]
    pub system_power: i32,
    /// lm/W (informational)
    #[serde(default)]
    pub efficiency: i32,
    /// Free-form spec sheet rows keyed by label
    #[serde(default)]
    pub specifications: serde_json::Map<String, serde_json::Value>,
    /// Non-negative
    pub base_price: f64,
    pub display_order: i32,
}
