//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity
///
/// Immutable for a configuration session; the base part code is the
/// leading fragment of every derived part code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    /// Category reference
    pub category_id: i64,
    pub name: String,
    pub base_part_code: String,
    pub description: Option<String>,
    pub product_image_url: Option<String>,
    pub dimension_image_url: Option<String>,
}
