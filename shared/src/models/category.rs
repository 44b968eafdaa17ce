//! Browse Category Model

use serde::{Deserialize, Serialize};

/// Top-level browse category (e.g. "Downlights")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// URL fragment used by the products-by-category endpoint
    pub slug: String,
    pub description: Option<String>,
    pub category_image_url: Option<String>,
    pub display_order: i32,
}
