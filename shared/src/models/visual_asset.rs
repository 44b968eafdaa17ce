//! Visual Asset Model

use serde::{Deserialize, Serialize};

/// Image or document attached to a product (photos, dimension drawings,
/// certification marks)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualAsset {
    pub id: i64,
    pub product_id: i64,
    pub asset_type: String,
    #[serde(default)]
    pub asset_category: String,
    pub file_url: String,
    pub file_name: String,
    pub display_order: i32,
}

impl VisualAsset {
    /// Whether this asset is a certification mark
    pub fn is_certification(&self) -> bool {
        self.asset_type == "certification" || self.asset_category == "certifications"
    }
}
