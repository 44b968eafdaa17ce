//! Configuration Category Model

use serde::{Deserialize, Serialize};

/// Priced option inside a configuration category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurationOption {
    pub id: i64,
    pub category_id: i64,
    pub option_value: String,
    pub option_label: String,
    /// Omitted from the part code when empty
    #[serde(default)]
    pub part_code_suffix: String,
    /// Signed, added to the variant base price
    #[serde(default)]
    pub price_modifier: f64,
    #[serde(default)]
    pub is_default: bool,
    pub display_order: i32,
    pub option_image_url: Option<String>,
}

/// A named axis of choice (e.g. "Beam Angle") with its options
///
/// Single-select: the selection state holds at most one option id per
/// category, keyed by `category_name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurationCategory {
    pub id: i64,
    pub product_id: i64,
    #[serde(default)]
    pub section_name: String,
    #[serde(default)]
    pub section_label: String,
    pub category_name: String,
    pub category_label: String,
    /// Part-code slot; categories with position <= 0 never contribute a fragment
    #[serde(default)]
    pub part_code_position: i32,
    #[serde(default)]
    pub is_required: bool,
    pub display_order: i32,
    #[serde(default)]
    pub options: Vec<ConfigurationOption>,
}

impl ConfigurationCategory {
    /// Look up an option of this category by id
    pub fn option(&self, option_id: i64) -> Option<&ConfigurationOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    /// The option flagged as default, if any (first by display order wins)
    pub fn default_option(&self) -> Option<&ConfigurationOption> {
        self.options.iter().find(|o| o.is_default)
    }
}
