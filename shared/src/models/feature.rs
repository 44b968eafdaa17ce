//! Product Feature Models
//!
//! Two distinct concepts share the "feature" name in the catalog:
//! `ProductFeature` is a purely informational spec-sheet row, while
//! `ConfigurableFeature` is a small attribute toggle (Housing Color,
//! Reflector Color, Finish, SDCM) whose value set is a fixed enumeration
//! plus free text, without per-value pricing.

use serde::{Deserialize, Serialize};

/// Sentinel value selecting free-text input for a configurable feature
pub const CUSTOM_VALUE: &str = "CUSTOM";

/// Sentinel value marking a feature as not applicable; contributes no
/// part-code token
pub const NOT_APPLICABLE: &str = "N/A";

/// Informational spec-sheet row; no pricing or part-code effect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductFeature {
    pub id: i64,
    pub product_id: i64,
    pub feature_type: String,
    pub feature_label: String,
    pub feature_value: String,
    pub feature_icon_url: Option<String>,
    pub display_order: i32,
}

/// Wire entry of the `configurable_features` map, keyed by feature name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurableFeatureSpec {
    pub configurable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Closed value set; absent for fixed features and legacy catalogs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
    /// Explicit part-code prefix letter assigned by catalog configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_letter: Option<String>,
}

/// Normalized configurable feature, resolved once at catalog load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurableFeature {
    pub name: String,
    /// false means the value is fixed and never user-editable
    pub configurable: bool,
    pub default_value: String,
    /// Enumerated values a user may pick (excludes the sentinels)
    pub values: Vec<String>,
    /// Single-letter part-code prefix, uppercased
    pub code_letter: String,
}

impl ConfigurableFeature {
    /// Build from a wire spec entry.
    ///
    /// The prefix letter falls back to the first alphabetic character of
    /// the feature name when the catalog does not assign one explicitly.
    pub fn from_spec(name: &str, spec: &ConfigurableFeatureSpec) -> Self {
        let values = spec.values.clone().unwrap_or_default();
        let default_value = spec
            .default_value
            .clone()
            .or_else(|| values.first().cloned())
            .unwrap_or_else(|| NOT_APPLICABLE.to_string());

        let code_letter = spec
            .code_letter
            .as_deref()
            .and_then(|s| s.chars().next())
            .or_else(|| name.chars().find(|c| c.is_alphabetic()))
            .map(|c| c.to_ascii_uppercase().to_string())
            .unwrap_or_default();

        Self {
            name: name.to_string(),
            configurable: spec.configurable,
            default_value,
            values,
            code_letter,
        }
    }

    /// Whether `value` is acceptable for this feature
    pub fn accepts(&self, value: &str) -> bool {
        value == CUSTOM_VALUE
            || value == NOT_APPLICABLE
            || value == self.default_value
            || self.values.iter().any(|v| v == value)
    }
}
