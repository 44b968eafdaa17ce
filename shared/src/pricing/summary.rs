//! Resolved configuration summary
//!
//! A display-ready projection of the selection through the catalog:
//! labels instead of ids, custom text substituted, fixed features
//! annotated. Carries no derived state of its own.

use serde::{Deserialize, Serialize};

use crate::models::{CUSTOM_VALUE, ProductCatalog, ProductVariant};
use crate::selection::SelectionState;

/// One chosen option row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryOption {
    pub category_label: String,
    pub option_label: String,
    pub price_modifier: f64,
}

/// One configurable-feature row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryFeature {
    pub label: String,
    /// Resolved display value; custom text substituted when CUSTOM
    pub value: String,
    /// Fixed features are shown but never editable
    pub is_fixed: bool,
}

/// One selected accessory row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryAccessory {
    pub name: String,
    pub part_code: String,
    pub price: f64,
}

/// Display-ready projection of one configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfigurationSummary {
    pub variant_name: String,
    pub options: Vec<SummaryOption>,
    pub features: Vec<SummaryFeature>,
    pub accessories: Vec<SummaryAccessory>,
}

/// Project the selection through the catalog.
///
/// Rows follow catalog order; stale selection entries are omitted, the
/// same degradation policy the price and part-code passes apply.
pub fn build_summary(
    catalog: &ProductCatalog,
    variant: &ProductVariant,
    selection: &SelectionState,
) -> ConfigurationSummary {
    let options = catalog
        .configuration_categories
        .iter()
        .filter_map(|category| {
            let option_id = *selection.selected_options.get(&category.category_name)?;
            let option = category.option(option_id)?;
            Some(SummaryOption {
                category_label: category.category_label.clone(),
                option_label: option.option_label.clone(),
                price_modifier: option.price_modifier,
            })
        })
        .collect();

    let features = catalog
        .configurable_features
        .iter()
        .map(|feature| {
            let value = match selection.feature_selections.get(&feature.name) {
                Some(s) if s.value == CUSTOM_VALUE => s
                    .custom_text
                    .clone()
                    .unwrap_or_else(|| CUSTOM_VALUE.to_string()),
                Some(s) => s.value.clone(),
                None => feature.default_value.clone(),
            };
            SummaryFeature {
                label: feature.name.clone(),
                value,
                is_fixed: !feature.configurable,
            }
        })
        .collect();

    let accessories = selection
        .selected_accessory_ids
        .iter()
        .filter_map(|id| catalog.accessory(*id))
        .map(|a| SummaryAccessory {
            name: a.name.clone(),
            part_code: a.part_code.clone(),
            price: a.price,
        })
        .collect();

    ConfigurationSummary {
        variant_name: variant.variant_name.clone(),
        options,
        features,
        accessories,
    }
}
