//! Selection State
//!
//! One serializable record of the user's in-progress choices per
//! configuration session. Mutators validate against the catalog
//! snapshot before touching state, so invalid input is rejected here
//! and never reaches the derivation engine. Stale ids left behind by a
//! catalog reload are a different case: the engine degrades over those
//! silently.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{CUSTOM_VALUE, ProductCatalog};

/// Invalid selection input, rejected before any state change
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Unknown variant: {0}")]
    UnknownVariant(i64),

    #[error("Unknown configuration category: {0}")]
    UnknownCategory(String),

    #[error("Option {option_id} does not belong to category {category}")]
    UnknownOption { category: String, option_id: i64 },

    #[error("Unknown accessory: {0}")]
    UnknownAccessory(i64),

    #[error("Unknown configurable feature: {0}")]
    UnknownFeature(String),

    #[error("Feature {0} is fixed and cannot be edited")]
    FixedFeature(String),

    #[error("Value {value:?} is not valid for feature {feature}")]
    InvalidFeatureValue { feature: String, value: String },

    #[error("Feature {0} is not set to CUSTOM; custom text rejected")]
    CustomTextWithoutCustom(String),
}

/// Result type for selection mutators
pub type SelectionResult<T> = Result<T, SelectionError>;

/// Chosen value of one configurable feature
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeatureSelection {
    /// An enumerated value, the CUSTOM sentinel, or N/A
    pub value: String,
    /// Raw free text, only meaningful while `value` is CUSTOM
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_text: Option<String>,
}

impl FeatureSelection {
    fn fixed(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            custom_text: None,
        }
    }
}

/// The user's current choices for one product
///
/// Created empty when a product loads, seeded once via [`initialize`],
/// then mutated by exactly one actor (the UI) until the session ends.
///
/// [`initialize`]: SelectionState::initialize
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionState {
    pub selected_variant_id: Option<i64>,
    /// category_name -> option id, single-select per category
    #[serde(default)]
    pub selected_options: HashMap<String, i64>,
    #[serde(default)]
    pub selected_accessory_ids: BTreeSet<i64>,
    /// feature name -> chosen value
    #[serde(default)]
    pub feature_selections: HashMap<String, FeatureSelection>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply catalog defaults to any unset slot.
    ///
    /// First variant by display order, per-category default options, and
    /// per-feature default values. Categories without a default stay
    /// unset; the part code simply omits their fragment.
    pub fn initialize(&mut self, catalog: &ProductCatalog) {
        if self.selected_variant_id.is_none() {
            self.selected_variant_id = catalog.first_variant().map(|v| v.id);
        }

        for category in &catalog.configuration_categories {
            if self.selected_options.contains_key(&category.category_name) {
                continue;
            }
            if let Some(option) = category.default_option() {
                self.selected_options
                    .insert(category.category_name.clone(), option.id);
            }
        }

        for feature in &catalog.configurable_features {
            self.feature_selections
                .entry(feature.name.clone())
                .or_insert_with(|| FeatureSelection::fixed(feature.default_value.clone()));
        }
    }

    /// Replace the selected variant
    pub fn select_variant(
        &mut self,
        catalog: &ProductCatalog,
        variant_id: i64,
    ) -> SelectionResult<()> {
        if catalog.variant(variant_id).is_none() {
            return Err(SelectionError::UnknownVariant(variant_id));
        }
        self.selected_variant_id = Some(variant_id);
        Ok(())
    }

    /// Choose an option within a category, discarding the previous choice
    pub fn select_option(
        &mut self,
        catalog: &ProductCatalog,
        category_name: &str,
        option_id: i64,
    ) -> SelectionResult<()> {
        let category = catalog
            .category(category_name)
            .ok_or_else(|| SelectionError::UnknownCategory(category_name.to_string()))?;
        if category.option(option_id).is_none() {
            return Err(SelectionError::UnknownOption {
                category: category_name.to_string(),
                option_id,
            });
        }
        self.selected_options
            .insert(category_name.to_string(), option_id);
        Ok(())
    }

    /// Flip an accessory in or out of the selection
    pub fn toggle_accessory(
        &mut self,
        catalog: &ProductCatalog,
        accessory_id: i64,
    ) -> SelectionResult<()> {
        if catalog.accessory(accessory_id).is_none() {
            return Err(SelectionError::UnknownAccessory(accessory_id));
        }
        if !self.selected_accessory_ids.remove(&accessory_id) {
            self.selected_accessory_ids.insert(accessory_id);
        }
        Ok(())
    }

    /// Set a configurable feature's value.
    ///
    /// Selecting CUSTOM clears stale custom text until the user supplies
    /// it; selecting anything else clears the stored text outright.
    pub fn set_feature_value(
        &mut self,
        catalog: &ProductCatalog,
        feature_name: &str,
        value: &str,
    ) -> SelectionResult<()> {
        let feature = catalog
            .configurable_feature(feature_name)
            .ok_or_else(|| SelectionError::UnknownFeature(feature_name.to_string()))?;
        if !feature.configurable {
            return Err(SelectionError::FixedFeature(feature_name.to_string()));
        }
        if !feature.accepts(value) {
            return Err(SelectionError::InvalidFeatureValue {
                feature: feature_name.to_string(),
                value: value.to_string(),
            });
        }
        self.feature_selections.insert(
            feature_name.to_string(),
            FeatureSelection {
                value: value.to_string(),
                custom_text: None,
            },
        );
        Ok(())
    }

    /// Store free text for a feature currently set to CUSTOM.
    ///
    /// Text is kept raw here; normalization happens in the derivation
    /// engine when the part-code token is built.
    pub fn set_custom_feature_text(
        &mut self,
        catalog: &ProductCatalog,
        feature_name: &str,
        text: impl Into<String>,
    ) -> SelectionResult<()> {
        if catalog.configurable_feature(feature_name).is_none() {
            return Err(SelectionError::UnknownFeature(feature_name.to_string()));
        }
        match self.feature_selections.get_mut(feature_name) {
            Some(selection) if selection.value == CUSTOM_VALUE => {
                selection.custom_text = Some(text.into());
                Ok(())
            }
            _ => Err(SelectionError::CustomTextWithoutCustom(
                feature_name.to_string(),
            )),
        }
    }

}
