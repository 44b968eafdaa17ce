//! Persistence and datasheet request payloads
//!
//! The configuration service stores selections by id; the datasheet
//! service wants everything resolved (labels, prices, suffixes, image
//! references) because it renders without catalog access. Both payloads
//! are assembled from the same three inputs and carry the derived part
//! code and total so the stored/rendered values always match what the
//! user saw.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{CUSTOM_VALUE, ProductCatalog, ProductVariant};
use crate::pricing::{Derivation, DeriveError, SummaryFeature};
use crate::selection::SelectionState;

/// Payload for the configuration persistence endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveConfigurationRequest {
    pub product_id: i64,
    pub variant_id: i64,
    /// category_name -> option id
    pub selected_options: HashMap<String, i64>,
    pub selected_accessories: Vec<i64>,
    /// feature name -> resolved display value (custom text substituted)
    pub selected_features: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub final_part_code: String,
    pub final_price: f64,
}

/// Option row resolved for the datasheet service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedOption {
    pub category_label: String,
    pub option_label: String,
    pub price_modifier: f64,
    pub part_code_suffix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_image_url: Option<String>,
}

/// Accessory row resolved for the datasheet service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedAccessory {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub part_code: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Certification mark reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificationRef {
    pub file_name: String,
    pub file_url: String,
}

/// Payload for the datasheet generation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasheetRequest {
    pub product_id: i64,
    pub product_name: String,
    pub base_part_code: String,
    pub final_part_code: String,
    pub total_price: f64,
    /// Full variant list; the rendered sheet tabulates all of them
    pub variants: Vec<ProductVariant>,
    pub selected_variant_id: i64,
    pub selected_options: Vec<ResolvedOption>,
    pub accessories: Vec<ResolvedAccessory>,
    pub features: Vec<SummaryFeature>,
    pub certifications: Vec<CertificationRef>,
}

/// Resolved feature values keyed by name, custom text substituted
fn resolved_feature_values(
    catalog: &ProductCatalog,
    selection: &SelectionState,
) -> HashMap<String, String> {
    catalog
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
            (feature.name.clone(), value)
        })
        .collect()
}

/// Assemble the persistence payload.
///
/// Fails with `IncompleteSelection` when no variant is chosen, mirroring
/// the derivation itself: nothing incomplete is ever persisted.
pub fn build_save_request(
    catalog: &ProductCatalog,
    selection: &SelectionState,
    derivation: &Derivation,
    configuration_name: Option<String>,
    notes: Option<String>,
) -> Result<SaveConfigurationRequest, DeriveError> {
    let variant_id = selection
        .selected_variant_id
        .filter(|id| catalog.variant(*id).is_some())
        .ok_or(DeriveError::IncompleteSelection)?;

    Ok(SaveConfigurationRequest {
        product_id: catalog.product.id,
        variant_id,
        selected_options: selection.selected_options.clone(),
        selected_accessories: selection.selected_accessory_ids.iter().copied().collect(),
        selected_features: resolved_feature_values(catalog, selection),
        configuration_name,
        notes,
        final_part_code: derivation.part_code.clone(),
        final_price: derivation.total_price,
    })
}

/// Assemble the fully-resolved datasheet payload
pub fn build_datasheet_request(
    catalog: &ProductCatalog,
    selection: &SelectionState,
    derivation: &Derivation,
) -> Result<DatasheetRequest, DeriveError> {
    let variant: &ProductVariant = selection
        .selected_variant_id
        .and_then(|id| catalog.variant(id))
        .ok_or(DeriveError::IncompleteSelection)?;

    let selected_options = catalog
        .configuration_categories
        .iter()
        .filter_map(|category| {
            let option_id = *selection.selected_options.get(&category.category_name)?;
            let option = category.option(option_id)?;
            Some(ResolvedOption {
                category_label: category.category_label.clone(),
                option_label: option.option_label.clone(),
                price_modifier: option.price_modifier,
                part_code_suffix: option.part_code_suffix.clone(),
                option_image_url: option.option_image_url.clone(),
            })
        })
        .collect();

    let accessories = selection
        .selected_accessory_ids
        .iter()
        .filter_map(|id| catalog.accessory(*id))
        .map(|a| ResolvedAccessory {
            name: a.name.clone(),
            description: a.description.clone(),
            part_code: a.part_code.clone(),
            price: a.price,
            image_url: a.image_url.clone(),
        })
        .collect();

    let certifications = catalog
        .certifications
        .iter()
        .map(|c| CertificationRef {
            file_name: c.file_name.clone(),
            file_url: c.file_url.clone(),
        })
        .collect();

    Ok(DatasheetRequest {
        product_id: catalog.product.id,
        product_name: catalog.product.name.clone(),
        base_part_code: catalog.product.base_part_code.clone(),
        final_part_code: derivation.part_code.clone(),
        total_price: derivation.total_price,
        variants: catalog.variants.clone(),
        selected_variant_id: variant.id,
        selected_options,
        accessories,
        features: derivation.summary.features.clone(),
        certifications,
    })
}
