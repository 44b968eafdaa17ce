//! Derivation entry point
//!
//! `derive` recomputes price, part code, and summary after every state
//! transition. The only hard failure is a missing variant; stale
//! selection entries (ids left behind by a catalog reload) are skipped
//! with a warning so a user mid-edit still sees a usable price.

use rust_decimal::Decimal;
use thiserror::Error;

use super::money::{to_decimal, to_f64};
use super::part_code::build_part_code;
use super::summary::{ConfigurationSummary, build_summary};
use crate::models::ProductCatalog;
use crate::selection::SelectionState;

/// Derivation failure
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeriveError {
    /// No variant selected (or the id no longer resolves); the caller
    /// recovers by not rendering a price yet
    #[error("No variant selected")]
    IncompleteSelection,
}

/// Result of one derivation pass
#[derive(Debug, Clone, PartialEq)]
pub struct Derivation {
    /// Rounded to 2 decimal places; accumulation is exact internally
    pub total_price: f64,
    pub part_code: String,
    pub summary: ConfigurationSummary,
}

/// Compute price, part code, and summary for the current selection.
///
/// Pure: identical inputs always produce identical outputs, and neither
/// input is mutated.
pub fn derive(
    catalog: &ProductCatalog,
    selection: &SelectionState,
) -> Result<Derivation, DeriveError> {
    let variant = selection
        .selected_variant_id
        .and_then(|id| catalog.variant(id))
        .ok_or(DeriveError::IncompleteSelection)?;

    let mut total: Decimal = to_decimal(variant.base_price);

    for (category_name, option_id) in &selection.selected_options {
        match catalog.option(category_name, *option_id) {
            Some(option) => total += to_decimal(option.price_modifier),
            None => {
                tracing::warn!(
                    category = %category_name,
                    option_id,
                    "selected option not in catalog, skipping"
                );
            }
        }
    }

    for accessory_id in &selection.selected_accessory_ids {
        match catalog.accessory(*accessory_id) {
            Some(accessory) => total += to_decimal(accessory.price),
            None => {
                tracing::warn!(accessory_id, "selected accessory not in catalog, skipping");
            }
        }
    }

    Ok(Derivation {
        total_price: to_f64(total),
        part_code: build_part_code(catalog, variant, selection),
        summary: build_summary(catalog, variant, selection),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CUSTOM_VALUE, ProductDetails};

    /// The worked example: DL100, variant "-A" at 50.00, Beam "-N" at
    /// +5.00, a no-default Color category, one 10.00 accessory
    fn catalog() -> ProductCatalog {
        let json = r#"{
            "product": {"id": 1, "category_id": 1, "name": "Orbit 100", "base_part_code": "DL100",
                        "description": null, "product_image_url": null, "dimension_image_url": null},
            "variants": [
                {"id": 10, "product_id": 1, "variant_name": "15W", "part_code_suffix": "-A",
                 "base_price": 50.0, "display_order": 1},
                {"id": 11, "product_id": 1, "variant_name": "25W", "part_code_suffix": "-B",
                 "base_price": 70.0, "display_order": 2}
            ],
            "configuration_categories": [
                {"id": 100, "product_id": 1, "category_name": "beam", "category_label": "Beam",
                 "part_code_position": 1, "display_order": 1, "options": [
                    {"id": 1000, "category_id": 100, "option_value": "narrow", "option_label": "Narrow",
                     "part_code_suffix": "-N", "price_modifier": 5.0, "is_default": true,
                     "display_order": 1, "option_image_url": null},
                    {"id": 1001, "category_id": 100, "option_value": "wide", "option_label": "Wide",
                     "part_code_suffix": "-W", "price_modifier": 12.5, "is_default": false,
                     "display_order": 2, "option_image_url": null}
                 ]},
                {"id": 101, "product_id": 1, "category_name": "color", "category_label": "Color",
                 "part_code_position": 2, "display_order": 2, "options": [
                    {"id": 1010, "category_id": 101, "option_value": "black", "option_label": "Black",
                     "part_code_suffix": "-BK", "price_modifier": 0.0, "is_default": false,
                     "display_order": 1, "option_image_url": null}
                 ]}
            ],
            "accessories": [
                {"id": 500, "product_id": 1, "name": "Trim Ring", "part_code": "TR-01",
                 "description": null, "price": 10.0, "accessory_category": "trims", "image_url": null},
                {"id": 501, "product_id": 1, "name": "Spare Lens", "part_code": "SL-02",
                 "description": null, "accessory_category": "optics", "image_url": null}
            ],
            "configurable_features": {
                "Housing Color": {"configurable": true, "default_value": "N/A",
                                  "values": ["BLACK", "WHITE"]}
            }
        }"#;
        serde_json::from_str::<ProductDetails>(json).unwrap().normalize()
    }

    fn initialized(catalog: &ProductCatalog) -> SelectionState {
        let mut state = SelectionState::new();
        state.initialize(catalog);
        state
    }

    #[test]
    fn test_worked_example() {
        let catalog = catalog();
        let mut state = initialized(&catalog);
        state.toggle_accessory(&catalog, 500).unwrap();

        let derivation = derive(&catalog, &state).unwrap();
        assert_eq!(derivation.total_price, 65.00);
        assert_eq!(derivation.part_code, "DL100-A-N");
    }

    #[test]
    fn test_no_variant_is_incomplete() {
        let catalog = catalog();
        let state = SelectionState::new();
        assert_eq!(
            derive(&catalog, &state),
            Err(DeriveError::IncompleteSelection)
        );
    }

    #[test]
    fn test_unresolvable_variant_is_incomplete() {
        let catalog = catalog();
        let mut state = initialized(&catalog);
        state.selected_variant_id = Some(4242);
        assert_eq!(
            derive(&catalog, &state),
            Err(DeriveError::IncompleteSelection)
        );
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let catalog = catalog();
        let mut state = initialized(&catalog);
        state.toggle_accessory(&catalog, 500).unwrap();
        state.select_option(&catalog, "color", 1010).unwrap();

        let first = derive(&catalog, &state).unwrap();
        let second = derive(&catalog, &state).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_selection_order_invariance() {
        let catalog = catalog();

        let mut forward = initialized(&catalog);
        forward.select_option(&catalog, "beam", 1001).unwrap();
        forward.select_option(&catalog, "color", 1010).unwrap();

        let mut reverse = initialized(&catalog);
        reverse.select_option(&catalog, "color", 1010).unwrap();
        reverse.select_option(&catalog, "beam", 1001).unwrap();

        let a = derive(&catalog, &forward).unwrap();
        let b = derive(&catalog, &reverse).unwrap();
        assert_eq!(a.part_code, b.part_code);
        assert_eq!(a.total_price, b.total_price);
        assert_eq!(a.part_code, "DL100-A-W-BK");
    }

    #[test]
    fn test_price_monotonic_under_additions() {
        let catalog = catalog();
        let mut state = initialized(&catalog);
        let base = derive(&catalog, &state).unwrap().total_price;

        state.toggle_accessory(&catalog, 500).unwrap();
        let with_accessory = derive(&catalog, &state).unwrap().total_price;
        assert!(with_accessory >= base);

        // Wide costs strictly more than Narrow
        state.select_option(&catalog, "beam", 1001).unwrap();
        let with_pricier_option = derive(&catalog, &state).unwrap().total_price;
        assert!(with_pricier_option > with_accessory);
    }

    #[test]
    fn test_missing_accessory_price_counts_as_zero() {
        let catalog = catalog();
        let mut state = initialized(&catalog);
        let before = derive(&catalog, &state).unwrap().total_price;

        state.toggle_accessory(&catalog, 501).unwrap();
        let after = derive(&catalog, &state).unwrap();
        assert_eq!(after.total_price, before);
        assert_eq!(after.summary.accessories.len(), 1);
    }

    #[test]
    fn test_stale_option_degrades_silently() {
        let catalog = catalog();
        let mut state = initialized(&catalog);
        state.selected_options.insert("beam".to_string(), 4242);
        state.selected_accessory_ids.insert(999);

        let derivation = derive(&catalog, &state).unwrap();
        // Base price only: the stale option and accessory are omitted
        assert_eq!(derivation.total_price, 50.00);
        assert_eq!(derivation.part_code, "DL100-A");
    }

    #[test]
    fn test_stale_category_name_degrades_silently() {
        let catalog = catalog();
        let mut state = initialized(&catalog);
        state.selected_options.insert("sdcm".to_string(), 1000);

        let derivation = derive(&catalog, &state).unwrap();
        assert_eq!(derivation.total_price, 55.00);
    }

    #[test]
    fn test_custom_feature_token_appends_after_categories() {
        let catalog = catalog();
        let mut state = initialized(&catalog);
        state.select_option(&catalog, "color", 1010).unwrap();
        state
            .set_feature_value(&catalog, "Housing Color", CUSTOM_VALUE)
            .unwrap();
        state
            .set_custom_feature_text(&catalog, "Housing Color", "royal blue")
            .unwrap();

        let derivation = derive(&catalog, &state).unwrap();
        assert_eq!(derivation.part_code, "DL100-A-N-BK-HROYALBLUE");
        // Features never affect price
        assert_eq!(derivation.total_price, 55.00);
    }

    #[test]
    fn test_exact_accumulation_across_many_additions() {
        // 0.1 + 0.2 style drift must not surface in the rounded total
        let json = r#"{
            "product": {"id": 1, "category_id": 1, "name": "P", "base_part_code": "P1",
                        "description": null, "product_image_url": null, "dimension_image_url": null},
            "variants": [
                {"id": 1, "product_id": 1, "variant_name": "V", "part_code_suffix": "",
                 "base_price": 0.1, "display_order": 1}
            ],
            "accessories": [
                {"id": 2, "product_id": 1, "name": "A", "part_code": "A", "description": null,
                 "price": 0.2, "accessory_category": "", "image_url": null},
                {"id": 3, "product_id": 1, "name": "B", "part_code": "B", "description": null,
                 "price": 0.1, "accessory_category": "", "image_url": null},
                {"id": 4, "product_id": 1, "name": "C", "part_code": "C", "description": null,
                 "price": 0.2, "accessory_category": "", "image_url": null}
            ]
        }"#;
        let catalog = serde_json::from_str::<ProductDetails>(json).unwrap().normalize();
        let mut state = SelectionState::new();
        state.initialize(&catalog);
        for id in [2, 3, 4] {
            state.toggle_accessory(&catalog, id).unwrap();
        }

        let derivation = derive(&catalog, &state).unwrap();
        assert_eq!(derivation.total_price, 0.6);
    }
}
