//! Product Catalog Snapshot
//!
//! `ProductDetails` mirrors the catalog service response verbatim.
//! `ProductCatalog` is the normalized, immutable form every other
//! component works against: sorted collections, the certification
//! subset resolved once, and the configurable-feature map lowered to an
//! ordered list. Ambiguities in the payload are resolved here and
//! nowhere else.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::accessory::Accessory;
use super::configuration::ConfigurationCategory;
use super::feature::{ConfigurableFeature, ConfigurableFeatureSpec, ProductFeature};
use super::product::Product;
use super::variant::ProductVariant;
use super::visual_asset::VisualAsset;

/// Catalog service response for one product
///
/// `configurable_features` is keyed by feature name; a `BTreeMap` keeps
/// the derived feature order stable across loads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDetails {
    pub product: Product,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    #[serde(default)]
    pub configuration_categories: Vec<ConfigurationCategory>,
    #[serde(default)]
    pub accessories: Vec<Accessory>,
    #[serde(default)]
    pub features: Vec<ProductFeature>,
    #[serde(default)]
    pub visual_assets: Vec<VisualAsset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configurable_features: Option<BTreeMap<String, ConfigurableFeatureSpec>>,
}

impl ProductDetails {
    /// Normalize into the immutable session snapshot
    pub fn normalize(self) -> ProductCatalog {
        let mut variants = self.variants;
        variants.sort_by_key(|v| v.display_order);

        let mut categories = self.configuration_categories;
        categories.sort_by_key(|c| (c.part_code_position, c.display_order));
        for category in &mut categories {
            category.options.sort_by_key(|o| o.display_order);
            let defaults = category.options.iter().filter(|o| o.is_default).count();
            if defaults > 1 {
                tracing::warn!(
                    category = %category.category_name,
                    defaults,
                    "multiple default options; first by display order wins"
                );
            }
        }

        let certifications: Vec<VisualAsset> = self
            .visual_assets
            .iter()
            .filter(|a| a.is_certification())
            .cloned()
            .collect();

        let configurable_features: Vec<ConfigurableFeature> = self
            .configurable_features
            .unwrap_or_default()
            .iter()
            .map(|(name, spec)| ConfigurableFeature::from_spec(name, spec))
            .collect();

        for pair in configurable_features.windows(2) {
            if pair[0].configurable
                && pair[1].configurable
                && pair[0].code_letter == pair[1].code_letter
            {
                tracing::warn!(
                    first = %pair[0].name,
                    second = %pair[1].name,
                    letter = %pair[0].code_letter,
                    "configurable features share a part-code letter; codes may be ambiguous"
                );
            }
        }

        ProductCatalog {
            product: self.product,
            variants,
            configuration_categories: categories,
            accessories: self.accessories,
            features: self.features,
            visual_assets: self.visual_assets,
            certifications,
            configurable_features,
        }
    }
}

/// Immutable catalog snapshot for one configuration session
///
/// Variants are ordered by display order, configuration categories by
/// part-code position, options by display order, configurable features
/// by name. No component mutates this in place; derived values are
/// computed fresh from it on every edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCatalog {
    pub product: Product,
    pub variants: Vec<ProductVariant>,
    pub configuration_categories: Vec<ConfigurationCategory>,
    pub accessories: Vec<Accessory>,
    pub features: Vec<ProductFeature>,
    pub visual_assets: Vec<VisualAsset>,
    /// Certification subset of `visual_assets`, resolved at load
    pub certifications: Vec<VisualAsset>,
    pub configurable_features: Vec<ConfigurableFeature>,
}

impl ProductCatalog {
    pub fn variant(&self, variant_id: i64) -> Option<&ProductVariant> {
        self.variants.iter().find(|v| v.id == variant_id)
    }

    /// First variant by display order; the initial default
    pub fn first_variant(&self) -> Option<&ProductVariant> {
        self.variants.first()
    }

    pub fn category(&self, category_name: &str) -> Option<&ConfigurationCategory> {
        self.configuration_categories
            .iter()
            .find(|c| c.category_name == category_name)
    }

    /// Resolve a (category name, option id) selection entry
    pub fn option(&self, category_name: &str, option_id: i64) -> Option<&super::ConfigurationOption> {
        self.category(category_name)?.option(option_id)
    }

    pub fn accessory(&self, accessory_id: i64) -> Option<&Accessory> {
        self.accessories.iter().find(|a| a.id == accessory_id)
    }

    pub fn configurable_feature(&self, name: &str) -> Option<&ConfigurableFeature> {
        self.configurable_features.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_service_payload() {
        let json = r#"{
            "product": {
                "id": 7,
                "category_id": 1,
                "name": "Orbit 100",
                "base_part_code": "DL100",
                "description": null,
                "product_image_url": null,
                "dimension_image_url": null
            },
            "variants": [{
                "id": 70,
                "product_id": 7,
                "variant_name": "15W",
                "part_code_suffix": "-A",
                "system_output": 1500,
                "system_power": 15,
                "efficiency": 100,
                "specifications": {"CRI": ">90"},
                "base_price": 50.0,
                "display_order": 1
            }],
            "configuration_categories": [],
            "accessories": [{
                "id": 900,
                "product_id": 7,
                "name": "Trim Ring",
                "part_code": "TR-01",
                "description": null,
                "accessory_category": "trims",
                "image_url": null
            }],
            "features": [],
            "visual_assets": [],
            "configurable_features": {
                "Housing Color": {"configurable": true, "default_value": "BLACK", "values": ["BLACK", "WHITE"]}
            }
        }"#;

        let details: ProductDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.product.base_part_code, "DL100");
        // Missing accessory price column defaults to free
        assert_eq!(details.accessories[0].price, 0.0);

        let catalog = details.normalize();
        assert_eq!(catalog.configurable_features.len(), 1);
        assert_eq!(catalog.configurable_features[0].code_letter, "H");
        assert_eq!(catalog.first_variant().unwrap().variant_name, "15W");
    }

    #[test]
    fn test_normalize_sorts_collections() {
        let json = r#"{
            "product": {"id": 1, "category_id": 1, "name": "P", "base_part_code": "P1",
                        "description": null, "product_image_url": null, "dimension_image_url": null},
            "variants": [
                {"id": 2, "product_id": 1, "variant_name": "B", "part_code_suffix": "-B",
                 "base_price": 2.0, "display_order": 2},
                {"id": 1, "product_id": 1, "variant_name": "A", "part_code_suffix": "-A",
                 "base_price": 1.0, "display_order": 1}
            ],
            "configuration_categories": [
                {"id": 20, "product_id": 1, "category_name": "color", "category_label": "Color",
                 "part_code_position": 2, "display_order": 1, "options": []},
                {"id": 10, "product_id": 1, "category_name": "beam", "category_label": "Beam",
                 "part_code_position": 1, "display_order": 2, "options": [
                    {"id": 102, "category_id": 10, "option_value": "w", "option_label": "Wide",
                     "part_code_suffix": "W", "price_modifier": 0.0, "is_default": false,
                     "display_order": 2, "option_image_url": null},
                    {"id": 101, "category_id": 10, "option_value": "n", "option_label": "Narrow",
                     "part_code_suffix": "N", "price_modifier": 0.0, "is_default": true,
                     "display_order": 1, "option_image_url": null}
                 ]}
            ]
        }"#;

        let catalog: ProductCatalog = serde_json::from_str::<ProductDetails>(json)
            .unwrap()
            .normalize();

        assert_eq!(catalog.first_variant().unwrap().id, 1);
        assert_eq!(catalog.configuration_categories[0].category_name, "beam");
        assert_eq!(catalog.configuration_categories[0].options[0].id, 101);
        assert_eq!(
            catalog.category("beam").unwrap().default_option().unwrap().id,
            101
        );
    }

    #[test]
    fn test_certifications_resolved_from_assets() {
        let details = ProductDetails {
            product: Product {
                id: 1,
                category_id: 1,
                name: "P".to_string(),
                base_part_code: "P1".to_string(),
                description: None,
                product_image_url: None,
                dimension_image_url: None,
            },
            variants: vec![],
            configuration_categories: vec![],
            accessories: vec![],
            features: vec![],
            visual_assets: vec![
                VisualAsset {
                    id: 1,
                    product_id: 1,
                    asset_type: "certification".to_string(),
                    asset_category: String::new(),
                    file_url: "https://cdn/ce.png".to_string(),
                    file_name: "ce.png".to_string(),
                    display_order: 1,
                },
                VisualAsset {
                    id: 2,
                    product_id: 1,
                    asset_type: "image".to_string(),
                    asset_category: "product_images".to_string(),
                    file_url: "https://cdn/p.png".to_string(),
                    file_name: "p.png".to_string(),
                    display_order: 2,
                },
            ],
            configurable_features: None,
        };

        let catalog = details.normalize();
        assert_eq!(catalog.certifications.len(), 1);
        assert_eq!(catalog.certifications[0].file_name, "ce.png");
        assert_eq!(catalog.visual_assets.len(), 2);
    }

    #[test]
    fn test_lookup_misses_return_none() {
        let details: ProductDetails = serde_json::from_str(
            r#"{"product": {"id": 1, "category_id": 1, "name": "P", "base_part_code": "P1",
                "description": null, "product_image_url": null, "dimension_image_url": null}}"#,
        )
        .unwrap();
        let catalog = details.normalize();

        assert!(catalog.variant(99).is_none());
        assert!(catalog.category("beam").is_none());
        assert!(catalog.option("beam", 1).is_none());
        assert!(catalog.accessory(5).is_none());
        assert!(catalog.configurable_feature("Finish").is_none());
    }
}
