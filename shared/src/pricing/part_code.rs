//! Part-code assembly
//!
//! The part code is an ordered, hyphen-joined concatenation: product
//! base code, variant suffix, option suffixes in catalog part-code
//! position order, then one prefixed token per configurable feature.
//! The order comes from the catalog, never from the order in which the
//! user happened to make selections, so the same configuration always
//! produces the same code.

use crate::models::{
    CUSTOM_VALUE, ConfigurableFeature, NOT_APPLICABLE, ProductCatalog, ProductVariant,
};
use crate::selection::{FeatureSelection, SelectionState};

/// Uppercase a feature value and strip all whitespace
///
/// "royal blue" and "Royal Blue" both become "ROYALBLUE".
pub fn normalize_feature_value(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Part-code token for one configurable feature, if it contributes one.
///
/// Fixed features never contribute. A resolved value of N/A contributes
/// nothing, and CUSTOM substitutes the free text (normalized); empty
/// custom text also contributes nothing.
pub fn feature_token(
    feature: &ConfigurableFeature,
    selection: Option<&FeatureSelection>,
) -> Option<String> {
    if !feature.configurable {
        return None;
    }

    let (value, custom_text) = match selection {
        Some(s) => (s.value.as_str(), s.custom_text.as_deref()),
        None => (feature.default_value.as_str(), None),
    };

    let resolved = if value == CUSTOM_VALUE {
        custom_text.unwrap_or("")
    } else {
        value
    };
    if resolved == NOT_APPLICABLE {
        return None;
    }

    let normalized = normalize_feature_value(resolved);
    if normalized.is_empty() {
        return None;
    }
    Some(format!("{}{}", feature.code_letter, normalized))
}

/// Assemble the full part code for the selected variant.
///
/// Stale selection entries resolve to nothing and are simply omitted;
/// the pricing pass is responsible for logging them.
pub fn build_part_code(
    catalog: &ProductCatalog,
    variant: &ProductVariant,
    selection: &SelectionState,
) -> String {
    // Legacy catalog rows store suffixes with their own leading hyphen
    // ("-A"); the joiner owns the separator.
    fn push<'a>(fragments: &mut Vec<&'a str>, fragment: &'a str) {
        let trimmed = fragment.trim_start_matches('-');
        if !trimmed.is_empty() {
            fragments.push(trimmed);
        }
    }

    let mut fragments: Vec<&str> = Vec::new();
    push(&mut fragments, &catalog.product.base_part_code);
    push(&mut fragments, &variant.part_code_suffix);

    // Categories are already sorted by part_code_position at load
    for category in &catalog.configuration_categories {
        if category.part_code_position <= 0 {
            continue;
        }
        let Some(&option_id) = selection.selected_options.get(&category.category_name) else {
            continue;
        };
        let Some(option) = category.option(option_id) else {
            continue;
        };
        push(&mut fragments, &option.part_code_suffix);
    }

    let tokens: Vec<String> = catalog
        .configurable_features
        .iter()
        .filter_map(|f| feature_token(f, selection.feature_selections.get(&f.name)))
        .collect();

    fragments
        .iter()
        .copied()
        .chain(tokens.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join("-")
}
