//! Catalog validation rules and attribute resolution.
//!
//! Mirrors the rules the dashboard forms enforce so the server rejects the
//! same input the UI would, and normalizes attribute references coming from
//! the form into [`AttributeSelection`] rows.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::sku::{check_combination_limit, AttributeSelection};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const MIN_PRODUCT_NAME_LENGTH: usize = 2;
pub const MAX_PRODUCT_NAME_LENGTH: usize = 100;

pub const MIN_ATTRIBUTE_NAME_LENGTH: usize = 2;
pub const MAX_ATTRIBUTE_NAME_LENGTH: usize = 50;

pub const MAX_ATTRIBUTE_VALUE_LENGTH: usize = 100;

/// Maximum number of values a single attribute may carry.
pub const MAX_VALUES_PER_ATTRIBUTE: usize = 10;

/// Maximum number of attributes on one product.
pub const MAX_ATTRIBUTES_PER_PRODUCT: usize = 20;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\s]+$").expect("valid regex"));

static VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\s,.\-]+$").expect("valid regex"));

static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+)?$").expect("valid regex"));

static STOCK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_label(label: &str, name: &str, min: usize, max: usize) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{label} is required")));
    }
    let len = trimmed.chars().count();
    if len < min {
        return Err(CoreError::Validation(format!(
            "{label} must be at least {min} characters"
        )));
    }
    if len > max {
        return Err(CoreError::Validation(format!(
            "{label} must not exceed {max} characters, got {len}"
        )));
    }
    if !NAME_RE.is_match(trimmed) {
        return Err(CoreError::Validation(format!(
            "{label} can only contain letters, numbers, and spaces"
        )));
    }
    Ok(())
}

/// Validate a product name: 2-100 characters of letters, digits and spaces.
pub fn validate_product_name(name: &str) -> Result<(), CoreError> {
    validate_label(
        "Product name",
        name,
        MIN_PRODUCT_NAME_LENGTH,
        MAX_PRODUCT_NAME_LENGTH,
    )
}

/// Validate an attribute name: 2-50 characters of letters, digits and spaces.
pub fn validate_attribute_name(name: &str) -> Result<(), CoreError> {
    validate_label(
        "Attribute name",
        name,
        MIN_ATTRIBUTE_NAME_LENGTH,
        MAX_ATTRIBUTE_NAME_LENGTH,
    )
}

/// Validate the value list of an attribute (catalog entry or product row).
pub fn validate_attribute_values(values: &[String]) -> Result<(), CoreError> {
    if values.is_empty() {
        return Err(CoreError::Validation(
            "At least one attribute value is required".to_string(),
        ));
    }
    if values.len() > MAX_VALUES_PER_ATTRIBUTE {
        return Err(CoreError::Validation(format!(
            "Maximum {MAX_VALUES_PER_ATTRIBUTE} attribute values allowed, got {}",
            values.len()
        )));
    }
    for value in values {
        if value.is_empty() {
            return Err(CoreError::Validation("Value is required".to_string()));
        }
        if value.chars().count() > MAX_ATTRIBUTE_VALUE_LENGTH {
            return Err(CoreError::Validation(format!(
                "Value must not exceed {MAX_ATTRIBUTE_VALUE_LENGTH} characters"
            )));
        }
        if !VALUE_RE.is_match(value) {
            return Err(CoreError::Validation(format!(
                "Value '{value}' can only contain letters, numbers, spaces, commas, dots, and hyphens"
            )));
        }
    }
    Ok(())
}

/// Validate the attribute rows a product is submitted with.
///
/// Blank-name rows must already have been dropped (see
/// [`submitted_attributes`]); every remaining row is fully validated, and the
/// rows together must stay within
/// [`MAX_COMBINATIONS`](crate::sku::combination::MAX_COMBINATIONS).
pub fn validate_product_attributes(attributes: &[AttributeSelection]) -> Result<(), CoreError> {
    if attributes.len() > MAX_ATTRIBUTES_PER_PRODUCT {
        return Err(CoreError::Validation(format!(
            "Maximum {MAX_ATTRIBUTES_PER_PRODUCT} attributes allowed, got {}",
            attributes.len()
        )));
    }
    for attribute in attributes {
        validate_attribute_name(&attribute.name)?;
        validate_attribute_values(&attribute.values)?;
    }
    check_combination_limit(attributes)?;
    Ok(())
}

/// Validate a price string: a non-negative decimal such as `10` or `9.99`.
pub fn validate_price(price: &str) -> Result<(), CoreError> {
    if price.is_empty() {
        return Err(CoreError::Validation("Price is required".to_string()));
    }
    if !PRICE_RE.is_match(price) {
        return Err(CoreError::Validation(format!(
            "Price must be a non-negative decimal number, got '{price}'"
        )));
    }
    Ok(())
}

/// Validate a stock string: a non-negative whole number that fits in `i32`.
pub fn validate_stock(stock: &str) -> Result<(), CoreError> {
    if stock.is_empty() {
        return Err(CoreError::Validation("Stock is required".to_string()));
    }
    if !STOCK_RE.is_match(stock) || stock.parse::<i32>().is_err() {
        return Err(CoreError::Validation(format!(
            "Stock must be a non-negative whole number, got '{stock}'"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Attribute resolution
// ---------------------------------------------------------------------------

/// A catalog attribute in normalized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    pub id: DbId,
    pub name: String,
    pub values: Vec<String>,
}

/// An attribute row as submitted by the form: `attribute` holds either the
/// catalog id (as text) or the attribute name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeReference {
    #[serde(default)]
    pub attribute: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// Resolve form references against the attribute catalog.
///
/// A reference matches a catalog entry by id first, then by exact name.
/// Matched rows take the catalog's canonical name; unmatched rows keep their
/// trimmed text. Values pass through untouched and row order is preserved.
pub fn resolve_selections(
    catalog: &[AttributeDefinition],
    references: &[AttributeReference],
) -> Vec<AttributeSelection> {
    references
        .iter()
        .map(|reference| {
            let key = reference.attribute.trim();
            let by_id = key
                .parse::<DbId>()
                .ok()
                .and_then(|id| catalog.iter().find(|a| a.id == id));
            let resolved = by_id.or_else(|| catalog.iter().find(|a| a.name == key));

            AttributeSelection {
                name: resolved.map_or_else(|| key.to_string(), |a| a.name.clone()),
                values: reference.values.clone(),
            }
        })
        .collect()
}

/// Catalog entries not yet picked by any named selection, in catalog order.
pub fn available_attributes<'a>(
    catalog: &'a [AttributeDefinition],
    selections: &[AttributeSelection],
) -> Vec<&'a AttributeDefinition> {
    catalog
        .iter()
        .filter(|a| {
            !selections
                .iter()
                .any(|s| !s.name.trim().is_empty() && s.name.trim() == a.name)
        })
        .collect()
}

/// The attribute rows persisted on a product: blank-name rows are dropped and
/// names are trimmed.
pub fn submitted_attributes(selections: &[AttributeSelection]) -> Vec<AttributeSelection> {
    selections
        .iter()
        .filter(|s| !s.name.trim().is_empty())
        .map(|s| AttributeSelection {
            name: s.name.trim().to_string(),
            values: s.values.clone(),
        })
        .collect()
}
