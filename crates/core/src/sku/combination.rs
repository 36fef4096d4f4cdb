//! Combination generator: attribute selections -> draft SKU rows.

use super::{model_key, AttributeSelection, DraftSku};
use crate::error::CoreError;

/// Upper bound on rows the API will generate for a single product.
pub const MAX_COMBINATIONS: usize = 1000;

/// Expand attribute selections into one draft per value combination.
///
/// Incomplete rows (blank name or no values) are skipped rather than treated
/// as an empty factor. With no complete rows the result is empty.
///
/// Combinations come out in odometer order: the last attribute's values vary
/// fastest, and every value list is walked in its given order. Duplicate
/// values are not collapsed.
pub fn generate(selections: &[AttributeSelection]) -> Vec<DraftSku> {
    let factors: Vec<&[String]> = selections
        .iter()
        .filter(|s| s.is_complete())
        .map(|s| s.values.as_slice())
        .collect();

    if factors.is_empty() {
        return Vec::new();
    }

    let mut tuples: Vec<Vec<&str>> = vec![Vec::new()];
    for values in factors {
        let mut next = Vec::with_capacity(tuples.len() * values.len());
        for tuple in &tuples {
            for value in values {
                let mut extended = Vec::with_capacity(tuple.len() + 1);
                extended.extend_from_slice(tuple);
                extended.push(value.as_str());
                next.push(extended);
            }
        }
        tuples = next;
    }

    tuples
        .iter()
        .map(|tuple| DraftSku::empty(model_key(tuple)))
        .collect()
}

/// Number of rows [`generate`] would produce, without building them.
///
/// Saturates at `usize::MAX` instead of overflowing.
pub fn combination_count(selections: &[AttributeSelection]) -> usize {
    let mut complete = selections.iter().filter(|s| s.is_complete()).peekable();
    if complete.peek().is_none() {
        return 0;
    }
    complete.fold(1usize, |acc, s| acc.saturating_mul(s.values.len()))
}

/// Reject selections that would expand past [`MAX_COMBINATIONS`] rows.
///
/// Returns the combination count when it is within bounds. Every caller that
/// materializes rows from untrusted or stored selections goes through here
/// first.
pub fn check_combination_limit(selections: &[AttributeSelection]) -> Result<usize, CoreError> {
    let count = combination_count(selections);
    if count > MAX_COMBINATIONS {
        return Err(CoreError::Validation(format!(
            "Attribute selections produce {count} combinations, maximum is {MAX_COMBINATIONS}"
        )));
    }
    Ok(count)
}
