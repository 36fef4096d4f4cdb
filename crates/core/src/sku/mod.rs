//! SKU draft engine.
//!
//! Derives the SKU rows of a product from its attribute selections and keeps
//! user-entered price/stock values alive across recomputation. Everything in
//! here is synchronous and allocation-only; no I/O.

pub mod combination;
pub mod reconcile;

use serde::{Deserialize, Serialize};

use crate::types::DbId;

pub use combination::{check_combination_limit, combination_count, generate};
pub use reconcile::{diff_drafts, reconcile, regenerate, SkuDiff};

/// Separator placed between attribute values in a composite model key.
pub const MODEL_SEPARATOR: &str = " / ";

/// One attribute row as currently configured in the product form.
///
/// `name` may be blank (row not yet assigned) and `values` may be empty
/// (nothing chosen yet). Such rows are ignored by [`generate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeSelection {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

impl AttributeSelection {
    pub fn new(name: impl Into<String>, values: &[&str]) -> Self {
        Self {
            name: name.into(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    /// A row contributes to the product only when it has a non-blank name
    /// and at least one value.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.values.is_empty()
    }
}

/// An in-memory SKU row being edited in the product form.
///
/// Identity is the `model` key: two drafts are the same SKU iff their models
/// are equal. `price` and `number_in_stock` are raw user input; an empty
/// string means "not entered yet". `backend_id` is set once the SKU exists
/// in the database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSku {
    pub model: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub number_in_stock: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_id: Option<DbId>,
}

impl DraftSku {
    /// A fresh row with no values and no backend identity.
    pub fn empty(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    /// Both price and stock have been entered.
    pub fn has_values(&self) -> bool {
        !self.price.is_empty() && !self.number_in_stock.is_empty()
    }

    /// The SKU has not been created upstream yet.
    pub fn needs_creation(&self) -> bool {
        self.backend_id.is_none()
    }

    /// Price and stock match another row (model and id are ignored).
    pub fn same_values(&self, other: &DraftSku) -> bool {
        self.price == other.price && self.number_in_stock == other.number_in_stock
    }
}

/// Join one value per attribute into a composite model key.
///
/// ```
/// use vitrine_core::sku::model_key;
///
/// assert_eq!(model_key(&["Red", "S"]), "Red / S");
/// assert_eq!(model_key::<&str>(&[]), "");
/// ```
pub fn model_key<S: AsRef<str>>(values: &[S]) -> String {
    let mut key = String::new();
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            key.push_str(MODEL_SEPARATOR);
        }
        key.push_str(value.as_ref());
    }
    key
}

/// Drop every row with the given model, as when the user deletes a row from
/// the SKU table. Returns a new list; the input is left untouched.
pub fn remove_draft(drafts: &[DraftSku], model: &str) -> Vec<DraftSku> {
    drafts
        .iter()
        .filter(|d| d.model != model)
        .cloned()
        .collect()
}
