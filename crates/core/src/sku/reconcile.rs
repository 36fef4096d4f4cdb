//! Merging regenerated rows with previously entered draft state.

use std::collections::HashMap;

use serde::Serialize;

use super::{generate, AttributeSelection, DraftSku};
use crate::diff::DiffStatus;

/// Merge freshly generated rows with the previous draft list.
///
/// Output follows `fresh` order. A row whose model already existed carries
/// over the previous price, stock and backend id; a new model is emitted as
/// generated. Previous rows whose model is gone are dropped. If `previous`
/// holds the same model twice, the first occurrence wins.
pub fn reconcile(previous: &[DraftSku], fresh: &[DraftSku]) -> Vec<DraftSku> {
    let mut by_model: HashMap<&str, &DraftSku> = HashMap::with_capacity(previous.len());
    for draft in previous {
        by_model.entry(draft.model.as_str()).or_insert(draft);
    }

    fresh
        .iter()
        .map(|generated| match by_model.get(generated.model.as_str()) {
            Some(prev) => DraftSku {
                model: generated.model.clone(),
                price: prev.price.clone(),
                number_in_stock: prev.number_in_stock.clone(),
                backend_id: prev.backend_id,
            },
            None => generated.clone(),
        })
        .collect()
}

/// Recompute combinations for `selections` and reconcile them against
/// `previous` in one step.
pub fn regenerate(selections: &[AttributeSelection], previous: &[DraftSku]) -> Vec<DraftSku> {
    reconcile(previous, &generate(selections))
}

/// A single row of a drafts-vs-persisted comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuDiff {
    pub model: String,
    pub status: DiffStatus,
    /// The draft row, absent for `removed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<DraftSku>,
    /// The persisted row, absent for `added`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persisted: Option<DraftSku>,
}

/// Compare drafts against the SKUs already persisted for a product.
///
/// Draft rows come first in draft order, followed by persisted rows that no
/// longer appear among the drafts (`removed`). A draft counts as `changed`
/// when its price or stock differ from the persisted row with the same model.
pub fn diff_drafts(persisted: &[DraftSku], drafts: &[DraftSku]) -> Vec<SkuDiff> {
    let mut by_model: HashMap<&str, &DraftSku> = HashMap::with_capacity(persisted.len());
    for sku in persisted {
        by_model.entry(sku.model.as_str()).or_insert(sku);
    }

    let mut diffs: Vec<SkuDiff> = drafts
        .iter()
        .map(|draft| {
            let stored = by_model.get(draft.model.as_str()).copied();
            let status = match stored {
                None => DiffStatus::Added,
                Some(p) if p.same_values(draft) => DiffStatus::Unchanged,
                Some(_) => DiffStatus::Changed,
            };
            SkuDiff {
                model: draft.model.clone(),
                status,
                draft: Some(draft.clone()),
                persisted: stored.cloned(),
            }
        })
        .collect();

    let draft_models: std::collections::HashSet<&str> =
        drafts.iter().map(|d| d.model.as_str()).collect();
    diffs.extend(
        persisted
            .iter()
            .filter(|p| !draft_models.contains(p.model.as_str()))
            .map(|p| SkuDiff {
                model: p.model.clone(),
                status: DiffStatus::Removed,
                draft: None,
                persisted: Some(p.clone()),
            }),
    );

    diffs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(model: &str, price: &str, stock: &str, id: Option<i64>) -> DraftSku {
        DraftSku {
            model: model.into(),
            price: price.into(),
            number_in_stock: stock.into(),
            backend_id: id,
        }
    }

    fn fresh(models: &[&str]) -> Vec<DraftSku> {
        models.iter().map(|m| DraftSku::empty(*m)).collect()
    }

    #[test]
    fn new_value_adds_empty_row() {
        let previous = vec![filled("Red / S", "10", "5", None)];
        let merged = reconcile(&previous, &fresh(&["Red / S", "Red / M"]));
        assert_eq!(
            merged,
            vec![filled("Red / S", "10", "5", None), DraftSku::empty("Red / M")]
        );
    }

    #[test]
    fn deselected_value_prunes_row() {
        let previous = vec![
            filled("Red / S", "10", "5", None),
            filled("Red / M", "12", "2", Some(4)),
        ];
        let merged = reconcile(&previous, &fresh(&["Red / S"]));
        assert_eq!(merged, vec![filled("Red / S", "10", "5", None)]);
    }

    #[test]
    fn backend_id_is_carried_forward() {
        let previous = vec![filled("Blue / L", "", "", Some(42))];
        let merged = reconcile(&previous, &fresh(&["Blue / L"]));
        assert_eq!(merged[0].backend_id, Some(42));
    }

    #[test]
    fn output_follows_fresh_order() {
        let previous = vec![
            filled("B", "2", "2", None),
            filled("A", "1", "1", None),
        ];
        let merged = reconcile(&previous, &fresh(&["A", "B"]));
        assert_eq!(merged[0].model, "A");
        assert_eq!(merged[0].price, "1");
        assert_eq!(merged[1].model, "B");
    }

    #[test]
    fn reconcile_is_idempotent() {
        let previous = vec![
            filled("Red / S", "10", "5", Some(1)),
            filled("Gone", "1", "1", None),
        ];
        let generated = fresh(&["Red / S", "Red / M", "Blue / S"]);
        let once = reconcile(&previous, &generated);
        let twice = reconcile(&once, &generated);
        assert_eq!(once, twice);
    }

    #[test]
    fn key_set_matches_fresh_exactly() {
        let previous = vec![filled("X", "1", "1", None), filled("Y", "2", "2", None)];
        let generated = fresh(&["Y", "Z"]);
        let merged = reconcile(&previous, &generated);
        let keys: Vec<&str> = merged.iter().map(|d| d.model.as_str()).collect();
        assert_eq!(keys, vec!["Y", "Z"]);
    }

    #[test]
    fn first_duplicate_in_previous_wins() {
        let previous = vec![filled("A", "1", "1", None), filled("A", "9", "9", None)];
        let merged = reconcile(&previous, &fresh(&["A"]));
        assert_eq!(merged, vec![filled("A", "1", "1", None)]);
    }

    #[test]
    fn empty_fresh_clears_everything() {
        let previous = vec![filled("A", "1", "1", Some(3))];
        assert!(reconcile(&previous, &[]).is_empty());
    }

    #[test]
    fn inputs_are_not_mutated() {
        let previous = vec![filled("A", "1", "1", None)];
        let generated = fresh(&["A", "B"]);
        let _ = reconcile(&previous, &generated);
        assert_eq!(previous, vec![filled("A", "1", "1", None)]);
        assert_eq!(generated, fresh(&["A", "B"]));
    }

    #[test]
    fn regenerate_keeps_entered_values_when_size_added() {
        let before = vec![
            AttributeSelection::new("Color", &["Red"]),
            AttributeSelection::new("Size", &["S"]),
        ];
        let mut drafts = regenerate(&before, &[]);
        drafts[0].price = "10".into();
        drafts[0].number_in_stock = "5".into();

        let after = vec![
            AttributeSelection::new("Color", &["Red"]),
            AttributeSelection::new("Size", &["S", "M"]),
        ];
        let drafts = regenerate(&after, &drafts);
        assert_eq!(
            drafts,
            vec![filled("Red / S", "10", "5", None), DraftSku::empty("Red / M")]
        );
    }

    #[test]
    fn diff_classifies_rows() {
        let persisted = vec![
            filled("Red / S", "10", "5", Some(1)),
            filled("Red / M", "12", "3", Some(2)),
            filled("Red / L", "14", "1", Some(3)),
        ];
        let drafts = vec![
            filled("Red / S", "10", "5", Some(1)),
            filled("Red / M", "15", "3", Some(2)),
            DraftSku::empty("Red / XL"),
        ];

        let diffs = diff_drafts(&persisted, &drafts);
        let statuses: Vec<(&str, DiffStatus)> =
            diffs.iter().map(|d| (d.model.as_str(), d.status)).collect();
        assert_eq!(
            statuses,
            vec![
                ("Red / S", DiffStatus::Unchanged),
                ("Red / M", DiffStatus::Changed),
                ("Red / XL", DiffStatus::Added),
                ("Red / L", DiffStatus::Removed),
            ]
        );
        assert!(diffs[2].persisted.is_none());
        assert!(diffs[3].draft.is_none());
    }

    #[test]
    fn diff_of_identical_lists_is_all_unchanged() {
        let rows = vec![filled("A", "1", "1", Some(1)), filled("B", "2", "2", Some(2))];
        assert!(diff_drafts(&rows, &rows)
            .iter()
            .all(|d| d.status == DiffStatus::Unchanged));
    }
}
