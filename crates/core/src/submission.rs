//! Product submission: turning the final draft list into persistence calls.
//!
//! Planning is pure: [`plan_submission`] validates the drafts and decides,
//! row by row, whether a SKU is kept, updated or created. Execution goes
//! through an injected [`CatalogWriter`] and runs strictly in order; the
//! first failed write aborts the run. Drafts are only ever borrowed, so a
//! failed submission leaves the caller's state exactly as it was.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use serde::Serialize;

use crate::catalog::{validate_price, validate_stock};
use crate::error::CoreError;
use crate::sku::{AttributeSelection, DraftSku};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

/// Field values for a SKU write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuFields {
    pub model: String,
    pub price: String,
    pub number_in_stock: String,
}

impl From<&DraftSku> for SkuFields {
    fn from(draft: &DraftSku) -> Self {
        Self {
            model: draft.model.clone(),
            price: draft.price.clone(),
            number_in_stock: draft.number_in_stock.clone(),
        }
    }
}

/// What to do with one draft row on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionStep {
    /// Already persisted with identical values.
    Keep { id: DbId },
    /// Already persisted but edited since.
    Update { id: DbId, fields: SkuFields },
    /// Not persisted yet.
    Create(SkuFields),
}

/// Ordered steps for a submission, in draft order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionPlan {
    pub steps: Vec<SubmissionStep>,
    /// Models of unsaved rows left out because price or stock is missing.
    pub skipped: Vec<String>,
}

impl SubmissionPlan {
    pub fn create_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, SubmissionStep::Create(_)))
            .count()
    }

    pub fn update_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, SubmissionStep::Update { .. }))
            .count()
    }
}

fn for_model(model: &str, err: CoreError) -> CoreError {
    match err {
        CoreError::Validation(msg) => CoreError::Validation(format!("SKU '{model}': {msg}")),
        other => other,
    }
}

fn validate_fields(draft: &DraftSku) -> Result<(), CoreError> {
    validate_price(&draft.price).map_err(|e| for_model(&draft.model, e))?;
    validate_stock(&draft.number_in_stock).map_err(|e| for_model(&draft.model, e))
}

/// Decide what each draft row needs on submit.
///
/// `persisted` holds the stored state of the SKUs the product currently owns.
/// A draft whose `backend_id` is missing from it is reported as not found, so
/// a submission can never rewrite a SKU belonging to another product.
/// Rows without a backend id and with a missing price or stock are skipped.
/// Duplicate models and an empty resulting plan are rejected.
pub fn plan_submission(
    drafts: &[DraftSku],
    persisted: &[DraftSku],
) -> Result<SubmissionPlan, CoreError> {
    let stored: HashMap<DbId, &DraftSku> = persisted
        .iter()
        .filter_map(|p| p.backend_id.map(|id| (id, p)))
        .collect();

    let mut seen = HashSet::with_capacity(drafts.len());
    let mut plan = SubmissionPlan::default();

    for draft in drafts {
        if draft.model.trim().is_empty() {
            return Err(CoreError::Validation("Model is required".to_string()));
        }
        if !seen.insert(draft.model.as_str()) {
            return Err(CoreError::Validation(format!(
                "Duplicate SKU model '{}'",
                draft.model
            )));
        }

        match draft.backend_id {
            Some(id) => {
                let current = stored
                    .get(&id)
                    .ok_or(CoreError::NotFound { entity: "Sku", id })?;
                if current.model == draft.model && current.same_values(draft) {
                    plan.steps.push(SubmissionStep::Keep { id });
                } else {
                    validate_fields(draft)?;
                    plan.steps.push(SubmissionStep::Update {
                        id,
                        fields: draft.into(),
                    });
                }
            }
            None if draft.has_values() => {
                validate_fields(draft)?;
                plan.steps.push(SubmissionStep::Create(draft.into()));
            }
            None => plan.skipped.push(draft.model.clone()),
        }
    }

    if plan.steps.is_empty() {
        return Err(CoreError::Validation(
            "At least one SKU with price and stock is required".to_string(),
        ));
    }

    Ok(plan)
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

/// The product as handed to the writer once every SKU is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub name: String,
    pub attributes: Vec<AttributeSelection>,
    pub sku_ids: Vec<DbId>,
}

/// Persistence seam used by [`submit`].
///
/// Implementations decide transactionality; `submit` only guarantees call
/// order and that nothing runs after the first error.
#[async_trait]
pub trait CatalogWriter: Send {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn create_sku(&mut self, fields: &SkuFields) -> Result<DbId, Self::Error>;

    async fn update_sku(&mut self, id: DbId, fields: &SkuFields) -> Result<(), Self::Error>;

    /// Create or update the product, returning its id.
    async fn save_product(&mut self, product: &ProductRecord) -> Result<DbId, Self::Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError<E: std::error::Error + 'static> {
    #[error("Failed to save SKU '{model}': {source}")]
    Sku {
        model: String,
        #[source]
        source: E,
    },

    #[error("Failed to save product: {0}")]
    Product(#[source] E),
}

/// A SKU created during submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedSku {
    pub model: String,
    pub id: DbId,
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionOutcome {
    pub product_id: DbId,
    pub sku_ids: Vec<DbId>,
    pub created: Vec<CreatedSku>,
    pub updated: Vec<DbId>,
    pub skipped: Vec<String>,
}

/// Execute a plan: write SKUs one at a time, then save the product with the
/// ordered, de-duplicated list of every resulting SKU id.
pub async fn submit<W>(
    writer: &mut W,
    name: &str,
    attributes: &[AttributeSelection],
    plan: &SubmissionPlan,
) -> Result<SubmissionOutcome, SubmissionError<W::Error>>
where
    W: CatalogWriter + ?Sized,
{
    let mut sku_ids = Vec::with_capacity(plan.steps.len());
    let mut created = Vec::new();
    let mut updated = Vec::new();

    for step in &plan.steps {
        let id = match step {
            SubmissionStep::Keep { id } => *id,
            SubmissionStep::Update { id, fields } => {
                writer
                    .update_sku(*id, fields)
                    .await
                    .map_err(|source| SubmissionError::Sku {
                        model: fields.model.clone(),
                        source,
                    })?;
                updated.push(*id);
                *id
            }
            SubmissionStep::Create(fields) => {
                let id = writer
                    .create_sku(fields)
                    .await
                    .map_err(|source| SubmissionError::Sku {
                        model: fields.model.clone(),
                        source,
                    })?;
                created.push(CreatedSku {
                    model: fields.model.clone(),
                    id,
                });
                id
            }
        };
        if !sku_ids.contains(&id) {
            sku_ids.push(id);
        }
    }

    let record = ProductRecord {
        name: name.trim().to_string(),
        attributes: attributes.to_vec(),
        sku_ids,
    };
    let product_id = writer
        .save_product(&record)
        .await
        .map_err(SubmissionError::Product)?;

    Ok(SubmissionOutcome {
        product_id,
        sku_ids: record.sku_ids,
        created,
        updated,
        skipped: plan.skipped.clone(),
    })
}
