//! Transactional product submission.
//!
//! [`submit_product`] plans the SKU writes in `vitrine_core`, then executes
//! them through [`PgCatalogWriter`] inside a single database transaction. Any
//! failure rolls the whole submission back.

use async_trait::async_trait;
use serde::Deserialize;
use sqlx::{Postgres, Transaction};
use vitrine_core::catalog::{
    submitted_attributes, validate_product_attributes, validate_product_name,
};
use vitrine_core::error::CoreError;
use vitrine_core::sku::{AttributeSelection, DraftSku};
use vitrine_core::submission::{
    plan_submission, submit, CatalogWriter, ProductRecord, SkuFields, SubmissionOutcome,
};
use vitrine_core::types::DbId;
use vitrine_db::models::product::{CreateProduct, UpdateProduct};
use vitrine_db::models::sku::{CreateSku, UpdateSku};
use vitrine_db::repositories::{ProductRepo, SkuRepo};
use vitrine_db::DbPool;

use crate::error::{AppError, AppResult};

/// Body of `POST /products` and `PUT /products/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSubmission {
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<AttributeSelection>,
    #[serde(default)]
    pub skus: Vec<DraftSku>,
}

/// [`CatalogWriter`] backed by an open Postgres transaction.
pub struct PgCatalogWriter<'a> {
    tx: &'a mut Transaction<'static, Postgres>,
    product_id: Option<DbId>,
}

impl<'a> PgCatalogWriter<'a> {
    /// `product_id` is `None` when the submission creates a new product.
    pub fn new(tx: &'a mut Transaction<'static, Postgres>, product_id: Option<DbId>) -> Self {
        Self { tx, product_id }
    }
}

fn parse_stock(stock: &str) -> Result<i32, AppError> {
    stock.parse::<i32>().map_err(|_| {
        AppError::Core(CoreError::Validation(format!(
            "Stock must be a non-negative whole number, got '{stock}'"
        )))
    })
}

#[async_trait]
impl CatalogWriter for PgCatalogWriter<'_> {
    type Error = AppError;

    async fn create_sku(&mut self, fields: &SkuFields) -> Result<DbId, AppError> {
        let input = CreateSku {
            model: fields.model.clone(),
            price: fields.price.clone(),
            number_in_stock: parse_stock(&fields.number_in_stock)?,
        };
        let sku = SkuRepo::create(&mut **self.tx, &input).await?;
        tracing::debug!(sku_id = sku.id, model = %sku.model, "SKU created");
        Ok(sku.id)
    }

    async fn update_sku(&mut self, id: DbId, fields: &SkuFields) -> Result<(), AppError> {
        let input = UpdateSku {
            model: Some(fields.model.clone()),
            price: Some(fields.price.clone()),
            number_in_stock: Some(parse_stock(&fields.number_in_stock)?),
        };
        SkuRepo::update(&mut **self.tx, id, &input)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound { entity: "Sku", id }))?;
        tracing::debug!(sku_id = id, model = %fields.model, "SKU updated");
        Ok(())
    }

    async fn save_product(&mut self, product: &ProductRecord) -> Result<DbId, AppError> {
        let product_id = match self.product_id {
            None => {
                let input = CreateProduct {
                    name: product.name.clone(),
                    attributes: product.attributes.clone(),
                };
                ProductRepo::create(&mut **self.tx, &input).await?.id
            }
            Some(id) => {
                let input = UpdateProduct {
                    name: Some(product.name.clone()),
                    attributes: Some(product.attributes.clone()),
                };
                ProductRepo::update(&mut **self.tx, id, &input)
                    .await?
                    .ok_or(AppError::Core(CoreError::NotFound {
                        entity: "Product",
                        id,
                    }))?
                    .id
            }
        };
        ProductRepo::set_skus(&mut *self.tx, product_id, &product.sku_ids).await?;
        Ok(product_id)
    }
}

/// Validate, plan and persist a product submission in one transaction.
///
/// `product_id` selects between creating a product (`None`) and replacing an
/// existing one's name, attributes and SKU list. SKUs that drop out of the
/// list are detached from the product but never deleted. Attribute rows that
/// would expand past the combination limit are rejected before any write.
pub async fn submit_product(
    pool: &DbPool,
    product_id: Option<DbId>,
    request: &ProductSubmission,
) -> AppResult<SubmissionOutcome> {
    validate_product_name(&request.name)?;
    let attributes = submitted_attributes(&request.attributes);
    validate_product_attributes(&attributes)?;

    let mut tx = pool.begin().await?;

    // Only SKUs already attached to this product can be kept or updated; a
    // backend id owned by another product plans as not found.
    let owned: Vec<DbId> = match product_id {
        Some(id) => {
            ProductRepo::find_by_id(&mut *tx, id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Product",
                    id,
                }))?;
            ProductRepo::sku_ids(&mut *tx, id).await?
        }
        None => Vec::new(),
    };
    let persisted: Vec<DraftSku> = SkuRepo::find_by_ids(&mut *tx, &owned)
        .await?
        .iter()
        .map(|sku| sku.to_draft())
        .collect();

    let plan = plan_submission(&request.skus, &persisted)?;
    tracing::debug!(
        creates = plan.create_count(),
        updates = plan.update_count(),
        skipped = plan.skipped.len(),
        "Submission planned"
    );

    let outcome = {
        let mut writer = PgCatalogWriter::new(&mut tx, product_id);
        submit(&mut writer, &request.name, &attributes, &plan).await?
    };

    tx.commit().await?;
    Ok(outcome)
}
