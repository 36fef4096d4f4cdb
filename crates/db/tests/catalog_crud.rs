//! Integration tests for the catalog repositories.
//!
//! Exercises the repository layer against a real database:
//! - Attribute CRUD and the unique name constraint
//! - SKU CRUD and ordered lookup by ids
//! - Product rows, ordered SKU associations and cascade behaviour
//! - Mapping stored SKUs back into drafts

use sqlx::PgPool;
use vitrine_core::sku::AttributeSelection;
use vitrine_db::models::attribute::{CreateAttribute, UpdateAttribute};
use vitrine_db::models::product::{CreateProduct, UpdateProduct};
use vitrine_db::models::sku::{CreateSku, UpdateSku};
use vitrine_db::repositories::{AttributeRepo, ProductRepo, SkuRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_attribute(name: &str, values: &[&str]) -> CreateAttribute {
    CreateAttribute {
        name: name.to_string(),
        values: values.iter().map(|v| v.to_string()).collect(),
    }
}

fn new_sku(model: &str, price: &str, stock: i32) -> CreateSku {
    CreateSku {
        model: model.to_string(),
        price: price.to_string(),
        number_in_stock: stock,
    }
}

fn new_product(name: &str) -> CreateProduct {
    CreateProduct {
        name: name.to_string(),
        attributes: vec![AttributeSelection::new("Color", &["Red", "Blue"])],
    }
}

// ---------------------------------------------------------------------------
// Attributes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn attribute_create_and_find(pool: PgPool) {
    let created = AttributeRepo::create(&pool, &new_attribute("Color", &["Red", "Blue"]))
        .await
        .unwrap();
    assert_eq!(created.name, "Color");
    assert_eq!(created.values, vec!["Red", "Blue"]);

    let found = AttributeRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.values, created.values);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn attribute_names_are_unique(pool: PgPool) {
    AttributeRepo::create(&pool, &new_attribute("Size", &["S"]))
        .await
        .unwrap();
    let err = AttributeRepo::create(&pool, &new_attribute("Size", &["M"]))
        .await
        .unwrap_err();

    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert_eq!(db_err.constraint(), Some("uq_attributes_name"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn attribute_update_applies_only_given_fields(pool: PgPool) {
    let created = AttributeRepo::create(&pool, &new_attribute("Fit", &["Slim"]))
        .await
        .unwrap();
    let updated = AttributeRepo::update(
        &pool,
        created.id,
        &UpdateAttribute {
            name: None,
            values: Some(vec!["Slim".into(), "Regular".into()]),
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.name, "Fit");
    assert_eq!(updated.values, vec!["Slim", "Regular"]);
    assert!(AttributeRepo::update(&pool, 999_999, &UpdateAttribute { name: None, values: None })
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn attribute_list_is_sorted_by_name(pool: PgPool) {
    AttributeRepo::create(&pool, &new_attribute("Size", &["S"]))
        .await
        .unwrap();
    AttributeRepo::create(&pool, &new_attribute("Color", &["Red"]))
        .await
        .unwrap();

    let names: Vec<String> = AttributeRepo::list(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(names, vec!["Color", "Size"]);
}

// ---------------------------------------------------------------------------
// SKUs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn sku_find_by_ids_preserves_order(pool: PgPool) {
    let a = SkuRepo::create(&pool, &new_sku("Red / S", "10", 5)).await.unwrap();
    let b = SkuRepo::create(&pool, &new_sku("Red / M", "11", 2)).await.unwrap();

    let found = SkuRepo::find_by_ids(&pool, &[b.id, 999_999, a.id])
        .await
        .unwrap();
    let models: Vec<&str> = found.iter().map(|s| s.model.as_str()).collect();
    assert_eq!(models, vec!["Red / M", "Red / S"]);

    assert!(SkuRepo::find_by_ids(&pool, &[]).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sku_update_and_to_draft(pool: PgPool) {
    let sku = SkuRepo::create(&pool, &new_sku("Blue / L", "9.99", 1)).await.unwrap();
    let updated = SkuRepo::update(
        &pool,
        sku.id,
        &UpdateSku {
            number_in_stock: Some(7),
            ..UpdateSku::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    let draft = updated.to_draft();
    assert_eq!(draft.model, "Blue / L");
    assert_eq!(draft.price, "9.99");
    assert_eq!(draft.number_in_stock, "7");
    assert_eq!(draft.backend_id, Some(sku.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sku_negative_stock_is_rejected(pool: PgPool) {
    let result = SkuRepo::create(&pool, &new_sku("Red", "1", -1)).await;
    assert!(result.is_err());
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn product_sku_list_keeps_order_and_replaces(pool: PgPool) {
    let product = ProductRepo::create(&pool, &new_product("Tee")).await.unwrap();
    assert_eq!(product.attributes.0[0].name, "Color");

    let a = SkuRepo::create(&pool, &new_sku("Red", "1", 1)).await.unwrap();
    let b = SkuRepo::create(&pool, &new_sku("Blue", "1", 1)).await.unwrap();

    let mut tx = pool.begin().await.unwrap();
    ProductRepo::set_skus(&mut tx, product.id, &[b.id, a.id]).await.unwrap();
    tx.commit().await.unwrap();
    assert_eq!(
        ProductRepo::sku_ids(&pool, product.id).await.unwrap(),
        vec![b.id, a.id]
    );

    let mut tx = pool.begin().await.unwrap();
    ProductRepo::set_skus(&mut tx, product.id, &[a.id]).await.unwrap();
    tx.commit().await.unwrap();

    let with_skus = ProductRepo::find_by_id_with_skus(&pool, product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(with_skus.sku_ids, vec![a.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rolled_back_transaction_leaves_nothing(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    SkuRepo::create(&mut *tx, &new_sku("Red", "1", 1)).await.unwrap();
    ProductRepo::create(&mut *tx, &new_product("Ghost")).await.unwrap();
    tx.rollback().await.unwrap();

    assert!(SkuRepo::list(&pool).await.unwrap().is_empty());
    assert_eq!(ProductRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn product_list_reports_sku_counts(pool: PgPool) {
    let first = ProductRepo::create(&pool, &new_product("First")).await.unwrap();
    ProductRepo::create(&pool, &new_product("Second")).await.unwrap();
    let sku = SkuRepo::create(&pool, &new_sku("Red", "1", 1)).await.unwrap();

    let mut tx = pool.begin().await.unwrap();
    ProductRepo::set_skus(&mut tx, first.id, &[sku.id]).await.unwrap();
    tx.commit().await.unwrap();

    let page = ProductRepo::list(&pool, 10, 0).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].name, "Second");
    assert_eq!(page[0].count_of_skus, 0);
    assert_eq!(page[1].count_of_skus, 1);

    let second_page = ProductRepo::list(&pool, 1, 1).await.unwrap();
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0].name, "First");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_product_keeps_skus(pool: PgPool) {
    let product = ProductRepo::create(&pool, &new_product("Tee")).await.unwrap();
    let sku = SkuRepo::create(&pool, &new_sku("Red", "1", 1)).await.unwrap();
    let mut tx = pool.begin().await.unwrap();
    ProductRepo::set_skus(&mut tx, product.id, &[sku.id]).await.unwrap();
    tx.commit().await.unwrap();

    assert!(ProductRepo::delete(&pool, product.id).await.unwrap());
    assert!(!ProductRepo::delete(&pool, product.id).await.unwrap());
    assert!(SkuRepo::find_by_id(&pool, sku.id).await.unwrap().is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn product_update_renames(pool: PgPool) {
    let product = ProductRepo::create(&pool, &new_product("Tee")).await.unwrap();
    let updated = ProductRepo::update(
        &pool,
        product.id,
        &UpdateProduct {
            name: Some("Long Tee".into()),
            attributes: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.name, "Long Tee");
    assert_eq!(updated.attributes.0.len(), 1);
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn catalog_tables_are_present_after_migrations(pool: PgPool) {
    assert!(vitrine_db::catalog_tables_present(&pool).await.unwrap());

    sqlx::query("DROP TABLE product_skus")
        .execute(&pool)
        .await
        .unwrap();
    assert!(!vitrine_db::catalog_tables_present(&pool).await.unwrap());
}
