//! HTTP-level integration tests for the attribute catalog and SKU endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Attributes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_attribute_returns_201(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/attributes",
        json!({"name": "  Color ", "values": ["Red", "Blue"]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Color");
    assert_eq!(json["data"]["values"], json!(["Red", "Blue"]));
    assert!(json["data"]["id"].is_number());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_attribute_name_returns_409(pool: PgPool) {
    let body = json!({"name": "Size", "values": ["S"]});
    post_json(common::build_test_app(pool.clone()), "/api/v1/attributes", body.clone()).await;

    let response = post_json(common::build_test_app(pool), "/api/v1/attributes", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_attribute_is_rejected(pool: PgPool) {
    let cases = [
        json!({"name": "C", "values": ["Red"]}),
        json!({"name": "Color", "values": []}),
        json!({"name": "Color", "values": ["Red!"]}),
        json!({"name": "Col@r", "values": ["Red"]}),
    ];
    for body in cases {
        let response =
            post_json(common::build_test_app(pool.clone()), "/api/v1/attributes", body.clone())
                .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn attribute_update_get_and_delete(pool: PgPool) {
    let created = body_json(
        post_json(
            common::build_test_app(pool.clone()),
            "/api/v1/attributes",
            json!({"name": "Material", "values": ["Cotton"]}),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/attributes/{id}");

    let response = put_json(
        common::build_test_app(pool.clone()),
        &uri,
        json!({"values": ["Cotton", "Wool"]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Material");
    assert_eq!(json["data"]["values"], json!(["Cotton", "Wool"]));

    let response = delete(common::build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(common::build_test_app(pool), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_attributes_is_sorted_by_name(pool: PgPool) {
    for name in ["Size", "Color"] {
        post_json(
            common::build_test_app(pool.clone()),
            "/api/v1/attributes",
            json!({"name": name, "values": ["A"]}),
        )
        .await;
    }

    let json = body_json(get(common::build_test_app(pool), "/api/v1/attributes").await).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Color", "Size"]);
}

// ---------------------------------------------------------------------------
// SKUs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn sku_crud_round_trip(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/skus",
        json!({"model": "Red / S", "price": "9.99", "numberInStock": 4}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["data"]["id"].as_i64().unwrap();
    assert_eq!(created["data"]["numberInStock"], 4);

    let uri = format!("/api/v1/skus/{id}");
    let response = put_json(
        common::build_test_app(pool.clone()),
        &uri,
        json!({"price": "12"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["price"], "12");
    assert_eq!(json["data"]["model"], "Red / S");

    let response = delete(common::build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete(common::build_test_app(pool), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sku_with_bad_price_or_stock_is_rejected(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/skus",
        json!({"model": "Red", "price": "ten", "numberInStock": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/skus",
        json!({"model": "Red", "price": "10", "numberInStock": -1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
