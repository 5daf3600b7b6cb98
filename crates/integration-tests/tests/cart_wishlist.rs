//! Cart and wishlist state kept in the shopper's session.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use nepfit_integration_tests::{TestContext, money};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde_json::{Value, json};

#[tokio::test]
async fn test_adding_same_product_merges_lines() {
    let ctx = TestContext::start().await.unwrap();

    ctx.add_to_cart("mat", 1).await.unwrap();
    ctx.add_to_cart("block", 2).await.unwrap();
    let cart = ctx.add_to_cart("mat", 2).await.unwrap();

    let lines = cart["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["product_id"], "mat");
    assert_eq!(lines[0]["quantity"], 3);
    assert_eq!(cart["item_count"], 5);
    assert_eq!(money(&cart["subtotal"]), Some(Decimal::from(100)));
}

#[tokio::test]
async fn test_cart_survives_between_requests_and_is_per_shopper() {
    let ctx = TestContext::start().await.unwrap();
    ctx.add_to_cart("kb16", 1).await.unwrap();

    let cart: Value = ctx
        .client
        .get(ctx.url("/cart"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cart["item_count"], 1);

    let other = ctx.other_shopper().unwrap();
    let theirs: Value = other
        .get(ctx.url("/cart"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(theirs["item_count"], 0);
    assert!(theirs["lines"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_update_and_remove_lines() {
    let ctx = TestContext::start().await.unwrap();
    ctx.add_to_cart("mat", 1).await.unwrap();

    let cart: Value = ctx
        .client
        .post(ctx.url("/cart/update"))
        .json(&json!({ "product_id": "mat", "quantity": 4 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cart["lines"][0]["quantity"], 4);

    let cart: Value = ctx
        .client
        .post(ctx.url("/cart/remove"))
        .json(&json!({ "product_id": "mat" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(cart["lines"].as_array().unwrap().is_empty());

    let response = ctx
        .client
        .post(ctx.url("/cart/remove"))
        .json(&json!({ "product_id": "mat" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_adding_unknown_product_is_not_found() {
    let ctx = TestContext::start().await.unwrap();
    let response = ctx
        .client
        .post(ctx.url("/cart/add"))
        .json(&json!({ "product_id": "ghost" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wishlist_duplicate_add_is_noop() {
    let ctx = TestContext::start().await.unwrap();

    let first: Value = ctx
        .client
        .post(ctx.url("/wishlist/add"))
        .json(&json!({ "product_id": "bands" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(first["changed"], true);

    let second: Value = ctx
        .client
        .post(ctx.url("/wishlist/add"))
        .json(&json!({ "product_id": "bands" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(second["changed"], false);
    assert_eq!(second["entries"].as_array().unwrap().len(), 1);

    let removed: Value = ctx
        .client
        .post(ctx.url("/wishlist/remove"))
        .json(&json!({ "product_id": "bands" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(removed["changed"], true);

    let saved: Value = ctx
        .client
        .get(ctx.url("/wishlist"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(saved.as_array().unwrap().is_empty());
}
