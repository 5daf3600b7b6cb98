//! Sign-up, sign-in, sign-out and review submission over HTTP.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use nepfit_integration_tests::{TestContext, money};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde_json::{Value, json};

#[tokio::test]
async fn test_sign_up_sign_out_sign_in() {
    let ctx = TestContext::start().await.unwrap();

    let state = ctx.sign_up("runner@nepfit.test").await.unwrap();
    assert_eq!(state["signed_in"], true);
    assert_eq!(state["user"]["email"], "runner@nepfit.test");

    ctx.add_to_cart("mat", 1).await.unwrap();

    let state: Value = ctx
        .client
        .post(ctx.url("/auth/logout"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(state["signed_in"], false);

    // Signing out keeps the cart.
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

    let response = ctx
        .client
        .post(ctx.url("/auth/login"))
        .json(&json!({ "email": "runner@nepfit.test", "password": "wrong-pass" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let state: Value = ctx
        .client
        .post(ctx.url("/auth/login"))
        .json(&json!({ "email": "runner@nepfit.test", "password": "hunter22" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(state["signed_in"], true);

    let state: Value = ctx
        .client
        .get(ctx.url("/auth/state"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(state["signed_in"], true);
}

#[tokio::test]
async fn test_duplicate_sign_up_conflicts() {
    let ctx = TestContext::start().await.unwrap();
    ctx.sign_up("twice@nepfit.test").await.unwrap();

    let other = ctx.other_shopper().unwrap();
    let response = other
        .post(ctx.url("/auth/signup"))
        .json(&json!({
            "email": "twice@nepfit.test",
            "password": "hunter22",
            "name": "Second",
            "age": "41",
            "phone": "5550101",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_invalid_sign_up_rejected() {
    let ctx = TestContext::start().await.unwrap();
    let response = ctx
        .client
        .post(ctx.url("/auth/signup"))
        .json(&json!({
            "email": "not-an-email",
            "password": "hunter22",
            "name": "Bad",
            "age": "30",
            "phone": "5550100",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_review_submit_and_list() {
    let ctx = TestContext::start().await.unwrap();

    let response = ctx
        .client
        .post(ctx.url("/products/mat/reviews"))
        .json(&json!({ "body": "Great grip", "rating": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    ctx.sign_up("reviewer@nepfit.test").await.unwrap();

    let response = ctx
        .client
        .post(ctx.url("/products/mat/reviews"))
        .json(&json!({ "body": "Great grip", "rating": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = ctx
        .client
        .post(ctx.url("/products/mat/reviews"))
        .json(&json!({ "body": "Too many stars", "rating": 9 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    ctx.client
        .post(ctx.url("/products/mat/reviews"))
        .json(&json!({
            "body": "Still good",
            "rating": 3,
            "image": {
                "file_name": "mat.png",
                "content_type": "image/png",
                "data": "iVBORw0KGgo=",
            },
        }))
        .send()
        .await
        .unwrap()
        .error_for_status()
        .unwrap();

    let reviews: Value = ctx
        .client
        .get(ctx.url("/products/mat/reviews"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let reviews = reviews.as_array().unwrap();
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0]["body"], "Still good");

    let image_url = reviews[0]["image_url"].as_str().unwrap();
    let image = ctx.client.get(image_url).send().await.unwrap();
    assert_eq!(image.status(), StatusCode::OK);
    assert_eq!(image.headers()["content-type"], "image/png");
    assert_eq!(image.headers()["x-content-type-options"], "nosniff");

    let product: Value = ctx
        .client
        .get(ctx.url("/products/mat"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(product["reviews"]["count"], 2);
    assert_eq!(money(&product["average_rating"]), Some(Decimal::from(4)));
}

#[tokio::test]
async fn test_review_for_unknown_product_is_not_found() {
    let ctx = TestContext::start().await.unwrap();
    ctx.sign_up("ghost@nepfit.test").await.unwrap();

    let response = ctx
        .client
        .post(ctx.url("/products/ghost/reviews"))
        .json(&json!({ "body": "Where is it", "rating": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Read SSE chunks until the accumulated text contains `needle`.
async fn read_until(response: &mut reqwest::Response, buffer: &mut String, needle: &str) {
    let wait = async {
        while !buffer.contains(needle) {
            let chunk = response.chunk().await.unwrap().unwrap();
            buffer.push_str(&String::from_utf8_lossy(&chunk));
        }
    };
    tokio::time::timeout(std::time::Duration::from_secs(5), wait)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_live_reviews_stream_snapshots() {
    let ctx = TestContext::start().await.unwrap();
    let watcher = ctx.other_shopper().unwrap();

    let mut live = watcher
        .get(ctx.url("/products/block/reviews/live"))
        .send()
        .await
        .unwrap();
    assert_eq!(live.status(), StatusCode::OK);

    let mut buffer = String::new();
    read_until(&mut live, &mut buffer, "data: []").await;
    assert!(buffer.contains("event: reviews"));

    ctx.sign_up("live@nepfit.test").await.unwrap();
    ctx.client
        .post(ctx.url("/products/block/reviews"))
        .json(&json!({ "body": "Solid block", "rating": 4 }))
        .send()
        .await
        .unwrap()
        .error_for_status()
        .unwrap();

    read_until(&mut live, &mut buffer, "Solid block").await;
}

#[tokio::test]
async fn test_svg_review_image_rejected() {
    let ctx = TestContext::start().await.unwrap();
    ctx.sign_up("svg@nepfit.test").await.unwrap();

    let response = ctx
        .client
        .post(ctx.url("/products/mat/reviews"))
        .json(&json!({
            "body": "Look at this",
            "rating": 5,
            "image": {
                "file_name": "x.svg",
                "content_type": "image/svg+xml",
                "data": "PHN2Zy8+",
            },
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let reviews: Value = ctx
        .client
        .get(ctx.url("/products/mat/reviews"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(reviews.as_array().unwrap().is_empty());
}
