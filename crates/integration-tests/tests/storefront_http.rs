//! Storefront routes driven through the full router.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use truper_catalog_integration_tests::TestContext;

#[tokio::test]
async fn health_returns_ok() {
    let ctx = TestContext::new();
    let resp = ctx.get("/health").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.text(), "ok");
    assert!(resp.header("x-request-id").is_some());
}

#[tokio::test]
async fn product_listing_without_query_shows_everything() {
    let ctx = TestContext::new();
    let body = ctx.get("/products").await.json();

    assert_eq!(body["summary"], "Total de productos: 3");
    assert_eq!(body["count"], 3);
    assert_eq!(body["total"], 3);
    let codes: Vec<_> = body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["code"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(codes, vec!["17549", "15120", "18162"]);
}

#[tokio::test]
async fn product_listing_filters_case_insensitively() {
    let ctx = TestContext::new();
    let body = ctx.get("/products?q=ACERO").await.json();

    assert_eq!(body["summary"], "Mostrando 2 resultados para \"ACERO\"");
    assert_eq!(body["count"], 2);
    assert_eq!(body["total"], 3);
}

#[tokio::test]
async fn product_listing_matches_key_and_code() {
    let ctx = TestContext::new();

    let by_key = ctx.get("/products?q=mar-16").await.json();
    assert_eq!(by_key["products"][0]["code"], "18162");

    let by_code = ctx.get("/products?q=1512").await.json();
    assert_eq!(by_code["count"], 1);
    assert_eq!(by_code["products"][0]["name"], "Rastrillo jardinero");
}

#[tokio::test]
async fn product_detail_includes_gallery_and_specs() {
    let ctx = TestContext::new();
    let resp = ctx.get("/products/18162").await;

    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    assert_eq!(
        body["images"],
        json!(["https://example.com/18162-a.jpg", "https://example.com/18162-b.jpg"])
    );
    assert_eq!(body["technical_specs"], json!({"Peso": "16 oz"}));
    assert_eq!(body["technical_sheet_url"], json!(null));
}

#[tokio::test]
async fn unknown_product_is_not_found() {
    let ctx = TestContext::new();
    let resp = ctx.get("/products/99999").await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.json()["error"], "Not found: product 99999");
}

#[tokio::test]
async fn cart_starts_empty() {
    let ctx = TestContext::new();
    let body = ctx.get("/cart").await.json();

    assert_eq!(body["items"], json!([]));
    assert_eq!(body["total_items"], 0);
    assert_eq!(body["item_label"], "items");
}

#[tokio::test]
async fn adding_twice_merges_into_one_line() {
    let ctx = TestContext::new();

    let first = ctx.post_form("/cart/add", &[("code", "17549")]).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.header("hx-trigger"), Some("cart-updated"));
    assert_eq!(first.json()["item_label"], "item");

    let body = ctx.post_form("/cart/add", &[("code", "17549")]).await.json();
    assert_eq!(body["distinct_products"], 1);
    assert_eq!(body["items"][0]["quantity"], 2);
    assert_eq!(body["items"][0]["unit_label"], "unidades");
    assert_eq!(body["total_items"], 2);
}

#[tokio::test]
async fn adding_unknown_product_is_not_found() {
    let ctx = TestContext::new();
    let resp = ctx.post_form("/cart/add", &[("code", "99999")]).await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(ctx.get("/cart/count").await.json()["count"], 0);
}

#[tokio::test]
async fn blank_code_is_bad_request() {
    let ctx = TestContext::new();
    let resp = ctx.post_form("/cart/add", &[("code", "   ")]).await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cart_line_operations() {
    let ctx = TestContext::new();
    ctx.post_form("/cart/add", &[("code", "17549")]).await;
    ctx.post_form("/cart/add", &[("code", "15120")]).await;

    let body = ctx
        .post_form("/cart/update", &[("code", "15120"), ("quantity", "5")])
        .await
        .json();
    assert_eq!(body["total_items"], 6);

    let body = ctx.post_form("/cart/increment", &[("code", "17549")]).await.json();
    assert_eq!(body["items"][0]["quantity"], 2);

    ctx.post_form("/cart/decrement", &[("code", "17549")]).await;
    let body = ctx.post_form("/cart/decrement", &[("code", "17549")]).await.json();
    assert_eq!(body["items"][0]["quantity"], 1);

    let count = ctx.get("/cart/count").await.json();
    assert_eq!(count, json!({"count": 6, "label": "items"}));
}

#[tokio::test]
async fn update_below_one_removes_the_line() {
    let ctx = TestContext::new();
    ctx.post_form("/cart/add", &[("code", "17549")]).await;
    ctx.post_form("/cart/add", &[("code", "15120")]).await;

    let body = ctx
        .post_form("/cart/update", &[("code", "17549"), ("quantity", "-5")])
        .await
        .json();
    assert_eq!(body["distinct_products"], 1);
    assert_eq!(body["items"][0]["code"], "15120");

    // Absent codes are left alone
    let body = ctx
        .post_form("/cart/update", &[("code", "18162"), ("quantity", "3")])
        .await
        .json();
    assert_eq!(body["distinct_products"], 1);
}

#[tokio::test]
async fn remove_is_idempotent_and_clear_empties() {
    let ctx = TestContext::new();
    ctx.post_form("/cart/add", &[("code", "17549")]).await;
    ctx.post_form("/cart/add", &[("code", "15120")]).await;

    let once = ctx.post_form("/cart/remove", &[("code", "17549")]).await.json();
    let twice = ctx.post_form("/cart/remove", &[("code", "17549")]).await.json();
    assert_eq!(once, twice);

    let body = ctx.post_form("/cart/clear", &[]).await.json();
    assert_eq!(body["items"], json!([]));
}
