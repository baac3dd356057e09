//! Integration tests for list membership endpoints.

use axum::http::StatusCode;
use serde_json::json;

use favorites_integration_tests::{Auth, TestApp};

async fn setup(app: &TestApp) -> (Auth, i64) {
    let alice = Auth::bearer(app.create_user("alice@example.com").await);
    let id = app.create_list(&alice, "Wishlist").await;
    (alice, id)
}

#[tokio::test]
async fn test_add_product_is_idempotent() {
    let app = TestApp::new();
    let (alice, id) = setup(&app).await;
    let uri = format!("/api/lists/{id}/products");

    let first = app.post(&uri, &alice, &json!({ "sku": "ABC123" })).await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.body["sku"], "ABC123");
    assert_eq!(first.body["favoriteListId"], id);

    let second = app.post(&uri, &alice, &json!({ "sku": "ABC123" })).await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["id"], first.body["id"]);

    assert_eq!(app.store.list_product_count().await, 1);
}

#[tokio::test]
async fn test_show_includes_resolved_products_in_insertion_order() {
    let app = TestApp::new();
    let (alice, id) = setup(&app).await;
    let uri = format!("/api/lists/{id}/products");
    app.post(&uri, &alice, &json!({ "sku": "XYZ789" })).await;
    app.post(&uri, &alice, &json!({ "sku": "ABC123" })).await;

    let resp = app.get(&format!("/api/lists/{id}"), &alice).await;

    assert_eq!(resp.status, StatusCode::OK);
    let products = resp.body["products"].as_array().expect("products array");
    let skus: Vec<_> = products.iter().map(|p| p["sku"].clone()).collect();
    assert_eq!(skus, vec![json!("XYZ789"), json!("ABC123")]);

    let product = products.first().expect("one product");
    assert_eq!(product["description"], "Mock product description for SKU XYZ789");
    assert!(product["name"].as_str().is_some_and(|n| n.ends_with(" XYZ")));
    assert!(product["price"].is_string());
    assert!(product["category"].is_string());
    assert!(product["inStock"].is_boolean());
}

#[tokio::test]
async fn test_product_resolution_is_stable() {
    let app = TestApp::new();
    let (alice, id) = setup(&app).await;
    app.post(&format!("/api/lists/{id}/products"), &alice, &json!({ "sku": "ABC123" }))
        .await;

    let first = app.get(&format!("/api/lists/{id}"), &alice).await;
    let second = app.get(&format!("/api/lists/{id}"), &alice).await;

    assert_eq!(first.body["products"], second.body["products"]);
}

#[tokio::test]
async fn test_remove_product() {
    let app = TestApp::new();
    let (alice, id) = setup(&app).await;
    app.post(&format!("/api/lists/{id}/products"), &alice, &json!({ "sku": "ABC123" }))
        .await;
    let uri = format!("/api/lists/{id}/products/ABC123");

    let first = app.delete(&uri, &alice).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body, json!({ "message": "Product removed from list" }));

    let second = app.delete(&uri, &alice).await;
    assert_eq!(second.status, StatusCode::NOT_FOUND);
    assert_eq!(second.body["error"], "NOT_FOUND");

    let shown = app.get(&format!("/api/lists/{id}"), &alice).await;
    assert_eq!(shown.body["products"], json!([]));
}

#[tokio::test]
async fn test_remove_from_foreign_list_is_not_found() {
    let app = TestApp::new();
    let (alice, id) = setup(&app).await;
    let bob = Auth::bearer(app.create_user("bob@example.com").await);
    app.post(&format!("/api/lists/{id}/products"), &alice, &json!({ "sku": "ABC123" }))
        .await;

    let resp = app
        .delete(&format!("/api/lists/{id}/products/ABC123"), &bob)
        .await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(app.store.list_product_count().await, 1);
}

#[tokio::test]
async fn test_add_to_deleted_list_is_not_found() {
    let app = TestApp::new();
    let (alice, id) = setup(&app).await;
    app.delete(&format!("/api/lists/{id}"), &alice).await;

    let resp = app
        .post(&format!("/api/lists/{id}/products"), &alice, &json!({ "sku": "ABC123" }))
        .await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(app.store.list_product_count().await, 0);
}

#[tokio::test]
async fn test_add_requires_sku() {
    let app = TestApp::new();
    let (alice, id) = setup(&app).await;
    let uri = format!("/api/lists/{id}/products");

    let missing = app.post(&uri, &alice, &json!({})).await;
    assert_eq!(missing.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(missing.body["errors"]["sku"][0], "The sku field is required.");

    let too_long = app.post(&uri, &alice, &json!({ "sku": "S".repeat(256) })).await;
    assert_eq!(too_long.status, StatusCode::UNPROCESSABLE_ENTITY);

    assert_eq!(app.store.list_product_count().await, 0);
}

#[tokio::test]
async fn test_same_sku_on_different_lists() {
    let app = TestApp::new();
    let (alice, first) = setup(&app).await;
    let second = app.create_list(&alice, "Other").await;

    for id in [first, second] {
        let resp = app
            .post(&format!("/api/lists/{id}/products"), &alice, &json!({ "sku": "ABC123" }))
            .await;
        assert_eq!(resp.status, StatusCode::CREATED);
    }

    assert_eq!(app.store.list_product_count().await, 2);
}
