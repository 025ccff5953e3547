use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::products::handlers;
use crate::features::products::services::ProductService;

/// Create routes for the products feature
///
/// Note: This feature is public (no authentication required)
pub fn routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route(
            "/api/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/api/products/{id}",
            get(handlers::get_product)
                .patch(handlers::update_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::InMemoryCatalog;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use uuid::Uuid;

    fn server(catalog: &InMemoryCatalog) -> TestServer {
        let service = Arc::new(ProductService::new(Arc::new(catalog.clone())));
        TestServer::new(routes(service)).unwrap()
    }

    fn body(slug: &str, category_id: Uuid) -> Value {
        json!({
            "name": "Smart Watch",
            "slug": slug,
            "description": "Tracks steps",
            "price": "199.99",
            "stock": 8,
            "categoryId": category_id,
            "images": "https://cdn.test/watch.jpg"
        })
    }

    #[tokio::test]
    async fn test_create_then_get_includes_category() {
        let catalog = InMemoryCatalog::new();
        let category = catalog.insert_category("electronics");
        let server = server(&catalog);

        let created = server
            .post("/api/products")
            .json(&body("smart-watch", category.id))
            .await;
        created.assert_status(StatusCode::CREATED);
        let created: Value = created.json();
        assert_eq!(created["data"]["price"], "199.99");

        let path = format!("/api/products/{}", created["data"]["id"].as_str().unwrap());
        let fetched = server.get(&path).await;

        fetched.assert_status_ok();
        let fetched: Value = fetched.json();
        assert_eq!(fetched["success"], true);
        assert_eq!(fetched["data"]["slug"], "smart-watch");
        assert_eq!(fetched["data"]["category"]["slug"], "electronics");
    }

    #[tokio::test]
    async fn test_missing_product_is_not_found() {
        let server = server(&InMemoryCatalog::new());

        let response = server
            .get(&format!("/api/products/{}", Uuid::new_v4()))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(
            response.json::<Value>(),
            json!({ "success": false, "error": "Product not found" })
        );

        server
            .delete(&format!("/api/products/{}", Uuid::new_v4()))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_validation_errors_are_reported_per_field() {
        let server = server(&InMemoryCatalog::new());

        let response = server
            .post("/api/products")
            .json(&json!({
                "name": "W",
                "slug": "watch",
                "price": "free",
                "stock": -1,
                "categoryId": ""
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(
            body["errors"],
            json!([
                { "field": "categoryId", "message": "Category is required" },
                { "field": "name", "message": "Name must be at least 2 characters" },
                { "field": "price", "message": "Price must be a number" },
                { "field": "stock", "message": "Stock cannot be negative" }
            ])
        );
    }

    #[tokio::test]
    async fn test_duplicate_slug_conflicts() {
        let catalog = InMemoryCatalog::new();
        let category = catalog.insert_category("electronics");
        let server = server(&catalog);

        server
            .post("/api/products")
            .json(&body("smart-watch", category.id))
            .await
            .assert_status(StatusCode::CREATED);
        let response = server
            .post("/api/products")
            .json(&body("smart-watch", category.id))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        assert_eq!(response.json::<Value>()["error"], "Slug already exists");
        assert_eq!(catalog.product_count(), 1);
    }

    #[tokio::test]
    async fn test_list_with_category_filter() {
        let catalog = InMemoryCatalog::new();
        let electronics = catalog.insert_category("electronics");
        let fashion = catalog.insert_category("fashion");
        let server = server(&catalog);
        for (slug, category) in [("watch", electronics.id), ("scarf", fashion.id)] {
            server
                .post("/api/products")
                .json(&body(slug, category))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let all: Value = server.get("/api/products").await.json();
        assert_eq!(all["meta"]["total"], 2);

        let filtered: Value = server
            .get("/api/products")
            .add_query_param("categoryId", fashion.id)
            .await
            .json();
        assert_eq!(filtered["meta"]["total"], 1);
        assert_eq!(filtered["data"][0]["slug"], "scarf");
    }

    #[tokio::test]
    async fn test_put_updates_like_patch_and_delete_returns_null_data() {
        let catalog = InMemoryCatalog::new();
        let category = catalog.insert_category("electronics");
        let server = server(&catalog);
        let created: Value = server
            .post("/api/products")
            .json(&body("smart-watch", category.id))
            .await
            .json();
        let path = format!("/api/products/{}", created["data"]["id"].as_str().unwrap());

        let mut update = body("smart-watch", category.id);
        update["price"] = json!(149.5);
        let updated = server.put(&path).json(&update).await;
        updated.assert_status_ok();
        assert_eq!(updated.json::<Value>()["data"]["price"], "149.50");

        let deleted = server.delete(&path).await;
        deleted.assert_status_ok();
        assert_eq!(deleted.json::<Value>(), json!({ "success": true, "data": null }));
        assert_eq!(catalog.product_count(), 0);
    }

    #[tokio::test]
    async fn test_patch_keeps_omitted_text_and_clears_blank_text() {
        let catalog = InMemoryCatalog::new();
        let category = catalog.insert_category("electronics");
        let server = server(&catalog);
        let created: Value = server
            .post("/api/products")
            .json(&body("smart-watch", category.id))
            .await
            .json();
        let path = format!("/api/products/{}", created["data"]["id"].as_str().unwrap());

        let mut restock = body("smart-watch", category.id);
        restock.as_object_mut().unwrap().remove("description");
        restock.as_object_mut().unwrap().remove("images");
        restock["stock"] = json!(12);
        let restocked = server.patch(&path).json(&restock).await;
        restocked.assert_status_ok();
        let restocked: Value = restocked.json();
        assert_eq!(restocked["data"]["stock"], 12);
        assert_eq!(restocked["data"]["description"], "Tracks steps");
        assert_eq!(restocked["data"]["images"], "https://cdn.test/watch.jpg");

        restock["description"] = json!("");
        let cleared: Value = server.patch(&path).json(&restock).await.json();
        assert_eq!(cleared["data"]["description"], Value::Null);
        assert_eq!(cleared["data"]["images"], "https://cdn.test/watch.jpg");
    }
}
