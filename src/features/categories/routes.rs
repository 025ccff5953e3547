use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Create routes for the categories feature
///
/// Note: This feature is public (no authentication required)
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route(
            "/api/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/api/categories/{id}",
            get(handlers::get_category)
                .patch(handlers::update_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
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

    fn server(catalog: &InMemoryCatalog) -> TestServer {
        let service = Arc::new(CategoryService::new(Arc::new(catalog.clone())));
        TestServer::new(routes(service)).unwrap()
    }

    #[tokio::test]
    async fn test_create_twice_conflicts() {
        let catalog = InMemoryCatalog::new();
        let server = server(&catalog);
        let body = json!({ "name": "Beauty", "slug": "beauty" });

        let first = server.post("/api/categories").json(&body).await;
        first.assert_status(StatusCode::CREATED);
        let created: Value = first.json();
        assert_eq!(created["success"], true);
        assert_eq!(created["data"]["slug"], "beauty");

        let second = server.post("/api/categories").json(&body).await;
        second.assert_status(StatusCode::CONFLICT);
        assert_eq!(
            second.json::<Value>(),
            json!({ "success": false, "error": "Slug already exists" })
        );
        assert_eq!(catalog.category_count(), 1);
    }

    #[tokio::test]
    async fn test_validation_errors_are_reported_per_field() {
        let server = server(&InMemoryCatalog::new());

        let response = server
            .post("/api/categories")
            .json(&json!({ "name": "B", "slug": "beauty", "image": "nope" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(
            body["errors"],
            json!([
                { "field": "image", "message": "Must be a valid URL" },
                { "field": "name", "message": "Name must be at least 2 characters" }
            ])
        );
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let server = server(&InMemoryCatalog::new());

        let response = server
            .post("/api/categories")
            .text("{\"name\": ")
            .content_type("application/json")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["success"], false);
    }

    #[tokio::test]
    async fn test_list_includes_product_count() {
        let catalog = InMemoryCatalog::new();
        let server = server(&catalog);
        let created: Value = server
            .post("/api/categories")
            .json(&json!({ "name": "Home", "slug": "home", "image": "" }))
            .await
            .json();
        let id = created["data"]["id"].as_str().unwrap().parse().unwrap();
        catalog.insert_product_in(id);

        let response = server.get("/api/categories").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"][0]["productCount"], 1);
        assert_eq!(body["data"][0]["image"], Value::Null);
        assert_eq!(body["meta"]["total"], 1);
    }

    #[tokio::test]
    async fn test_get_update_delete_round() {
        let server = server(&InMemoryCatalog::new());
        let created: Value = server
            .post("/api/categories")
            .json(&json!({ "name": "Fashion", "slug": "fashion" }))
            .await
            .json();
        let path = format!("/api/categories/{}", created["data"]["id"].as_str().unwrap());

        server.get(&path).await.assert_status_ok();

        let updated = server
            .patch(&path)
            .json(&json!({ "name": "Fashion", "slug": "fashion", "image": "https://cdn.test/f.jpg" }))
            .await;
        updated.assert_status_ok();
        assert_eq!(updated.json::<Value>()["data"]["image"], "https://cdn.test/f.jpg");

        let deleted = server.delete(&path).await;
        deleted.assert_status_ok();
        assert_eq!(deleted.json::<Value>(), json!({ "success": true, "data": null }));

        server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
        server.delete(&path).await.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_patch_keeps_omitted_image_and_clears_blank_one() {
        let server = server(&InMemoryCatalog::new());
        let created: Value = server
            .post("/api/categories")
            .json(&json!({ "name": "Beauty", "slug": "beauty", "image": "https://cdn.test/b.jpg" }))
            .await
            .json();
        let path = format!("/api/categories/{}", created["data"]["id"].as_str().unwrap());

        let renamed = server
            .patch(&path)
            .json(&json!({ "name": "Beauty & Care", "slug": "beauty" }))
            .await;
        renamed.assert_status_ok();
        let renamed: Value = renamed.json();
        assert_eq!(renamed["data"]["name"], "Beauty & Care");
        assert_eq!(renamed["data"]["image"], "https://cdn.test/b.jpg");

        let cleared: Value = server
            .patch(&path)
            .json(&json!({ "name": "Beauty & Care", "slug": "beauty", "image": "" }))
            .await
            .json();
        assert_eq!(cleared["data"]["image"], Value::Null);
    }

    #[tokio::test]
    async fn test_unknown_and_malformed_ids_are_not_found() {
        let server = server(&InMemoryCatalog::new());

        let response = server.get("/api/categories/does-not-exist").await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(
            response.json::<Value>(),
            json!({ "success": false, "error": "Category not found" })
        );
    }
}
