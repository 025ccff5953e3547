use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::products::dtos::{ProductPayloadDto, ProductQueryParams, ProductResponseDto};
use crate::features::products::services::ProductService;
use crate::shared::types::{ApiResponse, Meta};
use crate::shared::validation::parse_entity_id;

const ENTITY: &str = "Product";

/// List products with their categories, newest first
#[utoipa::path(
    get,
    path = "/api/products",
    params(ProductQueryParams),
    responses(
        (status = 200, description = "List of products", body = ApiResponse<Vec<ProductResponseDto>>),
        (status = 500, description = "Storage unavailable")
    ),
    tag = "products"
)]
pub async fn list_products(
    State(service): State<Arc<ProductService>>,
    Query(params): Query<ProductQueryParams>,
) -> Result<Json<ApiResponse<Vec<ProductResponseDto>>>> {
    let products = service.list(params.category_id.as_deref()).await?;
    let total = products.len() as i64;
    Ok(Json(ApiResponse::success(Some(products), Some(Meta { total }))))
}

/// Get product by id, including its category
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<ProductResponseDto>),
        (status = 404, description = "Product not found")
    ),
    tag = "products"
)]
pub async fn get_product(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    let id = parse_entity_id(&id, ENTITY)?;
    let product = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(product), None)))
}

/// Create a product
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = ProductPayloadDto,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductResponseDto>),
        (status = 400, description = "Validation error or unknown category"),
        (status = 409, description = "Slug already exists")
    ),
    tag = "products"
)]
pub async fn create_product(
    State(service): State<Arc<ProductService>>,
    AppJson(dto): AppJson<ProductPayloadDto>,
) -> Result<(StatusCode, Json<ApiResponse<ProductResponseDto>>)> {
    let product = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(product), None)),
    ))
}

/// Update a product
#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = ProductPayloadDto,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponseDto>),
        (status = 400, description = "Validation error or unknown category"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Slug already exists")
    ),
    tag = "products"
)]
pub async fn update_product(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<ProductPayloadDto>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    let id = parse_entity_id(&id, ENTITY)?;
    let product = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(product), None)))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 404, description = "Product not found")
    ),
    tag = "products"
)]
pub async fn delete_product(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    let id = parse_entity_id(&id, ENTITY)?;
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(Some(()), None)))
}
