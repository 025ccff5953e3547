use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::categories::dtos::{
    CategoryPayloadDto, CategoryResponseDto, CategoryWithCountResponseDto,
};
use crate::features::categories::services::CategoryService;
use crate::shared::types::{ApiResponse, Meta};
use crate::shared::validation::parse_entity_id;

const ENTITY: &str = "Category";

/// List all categories with product counts, newest first
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryWithCountResponseDto>>),
        (status = 500, description = "Storage unavailable")
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<CategoryWithCountResponseDto>>>> {
    let categories = service.list().await?;
    let total = categories.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(categories),
        Some(Meta { total }),
    )))
}

/// Get category by id
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(
        ("id" = String, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let id = parse_entity_id(&id, ENTITY)?;
    let category = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(category), None)))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CategoryPayloadDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Slug already exists")
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CategoryPayloadDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    let category = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(category), None)),
    ))
}

/// Update a category
#[utoipa::path(
    patch,
    path = "/api/categories/{id}",
    params(
        ("id" = String, Path, description = "Category ID")
    ),
    request_body = CategoryPayloadDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Slug already exists")
    ),
    tag = "categories"
)]
pub async fn update_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<CategoryPayloadDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let id = parse_entity_id(&id, ENTITY)?;
    let category = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(category), None)))
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = String, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category still has products")
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    let id = parse_entity_id(&id, ENTITY)?;
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(Some(()), None)))
}
