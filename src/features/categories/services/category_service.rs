use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryPayloadDto, CategoryResponseDto, CategoryWithCountResponseDto,
};
use crate::features::categories::repositories::CategoryRepository;
use crate::shared::validation::validate_payload;

const NOT_FOUND: &str = "Category not found";
const SLUG_TAKEN: &str = "Slug already exists";

/// Service for category operations
pub struct CategoryService {
    repository: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    /// List all categories with their product counts, newest first
    pub async fn list(&self) -> Result<Vec<CategoryWithCountResponseDto>> {
        let categories = self.repository.find_all().await?;
        Ok(categories.into_iter().map(Into::into).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<CategoryResponseDto> {
        self.repository
            .find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
    }

    /// Create a category; the slug must not be used by any other category
    pub async fn create(&self, dto: CategoryPayloadDto) -> Result<CategoryResponseDto> {
        validate_payload(&dto)?;

        if self.repository.find_by_slug(&dto.slug).await?.is_some() {
            return Err(AppError::Conflict(SLUG_TAKEN.to_string()));
        }

        let category = self.repository.create(&dto.into_input()).await?;

        tracing::info!(
            "Category created: id={}, slug={}",
            category.id,
            category.slug
        );

        Ok(category.into())
    }

    /// Update a category; keeping its own slug is not a conflict
    pub async fn update(&self, id: Uuid, dto: CategoryPayloadDto) -> Result<CategoryResponseDto> {
        validate_payload(&dto)?;

        if self
            .repository
            .find_by_slug_excluding_id(&dto.slug, id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(SLUG_TAKEN.to_string()));
        }

        let category = self
            .repository
            .update(id, &dto.into_input())
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

        tracing::info!("Category updated: id={}", category.id);

        Ok(category.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound(NOT_FOUND.to_string()));
        }

        tracing::info!("Category deleted: id={}", id);
        Ok(())
    }
}
