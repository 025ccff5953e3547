use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::products::dtos::{ProductPayloadDto, ProductResponseDto};
use crate::features::products::models::Product;
use crate::features::products::repositories::ProductRepository;
use crate::shared::validation::validate_payload;

const NOT_FOUND: &str = "Product not found";
const SLUG_TAKEN: &str = "Slug already exists";

/// Service for product operations
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    /// List products newest first.
    ///
    /// A blank filter lists everything; a filter that is not a category id
    /// matches nothing.
    pub async fn list(&self, category_id: Option<&str>) -> Result<Vec<ProductResponseDto>> {
        let filter = match category_id.map(str::trim).filter(|s| !s.is_empty()) {
            None => None,
            Some(raw) => match Uuid::parse_str(raw) {
                Ok(id) => Some(id),
                Err(_) => return Ok(Vec::new()),
            },
        };

        let products = self.repository.find_all(filter).await?;
        Ok(products.into_iter().map(Into::into).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ProductResponseDto> {
        self.repository
            .find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
    }

    /// Create a product; the slug must not be used by any other product
    pub async fn create(&self, dto: ProductPayloadDto) -> Result<ProductResponseDto> {
        validate_payload(&dto)?;

        if self.repository.find_by_slug(&dto.slug).await?.is_some() {
            return Err(AppError::Conflict(SLUG_TAKEN.to_string()));
        }

        let product = self.repository.create(&dto.into_input()?).await?;

        tracing::info!(
            "Product created: id={}, slug={}, category_id={}",
            product.id,
            product.slug,
            product.category_id
        );

        self.with_category(product).await
    }

    /// Update a product; keeping its own slug is not a conflict
    pub async fn update(&self, id: Uuid, dto: ProductPayloadDto) -> Result<ProductResponseDto> {
        validate_payload(&dto)?;

        if self
            .repository
            .find_by_slug_excluding_id(&dto.slug, id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(SLUG_TAKEN.to_string()));
        }

        let product = self
            .repository
            .update(id, &dto.into_input()?)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

        tracing::info!("Product updated: id={}", product.id);

        self.with_category(product).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound(NOT_FOUND.to_string()));
        }

        tracing::info!("Product deleted: id={}", id);
        Ok(())
    }

    /// Re-read a written product so the response carries its category
    async fn with_category(&self, product: Product) -> Result<ProductResponseDto> {
        Ok(match self.repository.find_by_id(product.id).await? {
            Some(found) => found.into(),
            None => product.into(),
        })
    }
}
