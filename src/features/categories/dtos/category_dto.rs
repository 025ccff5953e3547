use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidateUrl, ValidationError};

use crate::features::categories::models::{Category, CategoryInput, CategoryWithProductCount};
use crate::shared::validation::{
    blank_to_none, rule_violation, validate_column_length, SLUG_REGEX,
};

/// Request DTO for creating or updating a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayloadDto {
    #[validate(
        length(min = 2, message = "Name must be at least 2 characters"),
        custom(function = "validate_column_length")
    )]
    #[serde(default)]
    pub name: String,

    #[validate(
        length(min = 2, message = "Slug must be at least 2 characters"),
        custom(function = "validate_column_length"),
        regex(path = *SLUG_REGEX, message = "Slug may only contain URL-safe characters")
    )]
    #[serde(default)]
    pub slug: String,

    /// Image URL; an empty string clears it, omitting it keeps the stored one
    #[validate(custom(function = "validate_image_url"))]
    pub image: Option<String>,
}

fn validate_image_url(image: &str) -> Result<(), ValidationError> {
    if image.is_empty() || image.to_owned().validate_url() {
        Ok(())
    } else {
        Err(rule_violation("url", "Must be a valid URL"))
    }
}

impl CategoryPayloadDto {
    pub fn into_input(self) -> CategoryInput {
        CategoryInput {
            name: self.name,
            slug: self.slug,
            image: self.image.map(|image| blank_to_none(Some(image))),
        }
    }
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            image: c.image,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Category list entry including how many products it holds
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithCountResponseDto {
    #[serde(flatten)]
    pub category: CategoryResponseDto,
    pub product_count: i64,
}

impl From<CategoryWithProductCount> for CategoryWithCountResponseDto {
    fn from(c: CategoryWithProductCount) -> Self {
        Self {
            category: c.category.into(),
            product_count: c.product_count,
        }
    }
}
