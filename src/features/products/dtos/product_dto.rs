use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::products::models::{Product, ProductInput, ProductWithCategory};
use crate::shared::coerce::{lenient_decimal, lenient_i32};
use crate::shared::constants::{MAX_PRODUCT_PRICE, MIN_PRODUCT_PRICE};
use crate::shared::validation::{
    blank_to_none, rule_violation, validate_column_length, SLUG_REGEX,
};

/// Request DTO for creating or updating a product.
///
/// `price` and `stock` accept numbers or numeric strings, as posted by the
/// admin form. Values that cannot be coerced are reported per field.
/// Omitting `description` or `images` keeps the stored value on update,
/// while an empty string clears it.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayloadDto {
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

    pub description: Option<String>,

    #[validate(
        required(message = "Price must be a number"),
        custom(function = "validate_price")
    )]
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schema(value_type = String, example = "19.99")]
    pub price: Option<Decimal>,

    #[validate(
        required(message = "Stock must be a whole number"),
        range(min = 0, message = "Stock cannot be negative")
    )]
    #[serde(default, deserialize_with = "lenient_i32")]
    #[schema(value_type = i32, example = 10)]
    pub stock: Option<i32>,

    #[validate(
        length(min = 1, message = "Category is required"),
        custom(function = "validate_category_id")
    )]
    #[serde(default)]
    pub category_id: String,

    /// Single image URL
    pub images: Option<String>,
}

fn validate_price(price: &Decimal) -> std::result::Result<(), ValidationError> {
    if *price < MIN_PRODUCT_PRICE {
        return Err(rule_violation("price", "Price must be greater than 0"));
    }
    if *price > MAX_PRODUCT_PRICE {
        return Err(rule_violation("price", "Price cannot exceed 9999999999.99"));
    }
    if price.normalize().scale() > 2 {
        return Err(rule_violation(
            "price",
            "Price can have at most 2 decimal places",
        ));
    }
    Ok(())
}

fn validate_category_id(category_id: &str) -> std::result::Result<(), ValidationError> {
    // Emptiness is reported by the length rule
    if category_id.is_empty() || Uuid::parse_str(category_id).is_ok() {
        Ok(())
    } else {
        Err(rule_violation("uuid", "Invalid category id"))
    }
}

impl ProductPayloadDto {
    /// Convert a validated payload into storage input
    pub fn into_input(self) -> Result<ProductInput> {
        let (Some(price), Some(stock), Ok(category_id)) = (
            self.price,
            self.stock,
            Uuid::parse_str(&self.category_id),
        ) else {
            return Err(AppError::Internal(
                "Product payload was not validated".to_string(),
            ));
        };

        Ok(ProductInput {
            name: self.name,
            slug: self.slug,
            description: self.description.map(|text| blank_to_none(Some(text))),
            price,
            stock,
            category_id,
            images: self.images.map(|url| blank_to_none(Some(url))),
        })
    }
}

/// Query parameters for listing products
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductQueryParams {
    /// Only products of this category; empty means all
    pub category_id: Option<String>,
}

/// Response DTO for product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponseDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "19.99")]
    pub price: Decimal,
    pub stock: i32,
    pub category_id: Uuid,
    pub images: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryResponseDto>,
}

impl From<Product> for ProductResponseDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            slug: p.slug,
            description: p.description,
            price: p.price,
            stock: p.stock,
            category_id: p.category_id,
            images: p.images,
            created_at: p.created_at,
            updated_at: p.updated_at,
            category: None,
        }
    }
}

impl From<ProductWithCategory> for ProductResponseDto {
    fn from(p: ProductWithCategory) -> Self {
        Self {
            category: p.category.map(Into::into),
            ..p.product.into()
        }
    }
}
