use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::products::dtos::ProductResponseDto;

/// Category reference embedded in a cart line for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCategory {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
}

/// Product fields copied into the cart at add time.
///
/// The snapshot is never re-synced with the catalog: a later price change does
/// not alter lines already in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartProduct {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub category_id: Uuid,
    pub images: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CartCategory>,
}

impl From<CategoryResponseDto> for CartCategory {
    fn from(c: CategoryResponseDto) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            image: c.image,
        }
    }
}

impl From<ProductResponseDto> for CartProduct {
    fn from(p: ProductResponseDto) -> Self {
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
            category: p.category.map(Into::into),
        }
    }
}

/// A product snapshot plus the quantity held in the cart (always >= 1)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: CartProduct,
    pub quantity: u32,
}

impl CartItem {
    pub fn new(product: CartProduct) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    pub fn id(&self) -> Uuid {
        self.product.id
    }

    pub fn line_total(&self) -> Decimal {
        self.product
            .price
            .saturating_mul(Decimal::from(self.quantity))
    }
}
