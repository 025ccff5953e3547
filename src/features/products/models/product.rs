use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::categories::models::Category;

/// Database model for product
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub category_id: Uuid,
    pub images: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product with its category resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductWithCategory {
    pub product: Product,
    pub category: Option<Category>,
}

/// Validated, normalized values written on create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInput {
    pub name: String,
    pub slug: String,
    /// `None` keeps the stored value on update; `Some(None)` clears it
    pub description: Option<Option<String>>,
    pub price: Decimal,
    pub stock: i32,
    pub category_id: Uuid,
    /// Same update rule as `description`
    pub images: Option<Option<String>>,
}

impl ProductInput {
    /// Description to store on create
    pub fn description(&self) -> Option<&str> {
        self.description.as_ref().and_then(|text| text.as_deref())
    }

    /// Image URL to store on create
    pub fn images(&self) -> Option<&str> {
        self.images.as_ref().and_then(|url| url.as_deref())
    }
}
