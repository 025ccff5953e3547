use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for category
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category row joined with the number of products referencing it
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct CategoryWithProductCount {
    #[sqlx(flatten)]
    pub category: Category,
    pub product_count: i64,
}

/// Validated, normalized values written on create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInput {
    pub name: String,
    pub slug: String,
    /// `None` keeps the stored image on update; `Some(None)` clears it
    pub image: Option<Option<String>>,
}

impl CategoryInput {
    /// Image to store on create
    pub fn image(&self) -> Option<&str> {
        self.image.as_ref().and_then(|image| image.as_deref())
    }
}
