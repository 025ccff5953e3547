use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::{constraint_violation, ConstraintViolation};
use crate::core::error::{AppError, Result};
use crate::features::categories::models::{Category, CategoryInput, CategoryWithProductCount};

/// Storage collaborator for categories
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories with product counts, newest first
    async fn find_all(&self) -> Result<Vec<CategoryWithProductCount>>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>>;
    async fn find_by_slug_excluding_id(&self, slug: &str, id: Uuid) -> Result<Option<Category>>;
    async fn create(&self, input: &CategoryInput) -> Result<Category>;
    /// Returns `None` when no category has this id
    async fn update(&self, id: Uuid, input: &CategoryInput) -> Result<Option<Category>>;
    /// Returns `false` when no category has this id
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// Convert database error to more specific AppError
fn handle_db_error(e: sqlx::Error) -> AppError {
    match constraint_violation(&e) {
        Some(ConstraintViolation::Unique) => AppError::Conflict("Slug already exists".to_string()),
        Some(ConstraintViolation::ForeignKey) => {
            AppError::Conflict("Category still has products".to_string())
        }
        None => {
            tracing::error!("Category query failed: {:?}", e);
            AppError::Database(e)
        }
    }
}

pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn find_all(&self) -> Result<Vec<CategoryWithProductCount>> {
        sqlx::query_as::<_, CategoryWithProductCount>(
            r#"
            SELECT c.id, c.name, c.slug, c.image, c.created_at, c.updated_at,
                   COUNT(p.id) AS product_count
            FROM categories c
            LEFT JOIN products p ON p.category_id = c.id
            GROUP BY c.id
            ORDER BY c.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(handle_db_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, slug, image, created_at, updated_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(handle_db_error)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, slug, image, created_at, updated_at
            FROM categories
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(handle_db_error)
    }

    async fn find_by_slug_excluding_id(&self, slug: &str, id: Uuid) -> Result<Option<Category>> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, slug, image, created_at, updated_at
            FROM categories
            WHERE slug = $1 AND id <> $2
            LIMIT 1
            "#,
        )
        .bind(slug)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(handle_db_error)
    }

    async fn create(&self, input: &CategoryInput) -> Result<Category> {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, slug, image)
            VALUES ($1, $2, $3)
            RETURNING id, name, slug, image, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.slug)
        .bind(input.image())
        .fetch_one(&self.pool)
        .await
        .map_err(handle_db_error)
    }

    async fn update(&self, id: Uuid, input: &CategoryInput) -> Result<Option<Category>> {
        sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $1, slug = $2,
                image = CASE WHEN $3 THEN $4 ELSE image END,
                updated_at = NOW()
            WHERE id = $5
            RETURNING id, name, slug, image, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.slug)
        .bind(input.image.is_some())
        .bind(input.image())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(handle_db_error)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(handle_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
