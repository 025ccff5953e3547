use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::{constraint_violation, ConstraintViolation};
use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;
use crate::features::products::models::{Product, ProductInput, ProductWithCategory};

/// Storage collaborator for products
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Products with their categories, newest first, optionally of one category
    async fn find_all(&self, category_id: Option<Uuid>) -> Result<Vec<ProductWithCategory>>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProductWithCategory>>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>>;
    async fn find_by_slug_excluding_id(&self, slug: &str, id: Uuid) -> Result<Option<Product>>;
    async fn create(&self, input: &ProductInput) -> Result<Product>;
    /// Returns `None` when no product has this id
    async fn update(&self, id: Uuid, input: &ProductInput) -> Result<Option<Product>>;
    /// Returns `false` when no product has this id
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// Convert database error to more specific AppError
fn handle_db_error(e: sqlx::Error) -> AppError {
    match constraint_violation(&e) {
        Some(ConstraintViolation::Unique) => AppError::Conflict("Slug already exists".to_string()),
        Some(ConstraintViolation::ForeignKey) => {
            AppError::BadRequest("Category does not exist".to_string())
        }
        None => {
            tracing::error!("Product query failed: {:?}", e);
            AppError::Database(e)
        }
    }
}

const PRODUCT_COLUMNS: &str =
    "id, name, slug, description, price, stock, category_id, images, created_at, updated_at";

pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn categories_by_id(&self, ids: Vec<Uuid>) -> Result<HashMap<Uuid, Category>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, slug, image, created_at, updated_at
            FROM categories
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(handle_db_error)?;

        Ok(categories.into_iter().map(|c| (c.id, c)).collect())
    }

    async fn with_categories(&self, products: Vec<Product>) -> Result<Vec<ProductWithCategory>> {
        let mut ids: Vec<Uuid> = products.iter().map(|p| p.category_id).collect();
        ids.sort_unstable();
        ids.dedup();

        let categories = self.categories_by_id(ids).await?;

        Ok(products
            .into_iter()
            .map(|product| ProductWithCategory {
                category: categories.get(&product.category_id).cloned(),
                product,
            })
            .collect())
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_all(&self, category_id: Option<Uuid>) -> Result<Vec<ProductWithCategory>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE ($1::uuid IS NULL OR category_id = $1)
            ORDER BY created_at DESC
            "#
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(handle_db_error)?;

        self.with_categories(products).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProductWithCategory>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(handle_db_error)?;

        match product {
            Some(product) => Ok(self.with_categories(vec![product]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>> {
        sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(handle_db_error)
    }

    async fn find_by_slug_excluding_id(&self, slug: &str, id: Uuid) -> Result<Option<Product>> {
        sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE slug = $1 AND id <> $2 LIMIT 1"
        ))
        .bind(slug)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(handle_db_error)
    }

    async fn create(&self, input: &ProductInput) -> Result<Product> {
        sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (name, slug, description, price, stock, category_id, images)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(&input.slug)
        .bind(input.description())
        .bind(input.price)
        .bind(input.stock)
        .bind(input.category_id)
        .bind(input.images())
        .fetch_one(&self.pool)
        .await
        .map_err(handle_db_error)
    }

    async fn update(&self, id: Uuid, input: &ProductInput) -> Result<Option<Product>> {
        sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET name = $1, slug = $2,
                description = CASE WHEN $3 THEN $4 ELSE description END,
                price = $5, stock = $6, category_id = $7,
                images = CASE WHEN $8 THEN $9 ELSE images END,
                updated_at = NOW()
            WHERE id = $10
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(&input.slug)
        .bind(input.description.is_some())
        .bind(input.description())
        .bind(input.price)
        .bind(input.stock)
        .bind(input.category_id)
        .bind(input.images.is_some())
        .bind(input.images())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(handle_db_error)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(handle_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
