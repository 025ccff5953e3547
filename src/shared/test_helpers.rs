//! In-memory stand-ins and generated data for unit and handler tests.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use fake::faker::lorem::en::{Sentence, Word};
use fake::faker::name::en::Name;
use fake::Fake;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::cart::models::{CartCategory, CartProduct};
use crate::features::categories::models::{Category, CategoryInput, CategoryWithProductCount};
use crate::features::categories::repositories::CategoryRepository;
use crate::features::products::models::{Product, ProductInput, ProductWithCategory};
use crate::features::products::repositories::ProductRepository;

/// Product snapshot with generated text and the given price
pub fn cart_product(price: Decimal) -> CartProduct {
    let name: String = Name().fake();
    let category_slug: String = Word().fake();

    CartProduct {
        id: Uuid::new_v4(),
        slug: format!("{}-{}", slugify(&name), Uuid::new_v4().simple()),
        name,
        description: Some(Sentence(3..8).fake()),
        price,
        stock: (1..100).fake(),
        category_id: Uuid::new_v4(),
        images: None,
        created_at: Utc::now(),
        category: Some(CartCategory {
            id: Uuid::new_v4(),
            name: category_slug.clone(),
            slug: category_slug,
            image: None,
        }),
    }
}

fn slugify(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect()
}

#[derive(Default)]
struct CatalogState {
    categories: Vec<Category>,
    products: Vec<Product>,
    last_timestamp: Option<DateTime<Utc>>,
}

impl CatalogState {
    /// Strictly increasing timestamps so newest-first ordering is deterministic
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let next = match self.last_timestamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_timestamp = Some(next);
        next
    }

    fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    fn with_category(&self, product: &Product) -> ProductWithCategory {
        ProductWithCategory {
            product: product.clone(),
            category: self.category(product.category_id).cloned(),
        }
    }
}

/// Catalog storage held in memory, with the same unique-slug and
/// foreign-key behavior as the Postgres schema
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    state: Arc<Mutex<CatalogState>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, CatalogState> {
        self.state.lock().unwrap()
    }

    pub fn category_count(&self) -> usize {
        self.state().categories.len()
    }

    pub fn product_count(&self) -> usize {
        self.state().products.len()
    }

    /// Seed a category directly, bypassing the service
    pub fn insert_category(&self, slug: &str) -> Category {
        let mut state = self.state();
        let now = state.next_timestamp();
        let category = Category {
            id: Uuid::new_v4(),
            name: Word().fake(),
            slug: slug.to_string(),
            image: None,
            created_at: now,
            updated_at: now,
        };
        state.categories.push(category.clone());
        category
    }

    /// Seed a product referencing `category_id`
    pub fn insert_product_in(&self, category_id: Uuid) -> Product {
        let mut state = self.state();
        let now = state.next_timestamp();
        let product = Product {
            id: Uuid::new_v4(),
            name: Name().fake(),
            slug: Uuid::new_v4().simple().to_string(),
            description: None,
            price: Decimal::new((100..10_000).fake::<i64>(), 2),
            stock: (0..50).fake(),
            category_id,
            images: None,
            created_at: now,
            updated_at: now,
        };
        state.products.push(product.clone());
        product
    }
}

fn slug_taken() -> AppError {
    AppError::Conflict("Slug already exists".to_string())
}

fn unknown_category() -> AppError {
    AppError::BadRequest("Category does not exist".to_string())
}

/// NUMERIC(12,2) storage pads to two decimal places
fn stored_price(price: Decimal) -> Decimal {
    let mut stored = price;
    stored.rescale(2);
    stored
}

#[async_trait]
impl CategoryRepository for InMemoryCatalog {
    async fn find_all(&self) -> Result<Vec<CategoryWithProductCount>> {
        let state = self.state();
        let mut categories: Vec<CategoryWithProductCount> = state
            .categories
            .iter()
            .map(|c| CategoryWithProductCount {
                category: c.clone(),
                product_count: state
                    .products
                    .iter()
                    .filter(|p| p.category_id == c.id)
                    .count() as i64,
            })
            .collect();
        categories.sort_by(|a, b| b.category.created_at.cmp(&a.category.created_at));
        Ok(categories)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        Ok(self.state().category(id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        Ok(self
            .state()
            .categories
            .iter()
            .find(|c| c.slug == slug)
            .cloned())
    }

    async fn find_by_slug_excluding_id(&self, slug: &str, id: Uuid) -> Result<Option<Category>> {
        Ok(self
            .state()
            .categories
            .iter()
            .find(|c| c.slug == slug && c.id != id)
            .cloned())
    }

    async fn create(&self, input: &CategoryInput) -> Result<Category> {
        let mut state = self.state();
        if state.categories.iter().any(|c| c.slug == input.slug) {
            return Err(slug_taken());
        }

        let now = state.next_timestamp();
        let category = Category {
            id: Uuid::new_v4(),
            name: input.name.clone(),
            slug: input.slug.clone(),
            image: input.image().map(str::to_string),
            created_at: now,
            updated_at: now,
        };
        state.categories.push(category.clone());
        Ok(category)
    }

    async fn update(&self, id: Uuid, input: &CategoryInput) -> Result<Option<Category>> {
        let mut state = self.state();
        if state
            .categories
            .iter()
            .any(|c| c.slug == input.slug && c.id != id)
        {
            return Err(slug_taken());
        }

        let now = state.next_timestamp();
        let Some(category) = state.categories.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        category.name = input.name.clone();
        category.slug = input.slug.clone();
        if let Some(image) = &input.image {
            category.image = image.clone();
        }
        category.updated_at = now;
        Ok(Some(category.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut state = self.state();
        if state.products.iter().any(|p| p.category_id == id) {
            return Err(AppError::Conflict("Category still has products".to_string()));
        }

        let before = state.categories.len();
        state.categories.retain(|c| c.id != id);
        Ok(state.categories.len() < before)
    }
}

#[async_trait]
impl ProductRepository for InMemoryCatalog {
    async fn find_all(&self, category_id: Option<Uuid>) -> Result<Vec<ProductWithCategory>> {
        let state = self.state();
        let mut products: Vec<ProductWithCategory> = state
            .products
            .iter()
            .filter(|p| category_id.is_none_or(|id| p.category_id == id))
            .map(|p| state.with_category(p))
            .collect();
        products.sort_by(|a, b| b.product.created_at.cmp(&a.product.created_at));
        Ok(products)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProductWithCategory>> {
        let state = self.state();
        Ok(state
            .products
            .iter()
            .find(|p| p.id == id)
            .map(|p| state.with_category(p)))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>> {
        Ok(self
            .state()
            .products
            .iter()
            .find(|p| p.slug == slug)
            .cloned())
    }

    async fn find_by_slug_excluding_id(&self, slug: &str, id: Uuid) -> Result<Option<Product>> {
        Ok(self
            .state()
            .products
            .iter()
            .find(|p| p.slug == slug && p.id != id)
            .cloned())
    }

    async fn create(&self, input: &ProductInput) -> Result<Product> {
        let mut state = self.state();
        if state.products.iter().any(|p| p.slug == input.slug) {
            return Err(slug_taken());
        }
        if state.category(input.category_id).is_none() {
            return Err(unknown_category());
        }

        let now = state.next_timestamp();
        let product = Product {
            id: Uuid::new_v4(),
            name: input.name.clone(),
            slug: input.slug.clone(),
            description: input.description().map(str::to_string),
            price: stored_price(input.price),
            stock: input.stock,
            category_id: input.category_id,
            images: input.images().map(str::to_string),
            created_at: now,
            updated_at: now,
        };
        state.products.push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: Uuid, input: &ProductInput) -> Result<Option<Product>> {
        let mut state = self.state();
        if state
            .products
            .iter()
            .any(|p| p.slug == input.slug && p.id != id)
        {
            return Err(slug_taken());
        }
        if !state.products.iter().any(|p| p.id == id) {
            return Ok(None);
        }
        if state.category(input.category_id).is_none() {
            return Err(unknown_category());
        }

        let now = state.next_timestamp();
        let Some(product) = state.products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        product.name = input.name.clone();
        product.slug = input.slug.clone();
        if let Some(description) = &input.description {
            product.description = description.clone();
        }
        product.price = stored_price(input.price);
        product.stock = input.stock;
        product.category_id = input.category_id;
        if let Some(images) = &input.images {
            product.images = images.clone();
        }
        product.updated_at = now;
        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut state = self.state();
        let before = state.products.len();
        state.products.retain(|p| p.id != id);
        Ok(state.products.len() < before)
    }
}
