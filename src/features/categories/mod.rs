//! Catalog categories.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/categories` | No | List categories with product counts |
//! | POST | `/api/categories` | No | Create a category |
//! | GET | `/api/categories/{id}` | No | Get a category |
//! | PATCH/PUT | `/api/categories/{id}` | No | Update a category |
//! | DELETE | `/api/categories/{id}` | No | Delete a category |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{CategoryRepository, PgCategoryRepository};
pub use services::CategoryService;
