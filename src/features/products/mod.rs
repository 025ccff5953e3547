//! Catalog products.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/products` | No | List products (`?categoryId=` filter) |
//! | POST | `/api/products` | No | Create a product |
//! | GET | `/api/products/{id}` | No | Get a product with its category |
//! | PATCH/PUT | `/api/products/{id}` | No | Update a product |
//! | DELETE | `/api/products/{id}` | No | Delete a product |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{PgProductRepository, ProductRepository};
pub use services::ProductService;
