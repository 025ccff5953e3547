//! Client-side shopping cart state.
//!
//! `CartStore` is an explicit state container owned by the UI composition
//! root. It keeps one line per product, derives totals on read and writes the
//! item list through a `CartPersistence` port after every change. There is no
//! HTTP surface: the cart never round-trips through the server.

pub mod models;
pub mod persistence;
pub mod store;

pub use models::{CartCategory, CartItem, CartProduct};
pub use persistence::{
    CartPersistence, CartStorageError, JsonFileCartPersistence, MemoryCartPersistence,
};
pub use store::CartStore;
