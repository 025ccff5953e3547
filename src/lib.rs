//! Storefront backend: catalog CRUD, checkout summary and the client-side
//! cart state container.

pub mod core;
pub mod features;
pub mod shared;
