//! Checkout summary calculation.
//!
//! Computes subtotal, shipping, flat-rate tax and free-shipping progress for
//! a set of cart lines. No payment is taken and nothing is persisted.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/checkout/summary` | No | Compute the order summary for cart lines |

pub mod dtos;
pub mod handlers;
pub mod pricing;
pub mod routes;
pub mod services;

pub use pricing::{CheckoutPricing, CheckoutSummary, ShippingMethod};
pub use services::CheckoutService;
