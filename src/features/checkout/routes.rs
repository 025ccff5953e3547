use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::checkout::handlers;
use crate::features::checkout::services::CheckoutService;

/// Create routes for the checkout feature
pub fn routes(service: Arc<CheckoutService>) -> Router {
    Router::new()
        .route("/api/checkout/summary", post(handlers::checkout_summary))
        .with_state(service)
}
