use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::checkout::dtos::CheckoutSummaryRequestDto;
use crate::features::checkout::services::CheckoutService;
use crate::features::checkout::CheckoutSummary;
use crate::shared::types::ApiResponse;

/// Compute the checkout summary for the given cart lines
#[utoipa::path(
    post,
    path = "/api/checkout/summary",
    request_body = CheckoutSummaryRequestDto,
    responses(
        (status = 200, description = "Checkout summary", body = ApiResponse<CheckoutSummary>),
        (status = 400, description = "Validation error")
    ),
    tag = "checkout"
)]
pub async fn checkout_summary(
    State(service): State<Arc<CheckoutService>>,
    AppJson(dto): AppJson<CheckoutSummaryRequestDto>,
) -> Result<Json<ApiResponse<CheckoutSummary>>> {
    let summary = service.summarize(&dto)?;

    tracing::debug!(
        "Checkout summary computed: items={}, total={}",
        summary.item_count,
        summary.total
    );

    Ok(Json(ApiResponse::success(Some(summary), None)))
}
