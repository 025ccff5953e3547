use rust_decimal::Decimal;

use crate::core::error::{AppError, Result};
use crate::features::checkout::dtos::CheckoutSummaryRequestDto;
use crate::features::checkout::{CheckoutPricing, CheckoutSummary};
use crate::shared::validation::validate_payload;

/// Stateless checkout calculation; performs no payment and stores nothing
pub struct CheckoutService {
    pricing: CheckoutPricing,
}

impl CheckoutService {
    pub fn new(pricing: CheckoutPricing) -> Self {
        Self { pricing }
    }

    pub fn summarize(&self, dto: &CheckoutSummaryRequestDto) -> Result<CheckoutSummary> {
        validate_payload(dto)?;

        let mut subtotal = Decimal::ZERO;
        let mut item_count = 0u64;
        for line in dto.items.iter().filter(|line| line.quantity >= 1) {
            let price = line.price.unwrap_or_default();
            let quantity = line.quantity.unsigned_abs();
            subtotal = price
                .checked_mul(Decimal::from(quantity))
                .and_then(|line_total| subtotal.checked_add(line_total))
                .ok_or_else(total_too_large)?;
            item_count = item_count.saturating_add(quantity);
        }

        self.pricing
            .summarize(subtotal, item_count, dto.shipping_method)
            .ok_or_else(total_too_large)
    }
}

fn total_too_large() -> AppError {
    AppError::BadRequest("Order total is too large".to_string())
}
