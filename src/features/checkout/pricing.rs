use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::{
    DEFAULT_EXPRESS_SHIPPING_COST, DEFAULT_FREE_SHIPPING_THRESHOLD, DEFAULT_TAX_RATE,
};

/// Shipping options offered at checkout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ShippingMethod {
    #[default]
    Standard,
    Express,
}

/// Flat-rate pricing rules applied to a cart subtotal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutPricing {
    pub free_shipping_threshold: Decimal,
    pub tax_rate: Decimal,
    pub express_shipping_cost: Decimal,
}

impl Default for CheckoutPricing {
    fn default() -> Self {
        Self {
            free_shipping_threshold: DEFAULT_FREE_SHIPPING_THRESHOLD,
            tax_rate: DEFAULT_TAX_RATE,
            express_shipping_cost: DEFAULT_EXPRESS_SHIPPING_COST,
        }
    }
}

/// Order summary shown before the (simulated) payment step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    #[schema(value_type = String, example = "120.00")]
    pub subtotal: Decimal,
    pub item_count: u64,
    pub shipping_method: ShippingMethod,
    #[schema(value_type = String, example = "15.00")]
    pub shipping_cost: Decimal,
    #[schema(value_type = String, example = "0.08")]
    pub tax_rate: Decimal,
    #[schema(value_type = String, example = "9.60")]
    pub tax_amount: Decimal,
    #[schema(value_type = String, example = "144.60")]
    pub total: Decimal,
    #[schema(value_type = String, example = "0.00")]
    pub free_shipping_remaining: Decimal,
    /// Progress towards free shipping, in percent (0-100)
    #[schema(value_type = String, example = "100.00")]
    pub free_shipping_progress: Decimal,
}

impl CheckoutPricing {
    pub fn shipping_cost(&self, method: ShippingMethod) -> Decimal {
        match method {
            ShippingMethod::Standard => Decimal::ZERO,
            ShippingMethod::Express => self.express_shipping_cost,
        }
    }

    /// Flat tax on `subtotal`; `None` when the amount is not representable
    pub fn tax_amount(&self, subtotal: Decimal) -> Option<Decimal> {
        subtotal.checked_mul(self.tax_rate).map(round_currency)
    }

    /// Amount still needed to unlock free shipping, never negative
    pub fn free_shipping_remaining(&self, subtotal: Decimal) -> Decimal {
        (self.free_shipping_threshold - subtotal).max(Decimal::ZERO)
    }

    /// Percentage of the free shipping threshold reached, capped at 100
    pub fn free_shipping_progress(&self, subtotal: Decimal) -> Decimal {
        if self.free_shipping_threshold <= Decimal::ZERO {
            return Decimal::ONE_HUNDRED;
        }
        let progress = subtotal
            .checked_div(self.free_shipping_threshold)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ONE_HUNDRED);
        round_currency(progress.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED))
    }

    /// Build the order summary; `None` when the total overflows `Decimal`
    pub fn summarize(
        &self,
        subtotal: Decimal,
        item_count: u64,
        method: ShippingMethod,
    ) -> Option<CheckoutSummary> {
        let shipping_cost = self.shipping_cost(method);
        let tax_amount = self.tax_amount(subtotal)?;
        let total = subtotal
            .checked_add(shipping_cost)?
            .checked_add(tax_amount)?;

        Some(CheckoutSummary {
            subtotal: round_currency(subtotal),
            item_count,
            shipping_method: method,
            shipping_cost: round_currency(shipping_cost),
            tax_rate: self.tax_rate,
            tax_amount,
            total: round_currency(total),
            free_shipping_remaining: round_currency(self.free_shipping_remaining(subtotal)),
            free_shipping_progress: self.free_shipping_progress(subtotal),
        })
    }
}

/// Round to cents and always carry two decimal places
fn round_currency(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_express_summary_adds_shipping_and_tax() {
        let pricing = CheckoutPricing::default();

        let summary = pricing
            .summarize(Decimal::new(10000, 2), 4, ShippingMethod::Express)
            .unwrap();

        assert_eq!(summary.shipping_cost, Decimal::new(1500, 2));
        assert_eq!(summary.tax_amount, Decimal::new(800, 2));
        assert_eq!(summary.total, Decimal::new(12300, 2));
        assert_eq!(summary.free_shipping_remaining, Decimal::ZERO);
        assert_eq!(summary.free_shipping_progress, Decimal::ONE_HUNDRED);
    }

    #[test]
    fn test_standard_shipping_is_free() {
        let pricing = CheckoutPricing::default();

        let summary = pricing
            .summarize(Decimal::new(2000, 2), 2, ShippingMethod::Standard)
            .unwrap();

        assert_eq!(summary.shipping_cost, Decimal::ZERO);
        assert_eq!(summary.tax_amount, Decimal::new(160, 2));
        assert_eq!(summary.total, Decimal::new(2160, 2));
    }

    #[test]
    fn test_free_shipping_progress_below_threshold() {
        let pricing = CheckoutPricing::default();

        assert_eq!(
            pricing.free_shipping_remaining(Decimal::new(2500, 2)),
            Decimal::new(7500, 2)
        );
        assert_eq!(
            pricing.free_shipping_progress(Decimal::new(2500, 2)),
            Decimal::new(25, 0)
        );
    }

    #[test]
    fn test_tax_rounds_half_away_from_zero() {
        let pricing = CheckoutPricing::default();
        // 0.8125 * 0.08 = 0.065 -> 0.07
        assert_eq!(
            pricing.tax_amount(Decimal::new(8125, 4)),
            Some(Decimal::new(7, 2))
        );
    }

    #[test]
    fn test_empty_cart_summary() {
        let summary = CheckoutPricing::default()
            .summarize(Decimal::ZERO, 0, ShippingMethod::Standard)
            .unwrap();

        assert_eq!(summary.total, Decimal::ZERO);
        assert_eq!(summary.free_shipping_remaining, Decimal::new(100, 0));
        assert_eq!(summary.free_shipping_progress, Decimal::ZERO);
    }

    #[test]
    fn test_overflowing_total_is_none() {
        let pricing = CheckoutPricing::default();

        assert!(pricing
            .summarize(Decimal::MAX, 1, ShippingMethod::Express)
            .is_none());
    }

    #[test]
    fn test_progress_with_tiny_threshold_caps_at_hundred() {
        let pricing = CheckoutPricing {
            free_shipping_threshold: Decimal::new(1, 28),
            ..CheckoutPricing::default()
        };

        assert_eq!(
            pricing.free_shipping_progress(Decimal::MAX),
            Decimal::ONE_HUNDRED
        );
    }
}
