use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::features::checkout::ShippingMethod;
use crate::shared::coerce::lenient_decimal;
use crate::shared::constants::{MAX_LINE_QUANTITY, MAX_PRODUCT_PRICE};
use crate::shared::validation::rule_violation;

/// Request DTO for computing a checkout summary from cart lines
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummaryRequestDto {
    #[validate(nested)]
    #[serde(default)]
    pub items: Vec<CheckoutLineDto>,

    #[serde(default)]
    pub shipping_method: ShippingMethod,
}

/// One cart line as held by the client
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLineDto {
    pub product_id: Option<String>,

    #[validate(
        required(message = "Price must be a number"),
        custom(function = "validate_line_price")
    )]
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schema(value_type = String, example = "19.99")]
    pub price: Option<Decimal>,

    /// Lines with a quantity below 1 are ignored
    #[validate(range(max = MAX_LINE_QUANTITY, message = "Quantity cannot exceed 10000"))]
    pub quantity: i64,
}

fn validate_line_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(rule_violation("price", "Price cannot be negative"));
    }
    if *price > MAX_PRODUCT_PRICE {
        return Err(rule_violation("price", "Price cannot exceed 9999999999.99"));
    }
    Ok(())
}
