use utoipa::{Modify, OpenApi};

use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::checkout::{
    dtos as checkout_dtos, handlers as checkout_handlers, CheckoutSummary, ShippingMethod,
};
use crate::features::products::{dtos as products_dtos, handlers as products_handlers};
use crate::shared::types::{ApiResponse, FieldError, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Categories
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Products
        products_handlers::list_products,
        products_handlers::get_product,
        products_handlers::create_product,
        products_handlers::update_product,
        products_handlers::delete_product,
        // Checkout
        checkout_handlers::checkout_summary,
    ),
    components(
        schemas(
            // Shared
            Meta,
            FieldError,
            // Categories
            categories_dtos::CategoryPayloadDto,
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryWithCountResponseDto,
            ApiResponse<Vec<categories_dtos::CategoryWithCountResponseDto>>,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            // Products
            products_dtos::ProductPayloadDto,
            products_dtos::ProductResponseDto,
            ApiResponse<Vec<products_dtos::ProductResponseDto>>,
            ApiResponse<products_dtos::ProductResponseDto>,
            // Checkout
            ShippingMethod,
            CheckoutSummary,
            checkout_dtos::CheckoutSummaryRequestDto,
            checkout_dtos::CheckoutLineDto,
            ApiResponse<CheckoutSummary>,
        )
    ),
    tags(
        (name = "categories", description = "Catalog categories"),
        (name = "products", description = "Catalog products"),
        (name = "checkout", description = "Order summary before payment"),
    ),
    info(
        title = "Storefront API",
        version = "0.1.0",
        description = "API documentation for the storefront catalog and checkout",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
