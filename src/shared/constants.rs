use rust_decimal::Decimal;

/// Cart subtotal at which standard shipping becomes free (100.00)
pub const DEFAULT_FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Flat sales tax applied at checkout (8%)
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Flat cost of express shipping (15.00)
pub const DEFAULT_EXPRESS_SHIPPING_COST: Decimal = Decimal::from_parts(15, 0, 0, false, 0);

/// Smallest accepted product price (0.01)
pub const MIN_PRODUCT_PRICE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Largest price a `NUMERIC(12,2)` column holds (9999999999.99)
pub const MAX_PRODUCT_PRICE: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// Longest name or slug a `VARCHAR(255)` column holds
pub const MAX_TEXT_LENGTH: usize = 255;

/// Largest quantity accepted for a single checkout line
pub const MAX_LINE_QUANTITY: i64 = 10_000;

/// Name of the durable blob holding the persisted cart
pub const CART_STORAGE_NAME: &str = "cart-storage";
