use rust_decimal::Decimal;
use uuid::Uuid;

use crate::features::cart::models::{CartItem, CartProduct};
use crate::features::cart::persistence::CartPersistence;
use crate::features::checkout::{CheckoutPricing, CheckoutSummary, ShippingMethod};

/// Client-side cart state.
///
/// Holds one line per product id plus the cart panel's open flag. The item
/// list is read from `P` on construction and written back after every change;
/// the open flag is never persisted and always starts closed. Totals are
/// derived on read.
///
/// Every operation is total: unknown ids are no-ops and storage failures are
/// logged, never returned.
#[derive(Debug)]
pub struct CartStore<P: CartPersistence> {
    items: Vec<CartItem>,
    is_cart_open: bool,
    persistence: P,
    pricing: CheckoutPricing,
}

impl<P: CartPersistence> CartStore<P> {
    pub fn new(persistence: P) -> Self {
        Self::with_pricing(persistence, CheckoutPricing::default())
    }

    pub fn with_pricing(persistence: P, pricing: CheckoutPricing) -> Self {
        let items = match persistence.load() {
            Ok(items) => sanitize(items),
            Err(e) => {
                tracing::warn!("Failed to restore cart, starting empty: {}", e);
                Vec::new()
            }
        };

        Self {
            items,
            is_cart_open: false,
            persistence,
            pricing,
        }
    }

    /// Add one unit of `product`, opening the cart panel.
    ///
    /// A new line snapshots the product; an existing line only gains quantity.
    pub fn add_item(&mut self, product: CartProduct) {
        match self.items.iter_mut().find(|item| item.id() == product.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(1),
            None => self.items.push(CartItem::new(product)),
        }
        self.is_cart_open = true;
        self.persist();
    }

    pub fn remove_item(&mut self, product_id: Uuid) {
        let before = self.items.len();
        self.items.retain(|item| item.id() != product_id);
        if self.items.len() != before {
            self.persist();
        }
    }

    /// Set the absolute quantity of a line; anything below 1 removes it.
    ///
    /// Quantities above `u32::MAX` are clamped to `u32::MAX`.
    pub fn update_quantity(&mut self, product_id: Uuid, quantity: i64) {
        if quantity < 1 {
            self.remove_item(product_id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(item) = self.items.iter_mut().find(|item| item.id() == product_id) {
            item.quantity = quantity;
            self.persist();
        }
    }

    pub fn clear_cart(&mut self) {
        self.items.clear();
        self.persist();
    }

    pub fn set_cart_open(&mut self, is_open: bool) {
        self.is_cart_open = is_open;
    }

    pub fn is_cart_open(&self) -> bool {
        self.is_cart_open
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, product_id: Uuid) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of price x quantity over all lines
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |total, item| total.saturating_add(item.line_total()))
    }

    /// Sum of quantities over all lines
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    pub fn free_shipping_remaining(&self) -> Decimal {
        self.pricing.free_shipping_remaining(self.total())
    }

    pub fn free_shipping_progress(&self) -> Decimal {
        self.pricing.free_shipping_progress(self.total())
    }

    pub fn has_free_shipping(&self) -> bool {
        self.free_shipping_remaining().is_zero()
    }

    /// Order summary for the current lines; `None` if the total overflows
    pub fn checkout_summary(&self, method: ShippingMethod) -> Option<CheckoutSummary> {
        self.pricing
            .summarize(self.total(), self.item_count(), method)
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    fn persist(&self) {
        if let Err(e) = self.persistence.save(&self.items) {
            tracing::warn!("Failed to persist cart ({} items): {}", self.items.len(), e);
        }
    }
}

/// Drop zero-quantity lines and merge duplicate ids from a restored blob
fn sanitize(items: Vec<CartItem>) -> Vec<CartItem> {
    let mut merged: Vec<CartItem> = Vec::with_capacity(items.len());
    for item in items.into_iter().filter(|item| item.quantity >= 1) {
        match merged.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(item.quantity)
            }
            None => merged.push(item),
        }
    }
    merged
}
