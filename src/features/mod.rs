//! Features layer - one vertical slice per domain area

pub mod cart;
pub mod categories;
pub mod checkout;
pub mod products;
