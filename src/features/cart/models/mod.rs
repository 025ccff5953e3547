pub mod cart_item;

pub use cart_item::*;
