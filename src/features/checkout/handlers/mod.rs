pub mod checkout_handler;

pub use checkout_handler::*;
