//! # Checkout Hex
//!
//! Application layer of the checkout flow:
//! - `service` - orchestrates validation and signature checks over the ports

pub mod service;


pub use service::CheckoutService;
