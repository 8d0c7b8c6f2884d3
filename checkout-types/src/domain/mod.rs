//! Domain models for the checkout flow.

pub mod checkout;
pub mod redirect;

pub use checkout::{CHECKOUT_ID_PLACEHOLDER, CHECKOUT_URL_TEMPLATE, CheckoutResponse, CheckoutResult};
pub use redirect::{PostbackStatus, RedirectPostback, SessionStatus};
