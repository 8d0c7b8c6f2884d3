//! # Checkout Types
//!
//! Domain types and port traits for the Dwolla off-site checkout flow.
//! This crate has ZERO IO dependencies - only data structures,
//! validation rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate is the **innermost core** of the workspace:
//! - `domain/` - Checkout response and redirect postback models
//! - `validation/` - Field-level rules and their results
//! - `ports/` - Trait definitions that adapters must implement
//! - `error/` - Domain and application error types

pub mod domain;
pub mod error;
pub mod ports;
pub mod validation;

// Re-export commonly used types
pub use domain::{
    CHECKOUT_ID_PLACEHOLDER, CHECKOUT_URL_TEMPLATE, CheckoutResponse, CheckoutResult,
    PostbackStatus, RedirectPostback, SessionStatus,
};
pub use error::{AppError, DomainError};
pub use ports::{SignatureVerifier, signature_payload};
pub use validation::{
    Validate, ValidationErrors, ValidationFailure, ValidationResult, validate_checkout_response,
    validate_redirect_postback,
};
