//! Checkout Application Service
//!
//! Orchestrates validation and signature checks through the signing port.
//! Contains NO IO - the caller decides how to surface each error.

use checkout_types::{
    AppError, CHECKOUT_URL_TEMPLATE, CheckoutResponse, RedirectPostback, SignatureVerifier,
    Validate,
};
use rust_decimal::Decimal;

/// Application service for the off-site checkout flow.
///
/// Generic over `V: SignatureVerifier` - the signing adapter is injected at
/// compile time, so tests can substitute a fake.
pub struct CheckoutService<V: SignatureVerifier> {
    verifier: V,
    checkout_url: String,
}

impl<V: SignatureVerifier> CheckoutService<V> {
    /// Creates a service redirecting to the production checkout page.
    pub fn new(verifier: V) -> Self {
        Self {
            verifier,
            checkout_url: CHECKOUT_URL_TEMPLATE.to_string(),
        }
    }

    /// Overrides the redirect template (must contain `{CheckoutId}`).
    pub fn with_checkout_url(mut self, template: impl Into<String>) -> Self {
        self.checkout_url = template.into();
        self
    }

    /// Returns a reference to the underlying verifier.
    pub fn verifier(&self) -> &V {
        &self.verifier
    }

    pub fn checkout_url(&self) -> &str {
        &self.checkout_url
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Checkout Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Validates a checkout response and returns the customer's redirect URL.
    #[tracing::instrument(skip(self, response), fields(result = %response.status))]
    pub fn redirect_url(&self, response: &CheckoutResponse) -> Result<String, AppError> {
        if let Err(e) = response.validate().into_result() {
            tracing::info!("checkout response rejected: {}", e);
            return Err(e.into());
        }

        let url = response.build_redirect_url_with(&self.checkout_url);
        tracing::debug!("redirecting customer to {}", url);
        Ok(url)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Redirect Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Parses, validates and authenticates the redirect query string.
    #[tracing::instrument(skip(self, query))]
    pub fn accept_redirect(&self, query: &str) -> Result<RedirectPostback, AppError> {
        let postback = RedirectPostback::from_query(query).map_err(|e| {
            tracing::info!("malformed redirect query: {}", e);
            AppError::from(e)
        })?;
        self.accept_postback(postback)
    }

    /// Validates and authenticates an already deserialized postback.
    #[tracing::instrument(
        skip(self, postback),
        fields(checkout_id = ?postback.checkout_id, order_id = ?postback.order_id, test = postback.test)
    )]
    pub fn accept_postback(&self, postback: RedirectPostback) -> Result<RedirectPostback, AppError> {
        if let Err(e) = postback.validate().into_result() {
            tracing::info!("postback rejected: {}", e);
            return Err(e.into());
        }

        let checkout_id = postback.checkout_id.as_deref().unwrap_or_default();
        let signature = postback.signature.as_deref().unwrap_or_default();
        if !self.verifier.verify(checkout_id, postback.amount, signature) {
            return Err(AppError::InvalidSignature);
        }

        tracing::info!(amount = %postback.amount, "postback accepted");
        Ok(postback)
    }

    /// Computes the signature the gateway would send for this checkout.
    pub fn sign(&self, checkout_id: &str, amount: Decimal) -> String {
        self.verifier.sign(checkout_id, amount)
    }
}
