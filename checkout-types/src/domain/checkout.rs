//! Checkout response domain model.

use serde::{Deserialize, Serialize};

/// Hosted checkout page the customer's browser is sent to.
pub const CHECKOUT_URL_TEMPLATE: &str = "https://www.dwolla.com/payment/checkout/{CheckoutId}";

/// Placeholder replaced by the checkout identifier in a redirect template.
pub const CHECKOUT_ID_PLACEHOLDER: &str = "{CheckoutId}";

/// Outcome reported by the gateway for a checkout request.
///
/// Serialized by name (`"Success"` / `"Failure"`), never by ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CheckoutResult {
    Success,
    #[default]
    Failure,
}

impl AsRef<str> for CheckoutResult {
    fn as_ref(&self) -> &str {
        match self {
            Self::Success => "Success",
            Self::Failure => "Failure",
        }
    }
}

impl std::fmt::Display for CheckoutResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

/// Response to a checkout request.
///
/// A response is presumed failed until the gateway explicitly reports
/// success, so every field missing from the payload falls back to
/// [`CheckoutResponse::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CheckoutResponse {
    /// The result of the checkout request
    #[serde(rename = "Result")]
    pub status: CheckoutResult,
    /// Identifier generated by Dwolla, used to build the redirect URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_id: Option<String>,
    /// Error message when the result is a failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Default for CheckoutResponse {
    fn default() -> Self {
        Self {
            status: CheckoutResult::Failure,
            checkout_id: None,
            message: None,
        }
    }
}

impl CheckoutResponse {
    /// Creates a successful response carrying the gateway's checkout identifier.
    pub fn success(checkout_id: impl Into<String>) -> Self {
        Self {
            status: CheckoutResult::Success,
            checkout_id: Some(checkout_id.into()),
            message: None,
        }
    }

    /// Creates a failed response carrying the gateway's message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: CheckoutResult::Failure,
            checkout_id: None,
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == CheckoutResult::Success
    }

    /// Returns the URL for the customer's browser to complete the checkout.
    ///
    /// Performs no validation: a missing identifier is substituted as an
    /// empty string.
    pub fn build_redirect_url(&self) -> String {
        self.build_redirect_url_with(CHECKOUT_URL_TEMPLATE)
    }

    /// Substitutes the checkout identifier into a caller-provided template.
    pub fn build_redirect_url_with(&self, template: &str) -> String {
        template.replace(
            CHECKOUT_ID_PLACEHOLDER,
            self.checkout_id.as_deref().unwrap_or_default(),
        )
    }
}
