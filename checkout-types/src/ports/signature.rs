//! Postback signature port.

use rust_decimal::Decimal;

/// Authenticates that a postback originated from the gateway.
///
/// The gateway signs `"{checkoutId}&{amount}"` with the application's
/// secret. Implementations must compare signatures in constant time.
pub trait SignatureVerifier: Send + Sync {
    /// Computes the hex signature for a checkout identifier and amount.
    fn sign(&self, checkout_id: &str, amount: Decimal) -> String;

    /// Returns true if `signature` matches the checkout identifier and amount.
    fn verify(&self, checkout_id: &str, amount: Decimal, signature: &str) -> bool;
}

/// Renders the signed message, with the amount at two decimal places.
pub fn signature_payload(checkout_id: &str, amount: Decimal) -> String {
    let mut amount = amount.round_dp(2);
    amount.rescale(2);
    format!("{}&{}", checkout_id, amount)
}
