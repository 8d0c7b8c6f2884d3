//! Configuration resolved from flags and environment.

use checkout_hex::CheckoutService;
use checkout_signing::HmacSha1Verifier;
use checkout_types::CHECKOUT_ID_PLACEHOLDER;

/// Application configuration.
pub struct Config {
    pub app_secret: Option<String>,
    pub checkout_url: String,
}

impl Config {
    /// Checks the redirect template before anything uses it.
    pub fn new(app_secret: Option<String>, checkout_url: String) -> anyhow::Result<Self> {
        if !checkout_url.contains(CHECKOUT_ID_PLACEHOLDER) {
            anyhow::bail!(
                "DWOLLA_CHECKOUT_URL must contain the {} placeholder: {}",
                CHECKOUT_ID_PLACEHOLDER,
                checkout_url
            );
        }

        Ok(Self {
            app_secret: app_secret.filter(|s| !s.is_empty()),
            checkout_url,
        })
    }

    /// Builds the checkout service; signing commands need the secret.
    pub fn service(&self) -> anyhow::Result<CheckoutService<HmacSha1Verifier>> {
        let secret = self
            .app_secret
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("DWOLLA_APP_SECRET environment variable is required"))?;

        let verifier = HmacSha1Verifier::new(secret)?;
        Ok(CheckoutService::new(verifier).with_checkout_url(self.checkout_url.clone()))
    }
}
