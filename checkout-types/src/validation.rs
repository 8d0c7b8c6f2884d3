//! Field-level validation rules.
//!
//! Every rule of a model is evaluated; failures are collected in rule order
//! and returned as data. Validators never return errors themselves - callers
//! decide what an invalid result means via [`ValidationResult::into_result`].

use serde::{Deserialize, Serialize};

use crate::domain::{CheckoutResponse, CheckoutResult, RedirectPostback, SessionStatus};
use crate::error::DomainError;

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFailure {
    /// Wire name of the offending field
    pub field: String,
    /// User-facing explanation
    pub message: String,
    /// The value the rule was evaluated against
    pub attempted_value: Option<String>,
}

/// Outcome of validating a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<ValidationFailure>,
}

impl ValidationResult {
    fn from_failures(errors: Vec<ValidationFailure>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// True iff no rule failed.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Failures in rule order.
    pub fn failures(&self) -> &[ValidationFailure] {
        &self.errors
    }

    pub fn first(&self) -> Option<&ValidationFailure> {
        self.errors.first()
    }

    /// Converts an invalid result into [`DomainError::Validation`].
    pub fn into_result(self) -> Result<(), DomainError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(DomainError::Validation(ValidationErrors(self.errors)))
        }
    }
}

/// Non-empty list of failures carried by an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationFailure>);

impl ValidationErrors {
    pub fn failures(&self) -> &[ValidationFailure] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<ValidationFailure> {
        self.0
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            f.write_str(&failure.message)?;
        }
        Ok(())
    }
}

/// Models that carry their own validation rules.
pub trait Validate {
    fn validate(&self) -> ValidationResult;
}

impl Validate for CheckoutResponse {
    fn validate(&self) -> ValidationResult {
        validate_checkout_response(self)
    }
}

impl Validate for RedirectPostback {
    fn validate(&self) -> ValidationResult {
        validate_redirect_postback(self)
    }
}

/// Collects failures for one model.
#[derive(Default)]
struct Rules {
    failures: Vec<ValidationFailure>,
}

impl Rules {
    fn check(
        &mut self,
        passes: bool,
        field: &str,
        attempted_value: Option<&str>,
        message: impl FnOnce() -> String,
    ) -> &mut Self {
        if !passes {
            self.failures.push(ValidationFailure {
                field: field.to_string(),
                message: message(),
                attempted_value: attempted_value.map(str::to_string),
            });
        }
        self
    }

    fn finish(self) -> ValidationResult {
        ValidationResult::from_failures(self.failures)
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Validates a checkout response.
///
/// - `Result` must be `Success`; the failure message surfaces the gateway's
///   own message verbatim.
/// - `CheckoutId` must be present when `Result` is `Success`.
pub fn validate_checkout_response(response: &CheckoutResponse) -> ValidationResult {
    let succeeded = response.status == CheckoutResult::Success;
    let checkout_id = response.checkout_id.as_deref();

    let mut rules = Rules::default();
    rules
        .check(succeeded, "Result", Some(response.status.as_ref()), || {
            format!(
                "The checkout request failed. Message from Dwolla's Servers: '{}'",
                response.message.as_deref().unwrap_or_default()
            )
        })
        .check(!succeeded || !is_blank(checkout_id), "CheckoutId", checkout_id, || {
            "'Checkout Id' must not be empty when the checkout request succeeds.".to_string()
        });
    rules.finish()
}

/// Validates a redirect postback.
///
/// The signature itself is not checked here; see
/// [`SignatureVerifier`](crate::ports::SignatureVerifier).
pub fn validate_redirect_postback(postback: &RedirectPostback) -> ValidationResult {
    let checkout_id = postback.checkout_id.as_deref();
    let signature = postback.signature.as_deref();
    let completed = postback.status == SessionStatus::Completed;
    let transaction = postback.transaction.map(|t| t.to_string());

    let mut rules = Rules::default();
    rules
        .check(!is_blank(checkout_id), "checkoutId", checkout_id, || {
            "'Checkout Id' must not be empty.".to_string()
        })
        .check(!is_blank(signature), "signature", signature, || {
            "'Signature' must not be empty.".to_string()
        })
        .check(completed, "status", Some(postback.status.as_ref()), || {
            format!(
                "The checkout session failed. Error from Dwolla's Servers: '{}'",
                postback.error_description.as_deref().unwrap_or_default()
            )
        })
        .check(
            !completed || postback.test || postback.transaction.is_some(),
            "transaction",
            transaction.as_deref(),
            || "'Transaction' must be present for a completed checkout outside test mode.".to_string(),
        );
    rules.finish()
}
