//! Redirect postback domain model.
//!
//! After the customer completes or abandons checkout, the gateway sends the
//! browser back to the merchant's redirect URL with these parameters in the
//! query string, and posts the same payload to the merchant's callback URL.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Whether the gateway's notification to the merchant's callback URL
/// completed successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PostbackStatus {
    Success,
    #[default]
    Failure,
}

impl AsRef<str> for PostbackStatus {
    fn as_ref(&self) -> &str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}

impl std::fmt::Display for PostbackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for PostbackStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "success" => Ok(Self::Success),
            "failure" => Ok(Self::Failure),
            _ => Err(DomainError::invalid_field("postback", s)),
        }
    }
}

/// Status of the checkout session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SessionStatus {
    Completed,
    #[default]
    Failed,
}

impl AsRef<str> for SessionStatus {
    fn as_ref(&self) -> &str {
        match self {
            Self::Completed => "Completed",
            Self::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for SessionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            _ => Err(DomainError::invalid_field("status", s)),
        }
    }
}

/// Parameters the gateway returns once a checkout session ends.
///
/// Both statuses default to their failed variants until the payload says
/// otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RedirectPostback {
    /// Unique purchase order ID generated by the gateway
    pub checkout_id: Option<String>,
    /// Order ID provided during the checkout request
    pub order_id: Option<String>,
    /// Set for sandbox purchase orders
    pub test: bool,
    /// Dwolla transaction ID; absent in test mode
    pub transaction: Option<i64>,
    pub postback: PostbackStatus,
    /// Total amount of the purchase
    pub amount: Decimal,
    /// HMAC-SHA1 hex digest of `"{checkoutId}&{amount}"`
    pub signature: Option<String>,
    /// When the funds clear into the destination account, as sent
    pub clearing_date: Option<String>,
    pub status: SessionStatus,
    #[serde(rename = "error_description")]
    pub error_description: Option<String>,
}

impl RedirectPostback {
    /// Parses the query string appended to the merchant's redirect URL.
    ///
    /// Keys and enum values match case-insensitively. Unknown keys are
    /// ignored; empty values count as absent.
    pub fn from_query(query: &str) -> Result<Self, DomainError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut postback = Self::default();

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            match key.to_ascii_lowercase().as_str() {
                "checkoutid" => postback.checkout_id = Some(value.to_string()),
                "orderid" => postback.order_id = Some(value.to_string()),
                "test" => postback.test = parse_bool("test", value)?,
                "transaction" => postback.transaction = parse_transaction(value)?,
                "postback" => postback.postback = value.parse()?,
                "amount" => {
                    postback.amount = value
                        .parse::<Decimal>()
                        .map_err(|_| DomainError::invalid_field("amount", value))?
                }
                "signature" => postback.signature = Some(value.to_string()),
                "clearingdate" => postback.clearing_date = Some(value.to_string()),
                "status" => postback.status = value.parse()?,
                "error_description" => postback.error_description = Some(value.to_string()),
                _ => {}
            }
        }

        Ok(postback)
    }

    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }
}

fn parse_bool(field: &'static str, value: &str) -> Result<bool, DomainError> {
    match value.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(DomainError::invalid_field(field, value)),
    }
}

// The gateway sends the literal `null` in test mode.
fn parse_transaction(value: &str) -> Result<Option<i64>, DomainError> {
    if value.eq_ignore_ascii_case("null") {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| DomainError::invalid_field("transaction", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPLETED_QUERY: &str = "checkoutId=C3D4DC4F-5074-44CA-8639-B679D0A70803&orderId=order-17\
        &test=false&transaction=1312616&postback=success&amount=0.01\
        &signature=7e6b4bb1b84d8d0c2dd4a0bc5f4b3a1b2c3d4e5f&clearingDate=8%2F28%2F2012+3%3A17%3A18+PM\
        &status=Completed";

    #[test]
    fn test_default_is_failed() {
        let postback = RedirectPostback::default();
        assert_eq!(postback.status, SessionStatus::Failed);
        assert_eq!(postback.postback, PostbackStatus::Failure);
        assert!(!postback.test);
        assert!(postback.transaction.is_none());
        assert_eq!(postback.amount, Decimal::ZERO);
    }

    #[test]
    fn test_from_query_completed() {
        let postback = RedirectPostback::from_query(COMPLETED_QUERY).unwrap();
        assert_eq!(
            postback.checkout_id.as_deref(),
            Some("C3D4DC4F-5074-44CA-8639-B679D0A70803")
        );
        assert_eq!(postback.order_id.as_deref(), Some("order-17"));
        assert!(!postback.test);
        assert_eq!(postback.transaction, Some(1312616));
        assert_eq!(postback.postback, PostbackStatus::Success);
        assert_eq!(postback.amount, Decimal::new(1, 2));
        assert_eq!(postback.clearing_date.as_deref(), Some("8/28/2012 3:17:18 PM"));
        assert!(postback.is_completed());
        assert!(postback.error_description.is_none());
    }

    #[test]
    fn test_from_query_test_mode_null_transaction() {
        let postback =
            RedirectPostback::from_query("?checkoutId=abc&test=true&transaction=null&status=Completed")
                .unwrap();
        assert!(postback.test);
        assert!(postback.transaction.is_none());
    }

    #[test]
    fn test_from_query_is_case_insensitive() {
        let postback = RedirectPostback::from_query(
            "CHECKOUTID=abc&Postback=SUCCESS&STATUS=completed&Error_Description=none",
        )
        .unwrap();
        assert_eq!(postback.checkout_id.as_deref(), Some("abc"));
        assert_eq!(postback.postback, PostbackStatus::Success);
        assert_eq!(postback.status, SessionStatus::Completed);
        assert_eq!(postback.error_description.as_deref(), Some("none"));
    }

    #[test]
    fn test_from_query_failed_session() {
        let postback = RedirectPostback::from_query(
            "checkoutId=abc&status=Failed&error_description=User+cancelled",
        )
        .unwrap();
        assert!(!postback.is_completed());
        assert_eq!(postback.error_description.as_deref(), Some("User cancelled"));
    }

    #[test]
    fn test_from_query_rejects_bad_amount() {
        let result = RedirectPostback::from_query("checkoutId=abc&amount=ten");
        assert!(matches!(
            result,
            Err(DomainError::InvalidField { field: "amount", .. })
        ));
    }

    #[test]
    fn test_from_query_rejects_unknown_status() {
        let result = RedirectPostback::from_query("status=Pending");
        assert!(matches!(
            result,
            Err(DomainError::InvalidField { field: "status", .. })
        ));
    }

    #[test]
    fn test_json_wire_names() {
        let postback: RedirectPostback = serde_json::from_str(
            r#"{
                "checkoutId": "abc",
                "orderId": "order-1",
                "test": true,
                "transaction": null,
                "postback": "failure",
                "amount": "19.99",
                "signature": "deadbeef",
                "clearingDate": "8/28/2012 3:17:18 PM",
                "status": "Completed",
                "error_description": null
            }"#,
        )
        .unwrap();
        assert_eq!(postback.amount, Decimal::new(1999, 2));
        assert_eq!(postback.postback, PostbackStatus::Failure);
        assert!(postback.is_completed());

        let value = serde_json::to_value(&postback).unwrap();
        assert_eq!(value["checkoutId"], "abc");
        assert_eq!(value["postback"], "failure");
        assert_eq!(value["status"], "Completed");
        assert!(value.get("error_description").is_some());
    }
}
