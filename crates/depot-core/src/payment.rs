//! # Payment Processing
//!
//! The charge step of the order flow.
//!
//! ## Stand-in Processor Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  charge(card_number, amount, description)                              │
//! │       │                                                                 │
//! │       ├── card missing or < 13 chars → "Invalid card number"           │
//! │       ├── amount <= 0               → "Invalid amount"                 │
//! │       ├── card starts with '0'      → "Card declined by issuer"        │
//! │       │                                                                 │
//! │       └── approved → payment_id "pay_" + 16 hex chars                  │
//! │                                                                         │
//! │  First failing check wins. No retries at this layer.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::money::Money;

const MIN_CARD_NUMBER_LEN: usize = 13;

/// Outcome of a charge attempt.
///
/// Exactly one of `payment_id` / `error_message` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResult {
    pub success: bool,
    pub payment_id: Option<String>,
    pub error_message: Option<String>,
}

impl PaymentResult {
    pub fn approved(payment_id: impl Into<String>) -> Self {
        PaymentResult {
            success: true,
            payment_id: Some(payment_id.into()),
            error_message: None,
        }
    }

    pub fn declined(reason: impl Into<String>) -> Self {
        PaymentResult {
            success: false,
            payment_id: None,
            error_message: Some(reason.into()),
        }
    }
}

/// Something that can charge a card.
///
/// A failed charge is a normal [`PaymentResult`], not an `Err`; the
/// orchestrator decides what a decline means for the order.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    async fn charge(&self, card_number: &str, amount: Money, description: &str) -> PaymentResult;
}

/// Deterministic stand-in for a card network.
///
/// Cards starting with `0` are declined, which gives tests a reliable
/// failure path.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockPaymentProcessor;

#[async_trait]
impl PaymentProcessor for MockPaymentProcessor {
    async fn charge(&self, card_number: &str, amount: Money, description: &str) -> PaymentResult {
        if card_number.len() < MIN_CARD_NUMBER_LEN {
            return PaymentResult::declined("Invalid card number");
        }

        if !amount.is_positive() {
            return PaymentResult::declined("Invalid amount");
        }

        if card_number.starts_with('0') {
            return PaymentResult::declined("Card declined by issuer");
        }

        let payment_id = new_payment_id();
        debug!(payment_id = %payment_id, amount = %amount, description, "Charge approved");
        PaymentResult::approved(payment_id)
    }
}

/// `pay_` followed by the first 16 hex digits of a fresh UUID v4.
fn new_payment_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("pay_{}", &hex[..16])
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const GOOD_CARD: &str = "4111111111111111";

    #[tokio::test]
    async fn test_approves_valid_charge() {
        let result = MockPaymentProcessor
            .charge(GOOD_CARD, Money::from_cents(1000), "test")
            .await;
        assert!(result.success);
        assert!(result.error_message.is_none());

        let id = result.payment_id.unwrap();
        assert!(id.starts_with("pay_"));
        assert_eq!(id.len(), 20);
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn test_declines_cards_starting_with_zero() {
        let result = MockPaymentProcessor
            .charge("0123456789012", Money::from_cents(1), "test")
            .await;
        assert_eq!(result, PaymentResult::declined("Card declined by issuer"));
    }

    #[tokio::test]
    async fn test_short_card_number() {
        let result = MockPaymentProcessor
            .charge("411111111111", Money::from_cents(1000), "test")
            .await;
        assert_eq!(result.error_message.as_deref(), Some("Invalid card number"));

        let result = MockPaymentProcessor
            .charge("", Money::from_cents(1000), "test")
            .await;
        assert_eq!(result.error_message.as_deref(), Some("Invalid card number"));
    }

    #[tokio::test]
    async fn test_non_positive_amount() {
        for cents in [0, -100] {
            let result = MockPaymentProcessor
                .charge(GOOD_CARD, Money::from_cents(cents), "test")
                .await;
            assert_eq!(result.error_message.as_deref(), Some("Invalid amount"));
        }
    }

    #[tokio::test]
    async fn test_check_order_first_failure_wins() {
        // Short AND zero-prefixed AND zero amount: card length is checked first
        let result = MockPaymentProcessor
            .charge("0123", Money::zero(), "test")
            .await;
        assert_eq!(result.error_message.as_deref(), Some("Invalid card number"));

        // Zero-prefixed with zero amount: amount is checked before the decline
        let result = MockPaymentProcessor
            .charge("0123456789012", Money::zero(), "test")
            .await;
        assert_eq!(result.error_message.as_deref(), Some("Invalid amount"));
    }

    #[tokio::test]
    async fn test_payment_ids_are_fresh() {
        let mut ids = HashSet::new();
        for _ in 0..200 {
            let result = MockPaymentProcessor
                .charge(GOOD_CARD, Money::from_cents(500), "test")
                .await;
            assert!(ids.insert(result.payment_id.unwrap()));
        }
    }
}
