//! # Validation Module
//!
//! Input validation for order requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP (order-api)                                             │
//! │  └── Type validation (JSON deserialization)                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: OrderService                                                 │
//! │  └── THIS MODULE: shape of the request (lengths, ranges, duplicates)   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── CHECK constraints (price > 0, stock >= 0)                         │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use depot_core::validation::{validate_card_number, validate_quantity};
//!
//! assert!(validate_card_number("4111111111111111").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::{CreditCard, OrderItemRequest, OrderRequest, ShippingAddress};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const CARD_NUMBER_MIN: usize = 13;
const CARD_NUMBER_MAX: usize = 19;

// =============================================================================
// Request Validator
// =============================================================================

/// Validates a whole order request. First failing rule wins.
///
/// ## Order of Checks
/// 1. customer id
/// 2. shipping address fields
/// 3. credit card
/// 4. item lines
pub fn validate_order_request(request: &OrderRequest) -> ValidationResult<()> {
    validate_positive_id("customer_id", request.customer_id)?;
    validate_shipping_address(&request.shipping_address)?;
    validate_credit_card(&request.credit_card)?;
    validate_items(&request.items)?;
    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates that every address field is non-empty.
pub fn validate_shipping_address(address: &ShippingAddress) -> ValidationResult<()> {
    let fields = [
        ("shipping_address.street", &address.street),
        ("shipping_address.city", &address.city),
        ("shipping_address.state", &address.state),
        ("shipping_address.zip", &address.zip),
        ("shipping_address.country", &address.country),
    ];

    for (field, value) in fields {
        if value.is_empty() {
            return Err(ValidationError::Required {
                field: field.to_string(),
            });
        }
    }

    Ok(())
}

/// Validates card number, expiry and cvv.
pub fn validate_credit_card(card: &CreditCard) -> ValidationResult<()> {
    validate_card_number(&card.number)?;
    validate_expiry(&card.expiry)?;
    validate_cvv(&card.cvv)?;
    Ok(())
}

/// Validates a card number.
///
/// ## Rules
/// - 13 to 19 characters
///
/// Separators and other characters are left for the payment processor to
/// judge.
pub fn validate_card_number(number: &str) -> ValidationResult<()> {
    if number.is_empty() {
        return Err(ValidationError::Required {
            field: "credit_card.number".to_string(),
        });
    }

    let len = number.chars().count();

    if len < CARD_NUMBER_MIN {
        return Err(ValidationError::TooShort {
            field: "credit_card.number".to_string(),
            min: CARD_NUMBER_MIN,
        });
    }

    if len > CARD_NUMBER_MAX {
        return Err(ValidationError::TooLong {
            field: "credit_card.number".to_string(),
            max: CARD_NUMBER_MAX,
        });
    }

    Ok(())
}

/// Validates a card expiry in `MM/YY` form.
///
/// Only the shape is checked. Whether the month is real or the card has
/// expired is the payment processor's call.
pub fn validate_expiry(expiry: &str) -> ValidationResult<()> {
    let invalid = || ValidationError::InvalidFormat {
        field: "credit_card.expiry".to_string(),
        reason: "must be MM/YY".to_string(),
    };

    let (month, year) = expiry.split_once('/').ok_or_else(invalid)?;

    let two_digits = |s: &str| s.len() == 2 && s.chars().all(|c| c.is_ascii_digit());
    if !two_digits(month) || !two_digits(year) {
        return Err(invalid());
    }

    Ok(())
}

/// Validates a card verification value (3 or 4 digits).
pub fn validate_cvv(cvv: &str) -> ValidationResult<()> {
    if cvv.len() < 3 {
        return Err(ValidationError::TooShort {
            field: "credit_card.cvv".to_string(),
            min: 3,
        });
    }

    if cvv.len() > 4 {
        return Err(ValidationError::TooLong {
            field: "credit_card.cvv".to_string(),
            max: 4,
        });
    }

    if !cvv.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "credit_card.cvv".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates that an entity id is positive.
pub fn validate_positive_id(field: &str, id: i64) -> ValidationResult<()> {
    if id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a line quantity. Any positive quantity is accepted; whether it
/// can be shipped is decided by warehouse selection.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates the item lines of a request.
///
/// ## Rules
/// - At least one line
/// - Every product id positive, every quantity valid
/// - No product id repeated; duplicates are a caller error and are not merged
pub fn validate_items(items: &[OrderItemRequest]) -> ValidationResult<()> {
    if items.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        validate_positive_id("product_id", item.product_id)?;
        validate_quantity(item.quantity)?;

        if !seen.insert(item.product_id) {
            return Err(ValidationError::Duplicate {
                field: "product_id".to_string(),
                value: item.product_id.to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> OrderRequest {
        OrderRequest {
            customer_id: 1,
            shipping_address: ShippingAddress {
                street: "500 Market St".to_string(),
                city: "San Francisco".to_string(),
                state: "CA".to_string(),
                zip: "94105".to_string(),
                country: "USA".to_string(),
            },
            credit_card: CreditCard {
                number: "4111111111111111".to_string(),
                expiry: "12/30".to_string(),
                cvv: "123".to_string(),
            },
            items: vec![OrderItemRequest {
                product_id: 1,
                quantity: 2,
            }],
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(validate_order_request(&request()).is_ok());
    }

    #[test]
    fn test_customer_id_must_be_positive() {
        let mut req = request();
        req.customer_id = 0;
        assert!(matches!(
            validate_order_request(&req),
            Err(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_empty_address_field() {
        let mut req = request();
        req.shipping_address.zip = String::new();
        assert_eq!(
            validate_order_request(&req),
            Err(ValidationError::Required {
                field: "shipping_address.zip".to_string()
            })
        );

        req.shipping_address.zip = " ".to_string();
        assert!(validate_order_request(&req).is_ok());
    }

    #[test]
    fn test_validate_card_number() {
        assert!(validate_card_number("4111111111111").is_ok());
        assert!(validate_card_number("4111111111111111111").is_ok());

        assert!(validate_card_number("").is_err());
        assert!(validate_card_number("411111111111").is_err());
        assert!(validate_card_number("41111111111111111111").is_err());

        // Length is the only rule; separators are counted as characters
        assert!(validate_card_number("4111-1111-1111-1").is_ok());
        assert!(validate_card_number("4111-1111-11").is_err());
    }

    #[test]
    fn test_validate_expiry() {
        assert!(validate_expiry("01/27").is_ok());
        assert!(validate_expiry("12/30").is_ok());

        assert!(validate_expiry("13/30").is_ok());
        assert!(validate_expiry("00/30").is_ok());

        assert!(validate_expiry("1/30").is_err());
        assert!(validate_expiry("ab/cd").is_err());
        assert!(validate_expiry("12-30").is_err());
        assert!(validate_expiry("12/2030").is_err());
    }

    #[test]
    fn test_validate_cvv() {
        assert!(validate_cvv("123").is_ok());
        assert!(validate_cvv("1234").is_ok());
        assert!(validate_cvv("12").is_err());
        assert!(validate_cvv("12345").is_err());
        assert!(validate_cvv("12a").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(1000).is_ok());
        assert!(validate_quantity(250_000).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_items_required() {
        assert_eq!(
            validate_items(&[]),
            Err(ValidationError::Required {
                field: "items".to_string()
            })
        );
    }

    #[test]
    fn test_duplicate_product_ids_rejected() {
        let items = [
            OrderItemRequest { product_id: 3, quantity: 1 },
            OrderItemRequest { product_id: 4, quantity: 1 },
            OrderItemRequest { product_id: 3, quantity: 2 },
        ];
        assert_eq!(
            validate_items(&items),
            Err(ValidationError::Duplicate {
                field: "product_id".to_string(),
                value: "3".to_string()
            })
        );
    }

    #[test]
    fn test_large_orders_pass_validation() {
        let mut req = request();
        req.items = (1..=150)
            .map(|id| OrderItemRequest { product_id: id, quantity: 1 })
            .collect();
        req.items[0].quantity = 5_000;
        assert!(validate_order_request(&req).is_ok());
    }
}
