//! # Validation Module
//!
//! Input validation for Stockroom.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Prompt (CLI)                                                 │
//! │  └── Re-asks until the input parses as an integer / decimal            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Business rules (required names, positive quantities, ...)         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Repository (stockroom-db)                                    │
//! │  └── Reference checks (supplier exists, product exists, stock level)   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 4: Database (SQLite)                                            │
//! │  └── NOT NULL / CHECK / FOREIGN KEY constraints                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::validation::{validate_stock_quantity, validate_threshold};
//!
//! assert!(validate_stock_quantity(5).is_ok());
//! assert!(validate_stock_quantity(0).is_err());
//! assert!(validate_threshold(0).is_ok());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{NewProduct, NewSupplier};
use crate::MAX_NAME_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required name and returns it trimmed.
///
/// ## Example
/// ```rust
/// use stockroom_core::validation::validate_name;
///
/// assert_eq!(validate_name("name", "  Acme  ").unwrap(), "Acme");
/// assert!(validate_name("name", "   ").is_err());
/// ```
pub fn validate_name(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(value.to_string())
}

/// Trims an optional text field; blank input becomes `None`.
pub fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates the quantity of a stock-in or stock-out.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_stock_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates the initial quantity of a new product.
///
/// ## Rules
/// - Must be zero or greater
pub fn validate_initial_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use stockroom_core::money::Money;
/// use stockroom_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_price(Money::from_cents(0)).is_ok());
/// assert!(validate_price(Money::from_cents(-100)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a low-stock threshold.
pub fn validate_threshold(threshold: i64) -> ValidationResult<()> {
    if threshold < 0 {
        return Err(ValidationError::Negative {
            field: "threshold".to_string(),
        });
    }

    Ok(())
}

/// Adds `qty` to `current`, failing instead of overflowing.
pub fn checked_stock_increase(current: i64, qty: i64) -> ValidationResult<i64> {
    current
        .checked_add(qty)
        .ok_or(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: i64::MAX,
        })
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates a new supplier and returns it normalized (trimmed, blank contact dropped).
pub fn validate_new_supplier(supplier: &NewSupplier) -> ValidationResult<NewSupplier> {
    Ok(NewSupplier {
        name: validate_name("name", &supplier.name)?,
        contact: normalize_optional(supplier.contact.as_deref()),
    })
}

/// Validates a new product and returns it normalized.
///
/// The supplier reference is only checked for existence by the repository.
pub fn validate_new_product(product: &NewProduct) -> ValidationResult<NewProduct> {
    let name = validate_name("name", &product.name)?;
    validate_initial_quantity(product.quantity)?;
    validate_price(product.price)?;

    Ok(NewProduct {
        name,
        category: normalize_optional(product.category.as_deref()),
        quantity: product.quantity,
        price: product.price,
        supplier_id: product.supplier_id,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("name", "Widget").unwrap(), "Widget");
        assert_eq!(validate_name("name", "  Widget ").unwrap(), "Widget");
        assert!(validate_name("name", "").is_err());
        assert!(validate_name("name", "   ").is_err());
        assert!(validate_name("name", &"A".repeat(MAX_NAME_LENGTH)).is_ok());
        assert!(matches!(
            validate_name("name", &"A".repeat(MAX_NAME_LENGTH + 1)),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_normalize_optional() {
        assert_eq!(normalize_optional(None), None);
        assert_eq!(normalize_optional(Some("")), None);
        assert_eq!(normalize_optional(Some("  ")), None);
        assert_eq!(normalize_optional(Some(" x ")), Some("x".to_string()));
    }

    #[test]
    fn test_validate_stock_quantity() {
        assert!(validate_stock_quantity(1).is_ok());
        assert!(validate_stock_quantity(1_000_000).is_ok());
        assert!(validate_stock_quantity(0).is_err());
        assert!(validate_stock_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_initial_quantity() {
        assert!(validate_initial_quantity(0).is_ok());
        assert!(validate_initial_quantity(10).is_ok());
        assert!(validate_initial_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_threshold() {
        assert!(validate_threshold(0).is_ok());
        assert!(validate_threshold(5).is_ok());
        assert!(validate_threshold(-1).is_err());
    }

    #[test]
    fn test_checked_stock_increase() {
        assert_eq!(checked_stock_increase(10, 5).unwrap(), 15);
        assert!(checked_stock_increase(i64::MAX, 1).is_err());
    }

    #[test]
    fn test_validate_new_supplier_normalizes() {
        let supplier = NewSupplier::new("  Acme ").with_contact("   ");
        let valid = validate_new_supplier(&supplier).unwrap();
        assert_eq!(valid.name, "Acme");
        assert_eq!(valid.contact, None);

        assert!(validate_new_supplier(&NewSupplier::new("")).is_err());
    }

    #[test]
    fn test_validate_new_product() {
        let product = NewProduct::new(" Bolt ", 0, Money::from_cents(0)).with_category("");
        let valid = validate_new_product(&product).unwrap();
        assert_eq!(valid.name, "Bolt");
        assert_eq!(valid.category, None);

        let negative_qty = NewProduct::new("Bolt", -1, Money::from_cents(10));
        assert!(validate_new_product(&negative_qty).is_err());

        let negative_price = NewProduct::new("Bolt", 1, Money::from_cents(-10));
        assert!(validate_new_product(&negative_price).is_err());
    }
}
