//! # Validation Module
//!
//! Input validation utilities for MotoShop.
//!
//! ## Validation Strategy
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                           │
//! │                                                                  │
//! │  Layer 1: Desktop shell forms                                    │
//! │  ├── Basic format checks (empty, length)                         │
//! │  └── Immediate user feedback                                     │
//! │           │                                                      │
//! │           ▼                                                      │
//! │  Layer 2: THIS MODULE, called by the repositories                │
//! │  └── Same rules re-checked before any statement runs             │
//! │           │                                                      │
//! │           ▼                                                      │
//! │  Layer 3: Database (SQLite)                                      │
//! │  ├── NOT NULL constraints                                        │
//! │  ├── UNIQUE constraints                                          │
//! │  └── Foreign key constraints                                     │
//! │                                                                  │
//! │  Defense in depth: multiple layers catch different errors        │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use motoshop_core::validation::{validate_part_code, validate_quantity};
//!
//! // Validate part code before database insert
//! validate_part_code("BRK-PAD-01").unwrap();
//!
//! // Validate quantity before a stock movement
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a person or entity name.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 120 characters
///
/// ## Example
/// ```rust
/// use motoshop_core::validation::validate_name;
///
/// assert!(validate_name("Maria Souza").is_ok());
/// assert!(validate_name("").is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 120 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 120,
        });
    }

    Ok(())
}

/// Validates a part code.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 50 characters
/// - Should contain only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use motoshop_core::validation::validate_part_code;
///
/// assert!(validate_part_code("BRK-PAD-01").is_ok());
/// assert!(validate_part_code("").is_err());
/// ```
pub fn validate_part_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: 50,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a phone number.
///
/// ## Rules
/// - Exactly 11 digits (two-digit area code + nine-digit number)
///
/// ## Example
/// ```rust
/// use motoshop_core::validation::validate_phone;
///
/// assert!(validate_phone("11999999999").is_ok());
/// assert!(validate_phone("999999").is_err());
/// assert!(validate_phone("11-99999-999").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.len() != 11 || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain exactly 11 digits".to_string(),
        });
    }

    Ok(())
}

/// Validates a national tax id (CPF).
///
/// ## Rules
/// - Exactly 11 digits, punctuation not accepted
///
/// Check-digit verification is left to the shell; the data layer only
/// guarantees shape.
pub fn validate_tax_id(tax_id: &str) -> ValidationResult<()> {
    let tax_id = tax_id.trim();

    if tax_id.len() != 11 || !tax_id.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "tax_id".to_string(),
            reason: "must contain exactly 11 digits".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a part quantity for an order line or sale item.
///
/// ## Rules
/// - Must be at least 1
/// - Must not exceed MAX_LINE_QUANTITY (999)
///
/// ## Example
/// ```rust
/// use motoshop_core::validation::validate_quantity;
///
/// assert!(validate_quantity(5).is_ok());
/// assert!(validate_quantity(0).is_err());
/// assert!(validate_quantity(1000).is_err());
/// ```
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 1 || quantity > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price or fee amount in cents.
///
/// ## Rules
/// - Must not be negative
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price_cents".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Rules
/// - Must be a valid UUID format
/// - 36 characters with hyphens: xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx
///
/// ## Example
/// ```rust
/// use motoshop_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Maria Souza").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"A".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_part_code() {
        assert!(validate_part_code("BRK-PAD-01").is_ok());
        assert!(validate_part_code("OIL10W40").is_ok());
        assert!(validate_part_code("chain_520").is_ok());

        assert!(validate_part_code("").is_err());
        assert!(validate_part_code("has space").is_err());
        assert!(validate_part_code(&"A".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("11999999999").is_ok());

        assert!(validate_phone("").is_err());
        assert!(validate_phone("1199999999").is_err());
        assert!(validate_phone("119999999990").is_err());
        assert!(validate_phone("11-99999-99").is_err());
    }

    #[test]
    fn test_validate_tax_id() {
        assert!(validate_tax_id("52998224725").is_ok());

        assert!(validate_tax_id("").is_err());
        assert!(validate_tax_id("529.982.247-25").is_err());
        assert!(validate_tax_id("5299822472").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
    }
}
