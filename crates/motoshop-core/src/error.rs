//! # Error Types
//!
//! Validation error types for motoshop-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                         Error Types                              │
//! │                                                                  │
//! │  motoshop-core errors (this file)                                │
//! │  └── ValidationError  - Input validation failures                │
//! │                                                                  │
//! │  motoshop-db errors (separate crate)                             │
//! │  └── DbError          - Store failures + business rejections     │
//! │                                                                  │
//! │  Flow: ValidationError → DbError → caller-facing message         │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, limits)
//! 3. Errors are enum variants, never String

use thiserror::Error;

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before any statement touches the store.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("Field '{field}' is required")]
    Required { field: String },

    /// A field exceeds its maximum length.
    #[error("Field '{field}' exceeds maximum length of {max}")]
    TooLong { field: String, max: usize },

    /// A field has an invalid format.
    #[error("Field '{field}' is invalid: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A numeric field is outside its allowed range.
    #[error("Field '{field}' must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

impl ValidationError {
    /// Creates a Required error for the given field name.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}
