//! # Errors
//!
//! ```text
//! QrParseError ─────┐
//!                   ├──► CoreError ──► ApiError (users-api)
//! ValidationError ──┘         ▲
//!       │                     └── ProductNotFound (catalog lookups)
//!       └──► FormReport, one per field (validation)
//! ```
//!
//! ## Recovery Policy
//! QR and validation failures never escape as faults: scan-to-add turns
//! them into `false`, and form validation turns them into one message per
//! field. The cart itself has no failure modes.

use std::fmt;

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Any failure shop-core can report.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Scan payload could not be turned into a product.
    #[error("Invalid QR code: {0}")]
    Qr(#[from] QrParseError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// QR Parse Error
// =============================================================================

/// Reasons a decoded QR payload is rejected.
///
/// ## Wire Format
/// ```text
/// <uuid>|<priceEuros>|<priceCents>|<productName>[|ignored...]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QrParseError {
    /// Fewer than the four mandatory fields.
    #[error("expected at least 4 '|'-separated fields, found {found}")]
    TooFewFields { found: usize },

    /// A price field is not an integer.
    #[error("{field} is not an integer: '{value}'")]
    InvalidNumber { field: String, value: String },

    /// Price does not fit in the money representation.
    #[error("price overflows: {euros} euros and {cents} cents")]
    PriceOverflow { euros: i64, cents: i64 },

    /// A text field holds the `|` separator and would not survive re-encoding.
    #[error("{field} cannot contain '|'")]
    ReservedSeparator { field: String },

    /// Computed price is below zero.
    #[error("price cannot be negative: {cents} cents")]
    NegativePrice { cents: i64 },
}

// =============================================================================
// Validation Error
// =============================================================================

/// What a length limit counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    Characters,
    Digits,
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthUnit::Characters => f.write_str("characters"),
            LengthUnit::Digits => f.write_str("digits"),
        }
    }
}

/// A rejected form field.
///
/// Each variant is scoped to one form field. A field validator reports at
/// most one of these; the `Display` output is the message shown under the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} cannot be empty")]
    Required { field: String },

    #[error("{field} must be at least {min} {unit} long")]
    TooShort {
        field: String,
        min: usize,
        unit: LengthUnit,
    },

    #[error("{field} must be at most {max} {unit} long")]
    TooLong {
        field: String,
        max: usize,
        unit: LengthUnit,
    },

    /// Invalid format (spaces in a username, email without '@', ...).
    #[error("{field} {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Two fields that must agree do not.
    #[error("{field} does not match")]
    Mismatch { field: String },

    /// Checksum over the value failed (Luhn for card numbers).
    #[error("{field} is not valid")]
    FailedChecksum { field: String },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    Negative { field: String },
}

impl ValidationError {
    /// Returns the field this error belongs to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::Mismatch { field }
            | ValidationError::FailedChecksum { field }
            | ValidationError::Negative { field } => field,
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qr_error_messages() {
        let err = QrParseError::TooFewFields { found: 3 };
        assert_eq!(
            err.to_string(),
            "expected at least 4 '|'-separated fields, found 3"
        );

        let err = QrParseError::InvalidNumber {
            field: "priceEuros".to_string(),
            value: "x".to_string(),
        };
        assert_eq!(err.to_string(), "priceEuros is not an integer: 'x'");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "Credit card number".to_string(),
        };
        assert_eq!(err.to_string(), "Credit card number cannot be empty");

        let err = ValidationError::TooShort {
            field: "Credit card number".to_string(),
            min: 13,
            unit: LengthUnit::Digits,
        };
        assert_eq!(
            err.to_string(),
            "Credit card number must be at least 13 digits long"
        );

        let err = ValidationError::InvalidFormat {
            field: "Username".to_string(),
            reason: "cannot contain spaces".to_string(),
        };
        assert_eq!(err.to_string(), "Username cannot contain spaces");
    }

    #[test]
    fn test_field_accessor() {
        let err = ValidationError::Mismatch {
            field: "Confirm password".to_string(),
        };
        assert_eq!(err.field(), "Confirm password");
    }

    #[test]
    fn test_conversions_to_core_error() {
        let core_err: CoreError = QrParseError::TooFewFields { found: 1 }.into();
        assert!(matches!(core_err, CoreError::Qr(_)));

        let core_err: CoreError = ValidationError::Required {
            field: "Name".to_string(),
        }
        .into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
