//! # Card Numbers
//!
//! Formatting and Luhn validation for the card entered at registration.
//!
//! ## Field Validation Chain
//! ```text
//! raw input "4532 0151-1283 0366"
//!      │
//!      ▼
//! digits_only ──► "4532015112830366"
//!      │
//!      ├── empty?            → Required        "Credit card number cannot be empty"
//!      ├── < 13 digits?      → TooShort
//!      ├── > 19 digits?      → TooLong
//!      ├── Luhn sum % 10 ≠ 0 → FailedChecksum  "Credit card number is not valid"
//!      │
//!      ▼
//! CardNumber("4532015112830366")   (first failing check wins)
//! ```
//!
//! Only ASCII digits count as digits; everything else is stripped.

use std::fmt;

use crate::error::{LengthUnit, ValidationError};
use crate::validation::ValidationResult;
use crate::{MAX_CARD_DIGITS, MIN_CARD_DIGITS};

const FIELD: &str = "Credit card number";

/// Strips everything that is not an ASCII digit.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Strips non-digits, then puts a single space after every 4th digit.
///
/// ## Example
/// ```rust
/// use shop_core::card::format_with_spaces;
///
/// assert_eq!(format_with_spaces("4532015112830366"), "4532 0151 1283 0366");
/// assert_eq!(format_with_spaces("4532 0151 1283 0366"), "4532 0151 1283 0366");
/// assert_eq!(format_with_spaces("45320"), "4532 0");
/// ```
pub fn format_with_spaces(raw: &str) -> String {
    group_by_four(raw.chars().filter(char::is_ascii_digit))
}

fn group_by_four(chars: impl Iterator<Item = char>) -> String {
    let mut formatted = String::new();
    for (index, c) in chars.enumerate() {
        if index > 0 && index % 4 == 0 {
            formatted.push(' ');
        }
        formatted.push(c);
    }
    formatted
}

/// Luhn checksum over a digit string.
///
/// ## Algorithm
/// Walking from the rightmost digit, every second digit is doubled, and 9
/// is subtracted when the double exceeds 9. The number is valid when the
/// sum of all digits is a multiple of 10.
///
/// Returns `false` for fewer than 13 digits or for any non-digit character.
///
/// ## Example
/// ```rust
/// use shop_core::card::is_luhn_valid;
///
/// assert!(is_luhn_valid("4532015112830366"));
/// assert!(!is_luhn_valid("4532015112830367"));
/// assert!(!is_luhn_valid("0000000000"));
/// ```
pub fn is_luhn_valid(digits: &str) -> bool {
    if digits.len() < MIN_CARD_DIGITS {
        return false;
    }

    let mut sum = 0u32;
    for (index, c) in digits.chars().rev().enumerate() {
        let Some(digit) = c.to_digit(10) else {
            return false;
        };

        sum += if index % 2 == 1 {
            let doubled = digit * 2;
            if doubled > 9 {
                doubled - 9
            } else {
                doubled
            }
        } else {
            digit
        };
    }

    sum % 10 == 0
}

/// Applies one edit of the card field.
///
/// Input that would hold more than 19 digits is ignored and `current` is
/// kept; otherwise the new value is `raw`, reformatted.
pub fn apply_keystroke(current: &str, raw: &str) -> String {
    let digit_count = raw.chars().filter(char::is_ascii_digit).count();
    if digit_count > MAX_CARD_DIGITS {
        return current.to_string();
    }

    format_with_spaces(raw)
}

/// Runs the card field's validation chain on raw input.
pub fn validate_card_number(raw: &str) -> ValidationResult<()> {
    CardNumber::parse(raw).map(|_| ())
}

// =============================================================================
// Card Number
// =============================================================================

/// A card number that passed the full validation chain.
///
/// Holds digits only. This is what gets handed to the registration service.
#[derive(Clone, PartialEq, Eq)]
pub struct CardNumber(String);

impl CardNumber {
    /// Validates raw input (spaces and separators allowed).
    ///
    /// ## Example
    /// ```rust
    /// use shop_core::CardNumber;
    ///
    /// let card = CardNumber::parse("4532 0151 1283 0366").unwrap();
    /// assert_eq!(card.digits(), "4532015112830366");
    /// assert_eq!(card.last4(), "0366");
    ///
    /// assert!(CardNumber::parse("").is_err());
    /// ```
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        let digits = digits_only(raw);

        if digits.is_empty() {
            return Err(ValidationError::Required {
                field: FIELD.to_string(),
            });
        }

        if digits.len() < MIN_CARD_DIGITS {
            return Err(ValidationError::TooShort {
                field: FIELD.to_string(),
                min: MIN_CARD_DIGITS,
                unit: LengthUnit::Digits,
            });
        }

        if digits.len() > MAX_CARD_DIGITS {
            return Err(ValidationError::TooLong {
                field: FIELD.to_string(),
                max: MAX_CARD_DIGITS,
                unit: LengthUnit::Digits,
            });
        }

        if !is_luhn_valid(&digits) {
            return Err(ValidationError::FailedChecksum {
                field: FIELD.to_string(),
            });
        }

        Ok(CardNumber(digits))
    }

    pub fn digits(&self) -> &str {
        &self.0
    }

    pub fn into_digits(self) -> String {
        self.0
    }

    pub fn last4(&self) -> &str {
        &self.0[self.0.len() - 4..]
    }

    /// Digits grouped by four, as shown in the input field.
    pub fn formatted(&self) -> String {
        format_with_spaces(&self.0)
    }

    /// All but the last four digits replaced by `*`, grouped by four.
    pub fn masked(&self) -> String {
        let visible_from = self.0.len() - 4;
        group_by_four(
            self.0
                .chars()
                .enumerate()
                .map(|(i, c)| if i < visible_from { '*' } else { c }),
        )
    }
}

/// Debug output never shows the full number.
impl fmt::Debug for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CardNumber").field(&self.masked()).finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_with_spaces() {
        assert_eq!(format_with_spaces("4532015112830366"), "4532 0151 1283 0366");
        assert_eq!(format_with_spaces("4532-0151"), "4532 0151");
        assert_eq!(format_with_spaces("abc"), "");
        assert_eq!(format_with_spaces(""), "");
        assert_eq!(
            format_with_spaces("4532015112830366123"),
            "4532 0151 1283 0366 123"
        );
    }

    #[test]
    fn test_format_is_idempotent() {
        for raw in ["4", "45320", "4532015112830366", "12 34 5678-9012 3456789", "x1y2"] {
            let once = format_with_spaces(raw);
            let stripped: String = once.chars().filter(|c| *c != ' ').collect();
            assert_eq!(format_with_spaces(&stripped), once);
            assert_eq!(format_with_spaces(&once), once);
        }
    }

    #[test]
    fn test_luhn() {
        assert!(is_luhn_valid("4532015112830366"));
        assert!(!is_luhn_valid("4532015112830367"));
        assert!(is_luhn_valid("4111111111111111"));
        assert!(is_luhn_valid("378282246310005"));
    }

    #[test]
    fn test_luhn_rejects_short_and_non_digit_input() {
        assert!(!is_luhn_valid(""));
        assert!(!is_luhn_valid("000000000000"));
        assert!(!is_luhn_valid("4532 0151 1283 0366"));
    }

    #[test]
    fn test_apply_keystroke_caps_digits() {
        let full = "4532 0151 1283 0366 123";
        assert_eq!(apply_keystroke("", "45320"), "4532 0");
        assert_eq!(apply_keystroke(full, "4532 0151 1283 0366 1234"), full);
        assert_eq!(apply_keystroke(full, "4532 0151 1283 0366 12"), "4532 0151 1283 0366 12");
    }

    #[test]
    fn test_validation_chain_order() {
        let field_error = |raw: &str| CardNumber::parse(raw).unwrap_err();

        assert!(matches!(field_error(""), ValidationError::Required { .. }));
        assert!(matches!(field_error("  - "), ValidationError::Required { .. }));
        assert!(matches!(
            field_error("453201511283"),
            ValidationError::TooShort { min: 13, .. }
        ));
        assert!(matches!(
            field_error("45320151128303661234"),
            ValidationError::TooLong { max: 19, .. }
        ));
        assert!(matches!(
            field_error("4532015112830367"),
            ValidationError::FailedChecksum { .. }
        ));
        assert!(validate_card_number("4532 0151 1283 0366").is_ok());
    }

    #[test]
    fn test_card_number_views() {
        let card = CardNumber::parse("4532-0151-1283-0366").unwrap();

        assert_eq!(card.last4(), "0366");
        assert_eq!(card.formatted(), "4532 0151 1283 0366");
        assert_eq!(card.masked(), "**** **** **** 0366");
        assert_eq!(format!("{:?}", card), "CardNumber(\"**** **** **** 0366\")");
        assert_eq!(card.into_digits(), "4532015112830366");
    }
}
