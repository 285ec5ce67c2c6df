//! # Registration Form Validation
//!
//! Field rules for the sign-up form.
//!
//! ## Field Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Field              Checks (in order, first failure wins)               │
//! │  ─────              ─────────────────────────────────────               │
//! │  Name               non-blank, >= 2 chars                               │
//! │  Username           non-blank, >= 3 chars, no spaces                    │
//! │  Email              non-blank, contains '@' and '.'                     │
//! │  Password           non-blank, >= 6 chars, a digit, an uppercase letter │
//! │  Confirm password   non-blank, equals Password                          │
//! │  Credit card        see crate::card                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every field is checked on submit, so the form can show all messages at
//! once. The server runs the same rules again on the request it receives.

use serde::{Deserialize, Serialize};

use crate::card::{self, CardNumber};
use crate::error::{LengthUnit, ValidationError};
use crate::types::RegistrationRequest;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MIN_NAME_CHARS: usize = 2;
const MIN_USERNAME_CHARS: usize = 3;
const MIN_PASSWORD_CHARS: usize = 6;

// =============================================================================
// Field Validators
// =============================================================================

fn require(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn min_chars(field: &str, value: &str, min: usize) -> ValidationResult<()> {
    if value.chars().count() < min {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min,
            unit: LengthUnit::Characters,
        });
    }
    Ok(())
}

fn invalid(field: &str, reason: &str) -> ValidationError {
    ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

pub fn validate_name(name: &str) -> ValidationResult<()> {
    require("Name", name)?;
    min_chars("Name", name, MIN_NAME_CHARS)
}

pub fn validate_username(username: &str) -> ValidationResult<()> {
    require("Username", username)?;
    min_chars("Username", username, MIN_USERNAME_CHARS)?;
    if username.contains(' ') {
        return Err(invalid("Username", "cannot contain spaces"));
    }
    Ok(())
}

/// Deliberately loose: only '@' and '.' are required.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    require("Email", email)?;
    if !email.contains('@') || !email.contains('.') {
        return Err(invalid("Email", "must be a valid email address"));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> ValidationResult<()> {
    require("Password", password)?;
    min_chars("Password", password, MIN_PASSWORD_CHARS)?;
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(invalid("Password", "must contain at least one digit"));
    }
    if !password.chars().any(char::is_uppercase) {
        return Err(invalid("Password", "must contain at least one uppercase letter"));
    }
    Ok(())
}

pub fn validate_confirm_password(password: &str, confirm: &str) -> ValidationResult<()> {
    require("Confirm password", confirm)?;
    if password != confirm {
        return Err(ValidationError::Mismatch {
            field: "Confirm password".to_string(),
        });
    }
    Ok(())
}

pub fn validate_credit_card(raw: &str) -> ValidationResult<()> {
    card::validate_card_number(raw)
}

/// Re-checks a request that arrived over the wire.
///
/// There is no confirm-password field at this point. Returns the first
/// failure in field order.
pub fn validate_request(request: &RegistrationRequest) -> ValidationResult<()> {
    validate_name(&request.name)?;
    validate_username(&request.username)?;
    validate_email(&request.email)?;
    validate_password(&request.password)?;
    validate_credit_card(&request.credit_card)
}

// =============================================================================
// Registration Form
// =============================================================================

/// Raw contents of the sign-up form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    /// As typed, spaces included.
    pub credit_card: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsa_public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ec_public_key: Option<String>,
}

impl RegistrationForm {
    /// Runs every field validator.
    ///
    /// ## Example
    /// ```rust
    /// use shop_core::RegistrationForm;
    ///
    /// let form = RegistrationForm {
    ///     name: "Ana Silva".into(),
    ///     username: "ana".into(),
    ///     email: "ana@example.com".into(),
    ///     password: "Secret1".into(),
    ///     confirm_password: "Secret1".into(),
    ///     credit_card: "4532 0151 1283 0366".into(),
    ///     ..Default::default()
    /// };
    /// assert!(form.validate().is_valid());
    /// ```
    pub fn validate(&self) -> FormReport {
        FormReport {
            name: validate_name(&self.name).err(),
            username: validate_username(&self.username).err(),
            email: validate_email(&self.email).err(),
            password: validate_password(&self.password).err(),
            confirm_password: validate_confirm_password(&self.password, &self.confirm_password)
                .err(),
            credit_card: validate_credit_card(&self.credit_card).err(),
        }
    }

    /// Validates and builds the request body.
    ///
    /// The card travels as its digit string; the confirm field is dropped.
    pub fn into_request(self) -> Result<RegistrationRequest, FormReport> {
        let report = self.validate();
        if !report.is_valid() {
            return Err(report);
        }

        let card = CardNumber::parse(&self.credit_card).map_err(|_| report)?;

        Ok(RegistrationRequest {
            name: self.name,
            username: self.username,
            email: self.email,
            password: self.password,
            credit_card: card.into_digits(),
            rsa_public_key: self.rsa_public_key,
            ec_public_key: self.ec_public_key,
        })
    }
}

/// Per-field outcome of [`RegistrationForm::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormReport {
    pub name: Option<ValidationError>,
    pub username: Option<ValidationError>,
    pub email: Option<ValidationError>,
    pub password: Option<ValidationError>,
    pub confirm_password: Option<ValidationError>,
    pub credit_card: Option<ValidationError>,
}

impl FormReport {
    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// Failing fields in form order.
    pub fn errors(&self) -> Vec<&ValidationError> {
        [
            &self.name,
            &self.username,
            &self.email,
            &self.password,
            &self.confirm_password,
            &self.credit_card,
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
