//! # Domain Types
//!
//! Core domain types shared by the app, the client and the server.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐        ┌──────────────────────────────┐       │
//! │  │      Product        │        │    RegistrationRequest       │       │
//! │  │  ─────────────────  │        │  ──────────────────────────  │       │
//! │  │  id (i64)           │        │  name, username, email       │       │
//! │  │  name, description  │        │  password                    │       │
//! │  │  price (Money)      │        │  credit_card (digits only)   │       │
//! │  │  category           │        │  rsa/ec public keys (opt.)   │       │
//! │  │  image_url? qr_code?│        └──────────────────────────────┘       │
//! │  └─────────────────────┘        ┌──────────────────────────────┐       │
//! │                                 │  UserSummary {Id, Name}      │       │
//! │                                 └──────────────────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Product Identity
//! Catalog products carry small sequential ids. Scanned products take their
//! id from a hash of the QR uuid (see [`crate::qr`]).

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;

/// Identifier of a product, unique within a catalog.
pub type ProductId = i64;

// =============================================================================
// Product
// =============================================================================

/// A purchasable item.
///
/// Immutable once constructed: fields are private and there are no setters.
/// Deserializing goes through [`Product::new`], so a negative price is
/// rejected there too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ProductRecord")]
pub struct Product {
    pub(crate) id: ProductId,
    pub(crate) name: String,
    pub(crate) price: Money,
    pub(crate) description: String,
    pub(crate) category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) image_url: Option<String>,
    /// UUID of the QR code this product was scanned from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) qr_code: Option<String>,
}

impl Product {
    /// Creates a product.
    ///
    /// ## Errors
    /// `ValidationError::Negative` when `price` is below zero.
    ///
    /// ## Example
    /// ```rust
    /// use shop_core::{Money, Product};
    ///
    /// let milk = Product::new(3, "Whole Milk", Money::from_cents(429), "Fresh whole milk", "Dairy")
    ///     .unwrap();
    /// assert_eq!(milk.price().to_string(), "€4.29");
    ///
    /// assert!(Product::new(9, "Bad", Money::from_cents(-1), "", "").is_err());
    /// ```
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Money,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if price.is_negative() {
            return Err(ValidationError::Negative {
                field: "Price".to_string(),
            });
        }

        Ok(Product {
            id,
            name: name.into(),
            price,
            description: description.into(),
            category: category.into(),
            image_url: None,
            qr_code: None,
        })
    }

    /// Attaches an image URL.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Attaches the QR uuid the product was scanned from.
    pub fn with_qr_code(mut self, uuid: impl Into<String>) -> Self {
        self.qr_code = Some(uuid.into());
        self
    }

    #[inline]
    pub fn id(&self) -> ProductId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[inline]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    #[inline]
    pub fn qr_code(&self) -> Option<&str> {
        self.qr_code.as_deref()
    }

    /// Case-insensitive match against name, description and category.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
            || self.category.to_lowercase().contains(&query)
    }
}

/// Wire shape of a product before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductRecord {
    id: ProductId,
    name: String,
    price: Money,
    description: String,
    category: String,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    qr_code: Option<String>,
}

impl TryFrom<ProductRecord> for Product {
    type Error = ValidationError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let mut product = Product::new(
            record.id,
            record.name,
            record.price,
            record.description,
            record.category,
        )?;
        product.image_url = record.image_url;
        product.qr_code = record.qr_code;
        Ok(product)
    }
}

// =============================================================================
// Registration
// =============================================================================

/// Body of a registration call.
///
/// Field names are snake_case on the wire, matching what the app posts.
/// `credit_card` is always a Luhn-valid digit string when built through
/// [`crate::RegistrationForm::into_request`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub credit_card: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsa_public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ec_public_key: Option<String>,
}

/// Successful registration answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationResponse {
    pub user_id: String,
    pub supermarket_public_key: String,
}

// =============================================================================
// Users
// =============================================================================

/// Identifier of a user row on the server.
pub type UserId = i64;

/// A user as the `/users` endpoints expose it.
///
/// The wire names are capitalized (`{"Id": 1, "Name": "Alice"}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(rename = "Id")]
    pub id: UserId,
    #[serde(rename = "Name")]
    pub name: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn apples() -> Product {
        Product::new(
            1,
            "Fresh Apples",
            Money::from_cents(399),
            "Red delicious apples, fresh from the orchard",
            "Fruits",
        )
        .unwrap()
    }

    #[test]
    fn test_product_accessors() {
        let product = apples().with_image_url("https://img.example/apples.png");

        assert_eq!(product.id(), 1);
        assert_eq!(product.name(), "Fresh Apples");
        assert_eq!(product.price().cents(), 399);
        assert_eq!(product.category(), "Fruits");
        assert_eq!(product.image_url(), Some("https://img.example/apples.png"));
        assert_eq!(product.qr_code(), None);
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = Product::new(2, "Refund", Money::from_cents(-100), "", "").unwrap_err();
        assert_eq!(err.to_string(), "Price cannot be negative");
    }

    #[test]
    fn test_deserialize_validates_price() {
        let json = r#"{"id":1,"name":"Refund","price":-500,"description":"","category":"Promo"}"#;
        let err = serde_json::from_str::<Product>(json).unwrap_err();
        assert!(err.to_string().contains("Price cannot be negative"));
    }

    #[test]
    fn test_deserialize_keeps_optional_fields() {
        let product = apples()
            .with_image_url("https://img.example/apples.png")
            .with_qr_code("abc-123");

        let json = serde_json::to_string(&product).unwrap();
        let back: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(back, product);
    }

    #[test]
    fn test_free_product_allowed() {
        assert!(Product::new(3, "Sample", Money::zero(), "", "Promo").is_ok());
    }

    #[test]
    fn test_matches_ignores_case() {
        let product = apples();
        assert!(product.matches("APPLE"));
        assert!(product.matches("orchard"));
        assert!(product.matches("fruit"));
        assert!(!product.matches("milk"));
    }

    #[test]
    fn test_product_json_shape() {
        let json = serde_json::to_value(apples().with_qr_code("abc-123")).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["price"], 399);
        assert_eq!(json["qrCode"], "abc-123");
        assert!(json.get("imageUrl").is_none());
    }

    #[test]
    fn test_user_summary_wire_names() {
        let user: UserSummary = serde_json::from_str(r#"{"Id": 7, "Name": "Alice"}"#).unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.name, "Alice");

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, serde_json::json!({"Id": 7, "Name": "Alice"}));
    }

    #[test]
    fn test_registration_request_omits_missing_keys() {
        let request = RegistrationRequest {
            name: "Ana".to_string(),
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "Secret1".to_string(),
            credit_card: "4532015112830366".to_string(),
            rsa_public_key: None,
            ec_public_key: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["credit_card"], "4532015112830366");
        assert!(json.get("rsa_public_key").is_none());
    }
}
