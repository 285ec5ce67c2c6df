//! # QR Ingestion
//!
//! Turns the decoded text of a product QR code into a cart entry.
//!
//! ## Payload Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  <uuid> | <priceEuros> | <priceCents> | <productName> [| ignored ...]   │
//! │                                                                         │
//! │  "abc-123|3|50|Organic Apple"                                           │
//! │       │     │  │       │                                                │
//! │       │     │  │       └──► name, description "Scanned product: ..."    │
//! │       │     └──┴──────────► price = 3 * 100 + 50 = 350 cents            │
//! │       └───────────────────► id = hash(uuid), qr_code = uuid             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Camera decoding is not part of this module; it only needs the decoded
//! text, so the whole pipeline runs without hardware.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::cart::Cart;
use crate::error::QrParseError;
use crate::money::Money;
use crate::types::{Product, ProductId};
use crate::SCANNED_CATEGORY;

const SEPARATOR: char = '|';

/// Names used by [`QrPayload::simulated`].
const SIMULATED_NAMES: [&str; 9] = [
    "Organic Apple",
    "Premium Banana",
    "Fresh Orange",
    "Specialty Coffee",
    "Artisan Bread",
    "Imported Cheese",
    "Grass-fed Beef",
    "Free-range Chicken",
    "Wild Salmon",
];

// =============================================================================
// Payload
// =============================================================================

/// A parsed QR payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrPayload {
    uuid: String,
    price_euros: i64,
    price_cents: i64,
    name: String,
    price: Money,
}

impl QrPayload {
    /// Builds a payload from its parts, checking the resulting price.
    pub fn new(
        uuid: impl Into<String>,
        price_euros: i64,
        price_cents: i64,
        name: impl Into<String>,
    ) -> Result<Self, QrParseError> {
        let uuid = uuid.into();
        let name = name.into();
        for (field, value) in [("uuid", &uuid), ("productName", &name)] {
            if value.contains(SEPARATOR) {
                return Err(QrParseError::ReservedSeparator {
                    field: field.to_string(),
                });
            }
        }

        let cents = price_euros
            .checked_mul(100)
            .and_then(|c| c.checked_add(price_cents))
            .ok_or(QrParseError::PriceOverflow {
                euros: price_euros,
                cents: price_cents,
            })?;

        if cents < 0 {
            return Err(QrParseError::NegativePrice { cents });
        }

        Ok(QrPayload {
            uuid,
            price_euros,
            price_cents,
            name,
            price: Money::from_cents(cents),
        })
    }

    /// A random payload, as a stand-in for pointing the camera at a label.
    ///
    /// Price and name are drawn from the uuid's random bytes: 1-19 euros,
    /// 0-98 cents, one of nine product names.
    pub fn simulated() -> Self {
        let uuid = Uuid::new_v4();
        let bytes = uuid.as_bytes();

        let price_euros = 1 + i64::from(bytes[0] % 19);
        let price_cents = i64::from(bytes[1] % 99);
        let name = SIMULATED_NAMES[usize::from(bytes[2]) % SIMULATED_NAMES.len()];

        QrPayload {
            uuid: uuid.to_string(),
            price_euros,
            price_cents,
            name: name.to_string(),
            price: Money::from_cents(price_euros * 100 + price_cents),
        }
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    /// Synthetic product id derived from the uuid.
    pub fn product_id(&self) -> ProductId {
        ProductId::from(string_hash(&self.uuid))
    }

    /// Builds the product this payload describes.
    pub fn into_product(self) -> Product {
        let id = self.product_id();
        Product {
            id,
            description: format!("Scanned product: {}", self.name),
            name: self.name,
            price: self.price,
            category: SCANNED_CATEGORY.to_string(),
            image_url: None,
            qr_code: Some(self.uuid),
        }
    }
}

impl FromStr for QrPayload {
    type Err = QrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(SEPARATOR).collect();
        if fields.len() < 4 {
            return Err(QrParseError::TooFewFields {
                found: fields.len(),
            });
        }

        let price_euros = parse_int("priceEuros", fields[1])?;
        let price_cents = parse_int("priceCents", fields[2])?;

        QrPayload::new(fields[0], price_euros, price_cents, fields[3])
    }
}

/// Re-encodes the four mandatory fields.
impl fmt::Display for QrPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}",
            self.uuid, self.price_euros, self.price_cents, self.name
        )
    }
}

fn parse_int(field: &str, value: &str) -> Result<i64, QrParseError> {
    value.parse().map_err(|_| QrParseError::InvalidNumber {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// 32-bit polynomial string hash (`h = 31 * h + unit` over UTF-16 units).
///
/// Same values as the JVM's `String.hashCode`, so ids line up with those the
/// Android client produces. Collisions are possible and accepted.
pub fn string_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

// =============================================================================
// Scan-to-Add
// =============================================================================

impl Cart {
    /// Parses `payload` and adds the scanned product.
    ///
    /// Returns the product id on success. On failure the cart is untouched.
    pub fn add_scanned(&mut self, payload: &str) -> Result<ProductId, QrParseError> {
        let product = payload.parse::<QrPayload>()?.into_product();
        let id = product.id();
        self.add_item(product);
        Ok(id)
    }

    /// Scan-to-add for the UI: `true` when a product was added.
    ///
    /// Every parse failure becomes `false`; nothing propagates.
    pub fn add_product_from_qr_code(&mut self, payload: &str) -> bool {
        self.add_scanned(payload).is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
