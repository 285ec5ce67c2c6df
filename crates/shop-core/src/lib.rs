//! # shop-core: Pure Business Logic for Shop Pay
//!
//! This crate is the **heart** of the supermarket app. It holds the shopping
//! cart, the QR ingestion pipeline and the card checks used at registration,
//! all as pure code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shop Pay Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    App screens (external)                       │   │
//! │  │    Login ──► Register ──► Products ──► Cart ──► Scan QR         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shop-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │ catalog  │ │   cart   │ │    qr    │ │ card, validation │  │   │
//! │  │   │ Product  │ │   Cart   │ │QrPayload │ │ Luhn, form rules │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          shop-client (HTTP)  /  users-api (REST server)         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product and the registration DTOs
//! - [`money`] - Money type with integer arithmetic (euro cents)
//! - [`catalog`] - The fixed, read-only product catalog
//! - [`cart`] - The shopping cart and its derived totals
//! - [`qr`] - QR payload parsing and scan-to-add
//! - [`card`] - Card number formatting and Luhn checks
//! - [`validation`] - Registration form field rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use shop_core::{Cart, Catalog};
//!
//! let catalog = Catalog::standard();
//! let mut cart = Cart::new();
//!
//! cart.add_item(catalog.get(1).unwrap().clone());
//! assert!(cart.add_product_from_qr_code("abc-123|3|50|Organic Apple"));
//!
//! assert_eq!(cart.item_count(), 2);
//! assert_eq!(cart.total_price().cents(), 399 + 350);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod card;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod qr;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use card::CardNumber;
pub use cart::{Cart, CartEntry, CartTotals};
pub use catalog::Catalog;
pub use error::{CoreError, QrParseError, ValidationError};
pub use money::Money;
pub use qr::QrPayload;
pub use types::*;
pub use validation::{FormReport, RegistrationForm};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Category assigned to every product that entered the cart through a QR scan.
pub const SCANNED_CATEGORY: &str = "Scanned Products";

/// Shortest card number accepted at registration.
pub const MIN_CARD_DIGITS: usize = 13;

/// Longest card number accepted at registration.
///
/// Keystrokes that would push the field past this many digits are ignored.
pub const MAX_CARD_DIGITS: usize = 19;
