//! # Cart
//!
//! The in-memory shopping cart.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  User Action              Cart Method               Entry Change        │
//! │  ───────────              ───────────               ────────────        │
//! │                                                                         │
//! │  Tap "Add" ──────────────► add_item() ────────────► qty + 1 or push    │
//! │                                                                         │
//! │  Scan QR ────────────────► add_product_from_qr_code() ► add_item()     │
//! │                                                                         │
//! │  Change Quantity ────────► update_quantity() ─────► qty = n (n <= 0    │
//! │                                                      removes)           │
//! │  Tap Remove ─────────────► remove_item() ─────────► entry dropped      │
//! │                                                                         │
//! │  Checkout / Clear ───────► clear() ───────────────► no entries         │
//! │                                                                         │
//! │  Badge / Totals ─────────► item_count(), total_price() (always fresh)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one entry per product id
//! - Every stored quantity is >= 1
//! - Entries keep first-insertion order
//! - Totals are recomputed from entries on every read, never cached
//!
//! None of the operations can fail. Callers re-read totals after each
//! mutation; there are no change notifications in here.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{Product, ProductId};

// =============================================================================
// Cart Entry
// =============================================================================

/// One product with its aggregate quantity.
///
/// Entries handed out by [`Cart::items`] are copies; changing them does not
/// touch the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    pub product: Product,
    pub quantity: i64,
}

impl CartEntry {
    /// Price of this line (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.product.price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - Product already in cart: its quantity goes up by one, in place
    /// - Product not in cart: appended with quantity 1
    ///
    /// The product already stored is kept; entries are matched by id only.
    pub fn add_item(&mut self, product: Product) {
        if let Some(entry) = self.entry_mut(product.id()) {
            entry.quantity = entry.quantity.saturating_add(1);
            return;
        }

        self.entries.push(CartEntry {
            product,
            quantity: 1,
        });
    }

    /// Removes the entry for `product_id`. No-op when absent.
    pub fn remove_item(&mut self, product_id: ProductId) {
        self.entries.retain(|e| e.product.id() != product_id);
    }

    /// Sets the quantity of an entry.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: same as [`Cart::remove_item`]
    /// - Product in cart: quantity replaced, position kept
    /// - Product not in cart: no-op (never creates an entry)
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }

        if let Some(entry) = self.entry_mut(product_id) {
            entry.quantity = quantity;
        }
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Snapshot of the entries in insertion order.
    pub fn items(&self) -> Vec<CartEntry> {
        self.entries.clone()
    }

    /// Iterates over the entries without copying.
    pub fn iter(&self) -> impl Iterator<Item = &CartEntry> {
        self.entries.iter()
    }

    /// Sum of all quantities (the badge number).
    pub fn item_count(&self) -> i64 {
        self.entries.iter().map(|e| e.quantity).sum()
    }

    /// Σ price × quantity over all entries.
    pub fn total_price(&self) -> Money {
        self.entries.iter().map(CartEntry::line_total).sum()
    }

    /// Quantity held for a product, 0 when absent.
    pub fn quantity_of(&self, product_id: ProductId) -> i64 {
        self.entries
            .iter()
            .find(|e| e.product.id() == product_id)
            .map_or(0, |e| e.quantity)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.entries.iter().any(|e| e.product.id() == product_id)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Derived totals, for display or serialization.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }

    fn entry_mut(&mut self, product_id: ProductId) -> Option<&mut CartEntry> {
        self.entries.iter_mut().find(|e| e.product.id() == product_id)
    }
}

/// Cart totals summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: i64,
    pub distinct_items: usize,
    pub total_price: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            distinct_items: cart.len(),
            total_price: cart.total_price(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: ProductId, cents: i64) -> Product {
        Product::new(
            id,
            format!("Product {}", id),
            Money::from_cents(cents),
            "",
            "Test",
        )
        .unwrap()
    }

    fn ids(cart: &Cart) -> Vec<ProductId> {
        cart.iter().map(|e| e.product.id()).collect()
    }

    /// Recomputes both totals by hand from a snapshot.
    fn assert_totals_consistent(cart: &Cart) {
        let items = cart.items();
        let count: i64 = items.iter().map(|e| e.quantity).sum();
        let total: i64 = items
            .iter()
            .map(|e| e.product.price().cents() * e.quantity)
            .sum();

        assert_eq!(cart.item_count(), count);
        assert_eq!(cart.total_price().cents(), total);
        assert!(items.iter().all(|e| e.quantity >= 1));
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        cart.add_item(product(1, 399));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_price().cents(), 399);
    }

    #[test]
    fn test_add_same_product_twice_keeps_position() {
        let mut cart = Cart::new();
        cart.add_item(product(1, 399));
        cart.add_item(product(2, 249));
        cart.add_item(product(1, 399));

        assert_eq!(ids(&cart), vec![1, 2]);
        assert_eq!(cart.quantity_of(1), 2);
        assert_eq!(cart.quantity_of(2), 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_add_keeps_first_product_data() {
        let mut cart = Cart::new();
        cart.add_item(product(1, 399));

        let renamed = Product::new(1, "Renamed", Money::from_cents(399), "", "Test").unwrap();
        cart.add_item(renamed);

        assert_eq!(cart.items()[0].product.name(), "Product 1");
        assert_eq!(cart.quantity_of(1), 2);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_item(product(1, 399));
        cart.add_item(product(2, 249));

        cart.remove_item(1);
        assert_eq!(ids(&cart), vec![2]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(product(1, 399));
        let before = cart.clone();

        cart.remove_item(42);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        cart.add_item(product(1, 399));
        cart.add_item(product(2, 249));

        cart.update_quantity(1, 5);
        assert_eq!(ids(&cart), vec![1, 2]);
        assert_eq!(cart.quantity_of(1), 5);
        assert_eq!(cart.total_price().cents(), 399 * 5 + 249);
    }

    #[test]
    fn test_update_quantity_zero_or_negative_removes() {
        for quantity in [0, -5] {
            let mut updated = Cart::new();
            updated.add_item(product(1, 399));
            updated.add_item(product(2, 249));
            let mut removed = updated.clone();

            updated.update_quantity(1, quantity);
            removed.remove_item(1);

            assert_eq!(updated, removed);
            assert!(!updated.contains(1));
        }
    }

    #[test]
    fn test_update_quantity_missing_does_not_create() {
        let mut cart = Cart::new();
        cart.update_quantity(7, 3);

        assert!(cart.is_empty());
        assert_eq!(cart.quantity_of(7), 0);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(product(1, 399));
        cart.add_item(product(2, 249));

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert!(cart.total_price().is_zero());
    }

    #[test]
    fn test_items_is_a_snapshot() {
        let mut cart = Cart::new();
        cart.add_item(product(1, 399));

        let mut items = cart.items();
        items[0].quantity = 99;
        items.push(CartEntry {
            product: product(2, 249),
            quantity: 1,
        });

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of(1), 1);
    }

    #[test]
    fn test_totals_after_mixed_operations() {
        let mut cart = Cart::new();
        assert_totals_consistent(&cart);

        cart.add_item(product(1, 399));
        cart.add_item(product(2, 249));
        cart.add_item(product(1, 399));
        assert_totals_consistent(&cart);

        cart.update_quantity(2, 4);
        cart.add_item(product(3, 1499));
        assert_totals_consistent(&cart);

        cart.remove_item(1);
        cart.update_quantity(3, -1);
        assert_totals_consistent(&cart);

        assert_eq!(cart.item_count(), 4);
        assert_eq!(cart.total_price().cents(), 249 * 4);
    }

    #[test]
    fn test_totals_summary() {
        let mut cart = Cart::new();
        cart.add_item(product(1, 399));
        cart.add_item(product(1, 399));
        cart.add_item(product(2, 249));

        let totals = cart.totals();
        assert_eq!(totals.item_count, 3);
        assert_eq!(totals.distinct_items, 2);
        assert_eq!(totals.total_price.cents(), 1047);
    }
}
