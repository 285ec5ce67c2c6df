//! # Cart State
//!
//! The one cart every screen shares.
//!
//! ## Thread Safety
//! The cart itself has no internal locking. `CartState` wraps it in
//! `Arc<Mutex<_>>`, so all reads and mutations are serialized through one
//! lock no matter which task or thread they come from. Results of async
//! calls are applied through [`CartState::with_cart_mut`] too.
//!
//! ## Cart State Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Screen Action            CartState               Cart Change           │
//! │  ─────────────            ─────────               ───────────           │
//! │                                                                         │
//! │  Tap product ───────────► with_cart_mut(add) ───► qty + 1 or push      │
//! │  Scan QR ───────────────► scan(payload) ────────► add_scanned()        │
//! │  Edit quantity ─────────► with_cart_mut(update) ► qty = n / removed    │
//! │  Badge / totals ────────► with_cart(totals) ────► (read only)          │
//! │  Render cart list ──────► snapshot() ───────────► (copy of entries)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use shop_core::{Cart, CartEntry, CartTotals, ProductId, QrParseError};
use tracing::{debug, warn};

/// Shared handle to the session cart.
///
/// Clones point to the same cart.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState::default()
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust
    /// use shop_client::CartState;
    ///
    /// let state = CartState::new();
    /// let totals = state.with_cart(|cart| cart.totals());
    /// assert_eq!(totals.item_count, 0);
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.lock();
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.lock();
        f(&mut cart)
    }

    /// Scan-to-add under the lock.
    pub fn scan(&self, payload: &str) -> Result<ProductId, QrParseError> {
        let result = self.with_cart_mut(|cart| cart.add_scanned(payload));
        match &result {
            Ok(id) => debug!(product_id = id, "Scanned product added"),
            Err(e) => warn!(error = %e, "Scan rejected"),
        }
        result
    }

    /// Copy of the entries, in cart order.
    pub fn snapshot(&self) -> Vec<CartEntry> {
        self.with_cart(Cart::items)
    }

    pub fn totals(&self) -> CartTotals {
        self.with_cart(Cart::totals)
    }

    /// Recovers a poisoned lock. Cart operations never leave partial state.
    fn lock(&self) -> MutexGuard<'_, Cart> {
        self.cart.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use shop_core::{Catalog, Product};

    use super::*;

    fn apples() -> Product {
        Catalog::standard().get(1).unwrap().clone()
    }

    #[test]
    fn test_clones_share_cart() {
        let state = CartState::new();
        let other = state.clone();

        other.with_cart_mut(|cart| cart.add_item(apples()));

        assert_eq!(state.with_cart(|cart| cart.item_count()), 1);
        assert_eq!(state.totals().total_price.cents(), 399);
    }

    #[test]
    fn test_scan() {
        let state = CartState::new();

        let id = state.scan("abc-123|3|50|Organic Apple").unwrap();
        assert_eq!(state.with_cart(|cart| cart.quantity_of(id)), 1);

        assert!(state.scan("abc-123|3").is_err());
        assert_eq!(state.snapshot().len(), 1);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let state = CartState::new();
        state.with_cart_mut(|cart| cart.add_item(apples()));

        let mut snapshot = state.snapshot();
        snapshot.clear();

        assert_eq!(state.snapshot().len(), 1);
    }

    #[test]
    fn test_concurrent_adds_are_serialized() {
        let state = CartState::new();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let state = state.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        state.with_cart_mut(|cart| cart.add_item(apples()));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let totals = state.totals();
        assert_eq!(totals.item_count, 800);
        assert_eq!(totals.distinct_items, 1);
        assert_eq!(totals.total_price.cents(), 399 * 800);
    }

    #[test]
    fn test_survives_poisoned_lock() {
        let state = CartState::new();
        state.with_cart_mut(|cart| cart.add_item(apples()));

        let poisoner = state.clone();
        let _ = thread::spawn(move || {
            poisoner.with_cart_mut(|_| panic!("screen crashed"));
        })
        .join();

        assert_eq!(state.with_cart(|cart| cart.item_count()), 1);
    }
}
