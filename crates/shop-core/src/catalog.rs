//! # Catalog
//!
//! The fixed, ordered list of products a shopper can browse.
//!
//! The catalog is read-only: it hands out shared references and clones,
//! never mutable access. The cart owns its own copies of products.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, ProductId};

/// Read-only, ordered product collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Creates a catalog from products in display order.
    pub fn new(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    /// The supermarket's standard assortment, ids 1 through 20.
    pub fn standard() -> Self {
        const ITEMS: [(ProductId, &str, i64, &str, &str); 20] = [
            (1, "Fresh Apples", 399, "Red delicious apples, fresh from the orchard", "Fruits"),
            (2, "Organic Bananas", 249, "Organic bananas, perfect for smoothies", "Fruits"),
            (3, "Whole Milk", 429, "Fresh whole milk from local dairy farms", "Dairy"),
            (4, "Eggs (12-pack)", 599, "Large free-range eggs", "Dairy"),
            (5, "White Bread", 299, "Freshly baked white bread loaf", "Bakery"),
            (6, "Chicken Breast", 999, "Boneless, skinless chicken breast", "Meat"),
            (7, "Ground Beef", 849, "80% lean ground beef", "Meat"),
            (8, "Atlantic Salmon", 1499, "Fresh Atlantic salmon fillets", "Seafood"),
            (9, "Spinach", 349, "Fresh spinach leaves", "Vegetables"),
            (10, "Tomatoes", 299, "Roma tomatoes", "Vegetables"),
            (11, "Potato Chips", 399, "Classic potato chips", "Snacks"),
            (12, "Chocolate Chip Cookies", 449, "Freshly baked chocolate chip cookies", "Bakery"),
            (13, "Orange Juice", 499, "100% pure squeezed orange juice", "Beverages"),
            (14, "Coffee Beans", 1199, "Premium arabica coffee beans", "Beverages"),
            (15, "Pasta", 199, "Spaghetti pasta", "Dry Goods"),
            (16, "Rice", 349, "White rice, 2 lb bag", "Dry Goods"),
            (17, "Paper Towels", 899, "6-roll pack of paper towels", "Household"),
            (18, "Dish Soap", 399, "Liquid dish soap", "Household"),
            (19, "Toothpaste", 429, "Mint flavored toothpaste", "Personal Care"),
            (20, "Shampoo", 599, "Moisturizing shampoo", "Personal Care"),
        ];

        let products = ITEMS
            .iter()
            .map(|&(id, name, cents, description, category)| Product {
                id,
                name: name.to_string(),
                price: Money::from_cents(cents),
                description: description.to_string(),
                category: category.to_string(),
                image_url: None,
                qr_code: None,
            })
            .collect();

        Catalog { products }
    }

    /// All products in display order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Looks up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    /// Looks up a product by id, failing with `CoreError::ProductNotFound`.
    pub fn require(&self, id: ProductId) -> CoreResult<&Product> {
        self.get(id).ok_or(CoreError::ProductNotFound(id))
    }

    /// Filters by a free-text query.
    ///
    /// An empty query returns the whole catalog; otherwise a product matches
    /// when its name, description or category contains the query as typed,
    /// ignoring case. Whitespace is not trimmed.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        if query.is_empty() {
            return self.products.iter().collect();
        }

        self.products.iter().filter(|p| p.matches(query)).collect()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category()) {
                seen.push(product.category());
            }
        }
        seen
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
