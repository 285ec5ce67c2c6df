//! # shop-client: App-Side HTTP Collaborator
//!
//! What the app screens use to reach the users server, and the single
//! guarded cart they all share.
//!
//! ## Boundary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Screens (Register, Products, Cart, Scan)                              │
//! │       │                               │                                 │
//! │       │ async calls                   │ with_cart / with_cart_mut       │
//! │       ▼                               ▼                                 │
//! │  ┌──────────────┐              ┌──────────────┐                         │
//! │  │  ShopClient  │── results ──►│  CartState   │  Arc<Mutex<Cart>>       │
//! │  │  (reqwest)   │              │              │                         │
//! │  └──────┬───────┘              └──────────────┘                         │
//! │         │ HTTP                                                          │
//! │         ▼                                                               │
//! │   users-api (/users, /api/register, /products)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every call resolves to a value or a [`ClientError`]; connect and request
//! timeouts bound how long that takes.

pub mod client;
pub mod config;
pub mod error;
pub mod state;

pub use client::ShopClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use state::CartState;
