//! # shop-db
//!
//! SQLite storage for the users server, through sqlx.
//!
//! ```text
//!  users-api handlers          seed binary
//!          │                       │
//!          └──────► Database ◄─────┘
//!                      │  .users()
//!                      ▼
//!               UserRepository ──► users table (migrations/sqlite/001_users.sql)
//! ```
//!
//! Everything is async and goes through one [`Database`] handle, which owns
//! the pool. Schema changes live in embedded migrations applied on open.
//!
//! ```rust,ignore
//! use shop_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("database/users.db")).await?;
//! let alice = db.users().create("Alice").await?;
//! assert!(db.users().get_by_id(alice.id).await?.is_some());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::user::{NewAccount, User, UserRepository};
