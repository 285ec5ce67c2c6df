//! # User Repository
//!
//! Database operations for users and registered accounts.
//!
//! ## Two Kinds of Rows
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create("Alice")              register(NewAccount { .. })               │
//! │       │                              │                                  │
//! │       ▼                              ▼                                  │
//! │  ┌──────────────────────┐    ┌────────────────────────────────────┐    │
//! │  │ id, name             │    │ id, name, username (UNIQUE), email │    │
//! │  │ (everything else     │    │ password_hash, card_last4,         │    │
//! │  │  NULL)               │    │ rsa/ec public keys                 │    │
//! │  └──────────────────────┘    └────────────────────────────────────┘    │
//! │                                                                         │
//! │  Both show up in list() as {Id, Name}.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use shop_core::{UserId, UserSummary};

const USER_COLUMNS: &str = "id, name, username, email, password_hash, card_last4, \
                            rsa_public_key, ec_public_key, created_at";

/// A row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub username: Option<String>,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub card_last4: Option<String>,
    pub rsa_public_key: Option<String>,
    pub ec_public_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The `{Id, Name}` view served by the `/users` endpoints.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        UserSummary {
            id: user.id,
            name: user.name,
        }
    }
}

/// Everything stored for a registered account.
///
/// Validation and password hashing happen before this is built.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub card_last4: String,
    pub rsa_public_key: Option<String>,
    pub ec_public_key: Option<String>,
}

/// Repository for user database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.users();
///
/// let alice = repo.create("Alice").await?;
/// let renamed = repo.rename(alice.id, "Alicia").await?;
/// let gone = repo.delete(alice.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// All users in id order.
    pub async fn list(&self) -> DbResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY id",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = users.len(), "Listed users");
        Ok(users)
    }

    pub async fn get_by_id(&self, id: UserId) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = ?1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE username = ?1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Inserts a plain user with only a name.
    pub async fn create(&self, name: &str) -> DbResult<User> {
        debug!(name = %name, "Creating user");

        let id = sqlx::query("INSERT INTO users (name) VALUES (?1)")
            .bind(name)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        self.fetch_inserted(id).await
    }

    /// Inserts a registered account.
    ///
    /// ## Errors
    /// `DbError::UniqueViolation` when the username is already taken.
    pub async fn register(&self, account: NewAccount) -> DbResult<User> {
        debug!(username = %account.username, "Registering account");

        let result = sqlx::query(
            r#"
            INSERT INTO users (
                name, username, email, password_hash, card_last4,
                rsa_public_key, ec_public_key
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&account.name)
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(&account.card_last4)
        .bind(&account.rsa_public_key)
        .bind(&account.ec_public_key)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => {
                DbError::duplicate(field, account.username.clone())
            }
            other => other,
        })?;

        self.fetch_inserted(result.last_insert_rowid()).await
    }

    /// Renames a user. Returns `false` when no row has that id.
    pub async fn rename(&self, id: UserId, name: &str) -> DbResult<bool> {
        debug!(id = %id, name = %name, "Renaming user");

        let result = sqlx::query("UPDATE users SET name = ?1 WHERE id = ?2")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a user. Returns `false` when no row has that id.
    pub async fn delete(&self, id: UserId) -> DbResult<bool> {
        debug!(id = %id, "Deleting user");

        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn fetch_inserted(&self, id: UserId) -> DbResult<User> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("User", id))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
