//! `POST /api/register`
//!
//! ## Flow
//! ```text
//! RegistrationRequest (JSON, snake_case)
//!      │
//!      ▼
//! validate_request ──── fails ──► 400 VALIDATION_ERROR
//!      │
//!      ▼
//! username taken? ───── yes ────► 409 CONFLICT
//!      │
//!      ▼
//! argon2 hash password, keep card last 4 digits only
//!      │
//!      ▼
//! users.register ─────────────► 200 {user_id, supermarket_public_key}
//! ```

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use shop_core::validation::validate_request;
use shop_core::{CardNumber, RegistrationRequest, RegistrationResponse};
use shop_db::NewAccount;
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegistrationRequest>, JsonRejection>,
) -> ApiResult<Json<RegistrationResponse>> {
    let Json(request) = body?;

    if let Err(e) = validate_request(&request) {
        warn!(field = e.field(), "Registration rejected");
        return Err(e.into());
    }

    let users = state.db.users();
    if users.get_by_username(&request.username).await?.is_some() {
        return Err(ApiError::conflict(format!(
            "Username '{}' is already taken",
            request.username
        )));
    }

    let card = CardNumber::parse(&request.credit_card)?;
    let account = NewAccount {
        name: request.name,
        username: request.username,
        email: request.email,
        password_hash: hash_password(&request.password)?,
        card_last4: card.last4().to_string(),
        rsa_public_key: request.rsa_public_key,
        ec_public_key: request.ec_public_key,
    };

    let user = users.register(account).await?;
    info!(id = user.id, "Account registered");

    Ok(Json(RegistrationResponse {
        user_id: user.id.to_string(),
        supermarket_public_key: state.supermarket_public_key.to_string(),
    }))
}

/// PHC-formatted argon2id hash with a fresh salt.
fn hash_password(password: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::internal(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}
