//! HTTP handlers, one module per resource.

pub mod health;
pub mod products;
pub mod register;
pub mod users;

use crate::error::ApiError;

/// Parses a numeric path id. Anything else is a missing resource.
pub(crate) fn parse_id(resource: &str, raw: &str) -> Result<i64, ApiError> {
    raw.parse().map_err(|_| ApiError::not_found(resource, raw))
}
