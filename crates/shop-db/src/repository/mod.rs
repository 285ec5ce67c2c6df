//! Table access, one repository per table.
//!
//! Repositories own a clone of the pool and return domain rows, never raw
//! sqlx rows. "Not found" on a lookup is `Ok(None)` or `Ok(false)`; the
//! caller decides whether that is an error.

pub mod user;
