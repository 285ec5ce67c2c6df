//! # shop-users-api: Users REST Server
//!
//! The server the supermarket app talks to.
//!
//! ## Routes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Method   Path              Handler                  Success            │
//! │  ──────   ────              ───────                  ───────            │
//! │  GET      /                 health::root             greeting text      │
//! │  GET      /health           health::health           {status, database} │
//! │  GET      /users            users::list_users        [{Id, Name}]       │
//! │  POST     /users            users::create_user       {Id, Name}         │
//! │  GET      /users/:id        users::get_user          {Id, Name}         │
//! │  PUT      /users/:id        users::rename_user       {Id, Name}         │
//! │  DELETE   /users/:id        users::delete_user       {}                 │
//! │  POST     /api/register     register::register       {user_id, ...}     │
//! │  GET      /products         products::list_products  [Product]          │
//! │  GET      /products/:id     products::get_product    Product            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Failures answer with `{"code", "message"}` (see [`error`]).

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use shop_core::Catalog;
use shop_db::Database;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult, ErrorCode};

/// Shared state handed to every handler.
///
/// Cheap to clone: the pool and catalog are shared.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub catalog: Arc<Catalog>,
    pub supermarket_public_key: Arc<str>,
}

impl AppState {
    /// State serving the standard catalog.
    pub fn new(db: Database, supermarket_public_key: impl Into<Arc<str>>) -> Self {
        AppState {
            db,
            catalog: Arc::new(Catalog::standard()),
            supermarket_public_key: supermarket_public_key.into(),
        }
    }
}

/// All routes, without middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::health::root))
        .route("/health", get(routes::health::health))
        .route(
            "/users",
            get(routes::users::list_users).post(routes::users::create_user),
        )
        .route(
            "/users/:id",
            get(routes::users::get_user)
                .put(routes::users::rename_user)
                .delete(routes::users::delete_user),
        )
        .route("/api/register", post(routes::register::register))
        .route("/products", get(routes::products::list_products))
        .route("/products/:id", get(routes::products::get_product))
        .with_state(state)
}

/// The served application: routes plus request timeout and tracing layers.
pub fn app(state: AppState, request_timeout: Duration) -> Router {
    router(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}
