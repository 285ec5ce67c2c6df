//! # Shop Client
//!
//! Typed calls against the users server.
//!
//! ## Calls
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Method              HTTP                      Returns                  │
//! │  ──────              ────                      ───────                  │
//! │  list_users          GET    /users             Vec<UserSummary>         │
//! │  get_user            GET    /users/:id         UserSummary              │
//! │  create_user         POST   /users   "name"    UserSummary              │
//! │  rename_user         PUT    /users/:id "name"  UserSummary              │
//! │  delete_user         DELETE /users/:id         ()                       │
//! │  register            POST   /api/register      RegistrationResponse     │
//! │  fetch_catalog       GET    /products          Catalog                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shop_core::{Catalog, RegistrationForm, RegistrationResponse, UserId, UserSummary};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult, ErrorBody};

/// HTTP client for the users server.
///
/// Cheap to clone; clones share the connection pool.
///
/// ## Usage
/// ```rust,ignore
/// let client = ShopClient::new(ClientConfig::from_env())?;
///
/// let users = client.list_users().await?;
/// let alice = client.create_user("Alice").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ShopClient {
    http: Client,
    config: ClientConfig,
}

impl ShopClient {
    /// Builds the underlying HTTP client with the configured timeouts.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ClientError::Connection(e.to_string()))?;

        Ok(ShopClient { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // =========================================================================
    // Users
    // =========================================================================

    pub async fn list_users(&self) -> ClientResult<Vec<UserSummary>> {
        self.send(self.http.get(self.config.url("/users"))).await
    }

    pub async fn get_user(&self, id: UserId) -> ClientResult<UserSummary> {
        self.send(self.http.get(self.user_url(id))).await
    }

    /// Creates a user. The name travels as a bare JSON string.
    pub async fn create_user(&self, name: &str) -> ClientResult<UserSummary> {
        let user: UserSummary = self
            .send(self.http.post(self.config.url("/users")).json(name))
            .await?;
        info!(id = user.id, "User created");
        Ok(user)
    }

    pub async fn rename_user(&self, id: UserId, name: &str) -> ClientResult<UserSummary> {
        self.send(self.http.put(self.user_url(id)).json(name)).await
    }

    pub async fn delete_user(&self, id: UserId) -> ClientResult<()> {
        let _: serde_json::Value = self.send(self.http.delete(self.user_url(id))).await?;
        Ok(())
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Validates the form locally, then posts it.
    ///
    /// ## Errors
    /// `ClientError::InvalidForm` when any field fails; no request is made.
    pub async fn register(&self, form: &RegistrationForm) -> ClientResult<RegistrationResponse> {
        let request = form.clone().into_request().map_err(|report| {
            warn!(failed_fields = report.errors().len(), "Registration form rejected locally");
            ClientError::InvalidForm(report)
        })?;

        let response: RegistrationResponse = self
            .send(self.http.post(self.config.url("/api/register")).json(&request))
            .await?;
        info!(user_id = %response.user_id, "Registration accepted");

        Ok(response)
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    pub async fn fetch_catalog(&self) -> ClientResult<Catalog> {
        self.send(self.http.get(self.config.url("/products"))).await
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    fn user_url(&self, id: UserId) -> String {
        self.config.url(&format!("/users/{}", id))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        debug!(status = %response.status(), url = %response.url(), "Response received");

        if !response.status().is_success() {
            return Err(error_from(response).await);
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

/// Turns a non-success response into `Api` when the body is the server's
/// error shape, `Status` otherwise.
async fn error_from(response: Response) -> ClientError {
    let status = response.status().as_u16();

    match response.json::<ErrorBody>().await {
        Ok(body) => ClientError::Api {
            status,
            code: body.code,
            message: body.message,
        },
        Err(_) => ClientError::Status(status),
    }
}

// =============================================================================
// Tests (against the real server on a loopback port)
// =============================================================================

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use shop_db::{Database, DbConfig};
    use shop_users_api::{router, AppState};
    use tokio::net::TcpListener;

    use super::*;

    const PUBLIC_KEY: &str = "supermarket-test-key";

    async fn spawn_server() -> ShopClient {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let app = router(AppState::new(db, PUBLIC_KEY));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        ShopClient::new(ClientConfig::new(format!("http://{}", addr))).unwrap()
    }

    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            name: "Ana Silva".to_string(),
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "Secret1".to_string(),
            confirm_password: "Secret1".to_string(),
            credit_card: "4532 0151 1283 0366".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_user_crud_round() {
        let client = spawn_server().await;

        let alice = client.create_user("Alice").await.unwrap();
        assert_eq!(alice.name, "Alice");

        let fetched = client.get_user(alice.id).await.unwrap();
        assert_eq!(fetched, alice);

        let renamed = client.rename_user(alice.id, "Alicia").await.unwrap();
        assert_eq!(renamed.name, "Alicia");

        assert_eq!(client.list_users().await.unwrap(), vec![renamed]);

        client.delete_user(alice.id).await.unwrap();
        assert!(client.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_user_is_api_error() {
        let client = spawn_server().await;

        let err = client.get_user(404).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(err, ClientError::Api { ref code, .. } if code == "NOT_FOUND"));

        assert!(client.delete_user(404).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_register() {
        let client = spawn_server().await;

        let response = client.register(&valid_form()).await.unwrap();
        assert_eq!(response.supermarket_public_key, PUBLIC_KEY);
        assert!(!response.user_id.is_empty());

        let err = client.register(&valid_form()).await.unwrap_err();
        assert_eq!(err.status(), Some(409));
    }

    #[tokio::test]
    async fn test_register_invalid_form_is_not_sent() {
        let client = spawn_server().await;

        let mut form = valid_form();
        form.credit_card = "4532 0151 1283 0367".to_string();

        let err = client.register(&form).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidForm(_)));
        assert!(client.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_catalog() {
        let client = spawn_server().await;

        let catalog = client.fetch_catalog().await.unwrap();
        assert_eq!(catalog.len(), 20);
        assert_eq!(catalog.get(3).unwrap().name(), "Whole Milk");
    }

    #[tokio::test]
    async fn test_unreachable_server_fails_fast() {
        // Bind then drop, so the port is very likely closed.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = ClientConfig::new(format!("http://{}", addr))
            .connect_timeout(Duration::from_millis(500))
            .request_timeout(Duration::from_secs(2));
        let client = ShopClient::new(config).unwrap();

        let err = client.list_users().await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Connection(_) | ClientError::Timeout(_)
        ));
        assert!(!err.to_string().is_empty());
    }
}
