//! `/users` CRUD.
//!
//! Users are exposed as `{"Id": 1, "Name": "Alice"}`. Create and rename take
//! the new name either as a bare JSON string (`"Alice"`) or as
//! `{"name": "Alice"}`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use shop_core::{UserSummary, ValidationError};
use tracing::info;

use super::parse_id;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Accepted bodies for create and rename.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NameBody {
    Bare(String),
    Object { name: String },
}

impl NameBody {
    /// The trimmed name, rejecting blanks.
    fn into_name(self) -> Result<String, ValidationError> {
        let name = match self {
            NameBody::Bare(name) | NameBody::Object { name } => name,
        };

        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::Required {
                field: "Name".to_string(),
            });
        }
        Ok(name.to_string())
    }
}

/// `GET /users`
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserSummary>>> {
    let users = state.db.users().list().await?;
    Ok(Json(users.into_iter().map(UserSummary::from).collect()))
}

/// `GET /users/:id`
pub async fn get_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<UserSummary>> {
    let id = parse_id("User", &raw_id)?;

    let user = state
        .db
        .users()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("User", id))?;

    Ok(Json(user.into()))
}

/// `POST /users`
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<NameBody>, JsonRejection>,
) -> ApiResult<Json<UserSummary>> {
    let Json(body) = body?;
    let name = body.into_name()?;

    let user = state.db.users().create(&name).await?;
    info!(id = user.id, "User created");

    Ok(Json(user.into()))
}

/// `PUT /users/:id`
pub async fn rename_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<NameBody>, JsonRejection>,
) -> ApiResult<Json<UserSummary>> {
    let id = parse_id("User", &raw_id)?;
    let Json(body) = body?;
    let name = body.into_name()?;

    if !state.db.users().rename(id, &name).await? {
        return Err(ApiError::not_found("User", id));
    }
    info!(id, "User renamed");

    Ok(Json(UserSummary { id, name }))
}

/// `DELETE /users/:id`
pub async fn delete_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_id("User", &raw_id)?;

    if !state.db.users().delete(id).await? {
        return Err(ApiError::not_found("User", id));
    }
    info!(id, "User deleted");

    Ok(Json(json!({})))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::test_support::{send, test_router};

    #[tokio::test]
    async fn test_create_with_bare_string() {
        let (router, _) = test_router().await;

        let (status, body) = send(&router, "POST", "/users", Some(json!("Alice"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["Name"], "Alice");
        assert!(body["Id"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_create_with_object() {
        let (router, _) = test_router().await;

        let (status, body) =
            send(&router, "POST", "/users", Some(json!({"name": "  Bob "}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["Name"], "Bob");
    }

    #[tokio::test]
    async fn test_create_rejects_blank_and_malformed() {
        let (router, state) = test_router().await;

        let (status, body) = send(&router, "POST", "/users", Some(json!("   "))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["message"], "Name cannot be empty");

        let (status, body) = send(&router, "POST", "/users", Some(json!(42))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");

        assert_eq!(state.db.users().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_and_get() {
        let (router, state) = test_router().await;
        let alice = state.db.users().create("Alice").await.unwrap();
        state.db.users().create("Bob").await.unwrap();

        let (status, body) = send(&router, "GET", "/users", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[1]["Name"], "Bob");

        let (status, body) = send(&router, "GET", &format!("/users/{}", alice.id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"Id": alice.id, "Name": "Alice"}));
    }

    #[tokio::test]
    async fn test_get_missing_or_non_numeric_is_404() {
        let (router, _) = test_router().await;

        let (status, body) = send(&router, "GET", "/users/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");

        let (status, _) = send(&router, "GET", "/users/abc", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_rename() {
        let (router, state) = test_router().await;
        let bob = state.db.users().create("Bob").await.unwrap();
        let uri = format!("/users/{}", bob.id);

        let (status, body) = send(&router, "PUT", &uri, Some(json!("Robert"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"Id": bob.id, "Name": "Robert"}));

        let (status, _) = send(&router, "PUT", "/users/999", Some(json!("Nobody"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&router, "PUT", &uri, Some(json!(""))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete() {
        let (router, state) = test_router().await;
        let bob = state.db.users().create("Bob").await.unwrap();
        let uri = format!("/users/{}", bob.id);

        let (status, body) = send(&router, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({}));

        let (status, _) = send(&router, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
