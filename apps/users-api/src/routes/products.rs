//! Catalog fetch: `GET /products` and `GET /products/:id`.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use shop_core::Product;

use super::parse_id;
use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    /// Free-text filter over name, description and category.
    #[serde(default)]
    pub q: Option<String>,
}

/// `GET /products[?q=...]`
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Json<Vec<Product>> {
    let products = state
        .catalog
        .search(query.q.as_deref().unwrap_or(""))
        .into_iter()
        .cloned()
        .collect();

    Json(products)
}

/// `GET /products/:id`
pub async fn get_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Product>> {
    let id = parse_id("Product", &raw_id)?;
    let product = state.catalog.require(id)?;

    Ok(Json(product.clone()))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::test_support::{send, test_router};

    #[tokio::test]
    async fn test_list_products() {
        let (router, _) = test_router().await;

        let (status, body) = send(&router, "GET", "/products", None).await;
        assert_eq!(status, StatusCode::OK);

        let products = body.as_array().unwrap();
        assert_eq!(products.len(), 20);
        assert_eq!(products[0]["name"], "Fresh Apples");
        assert_eq!(products[0]["price"], 399);
    }

    #[tokio::test]
    async fn test_search_products() {
        let (router, _) = test_router().await;

        let (status, body) = send(&router, "GET", "/products?q=dairy", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_get_product() {
        let (router, _) = test_router().await;

        let (status, body) = send(&router, "GET", "/products/8", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Atlantic Salmon");

        let (status, body) = send(&router, "GET", "/products/99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Product not found: 99");
    }
}
