use reqwest::Method;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{CategoryFilter, Product, ProductInput};

/// All products, or only those of one category.
pub async fn fetch_products(
    api: &ApiClient,
    filter: CategoryFilter,
) -> Result<Vec<Product>, ApiError> {
    match filter {
        CategoryFilter::All => api.get_json("/api/products").await,
        CategoryFilter::Category(id) => {
            api.get_json(&format!("/api/categories/{id}/products")).await
        }
    }
}

pub async fn fetch_product(api: &ApiClient, id: i64) -> Result<Product, ApiError> {
    api.get_json(&format!("/api/products/{id}")).await
}

pub async fn post_product(api: &ApiClient, product: &ProductInput) -> Result<(), ApiError> {
    api.send_json(Method::POST, "/api/products", product)
        .await
        .map(|_| ())
}

pub async fn put_product(
    api: &ApiClient,
    id: i64,
    product: &ProductInput,
) -> Result<(), ApiError> {
    api.send_json(Method::PUT, &format!("/api/products/{id}"), product)
        .await
        .map(|_| ())
}

pub async fn delete_product(api: &ApiClient, id: i64) -> Result<(), ApiError> {
    api.delete(&format!("/api/products/{id}")).await
}
