use reqwest::Method;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{Category, CategoryInput};

pub async fn fetch_categories(api: &ApiClient) -> Result<Vec<Category>, ApiError> {
    api.get_json("/api/categories").await
}

pub async fn fetch_category(api: &ApiClient, id: i64) -> Result<Category, ApiError> {
    api.get_json(&format!("/api/categories/{id}")).await
}

pub async fn post_category(api: &ApiClient, category: &CategoryInput) -> Result<(), ApiError> {
    api.send_json(Method::POST, "/api/categories", category)
        .await
        .map(|_| ())
}

pub async fn put_category(
    api: &ApiClient,
    id: i64,
    category: &CategoryInput,
) -> Result<(), ApiError> {
    api.send_json(Method::PUT, &format!("/api/categories/{id}"), category)
        .await
        .map(|_| ())
}

/// Rejected with the server's reason while products still reference the category.
pub async fn delete_category(api: &ApiClient, id: i64) -> Result<(), ApiError> {
    api.delete(&format!("/api/categories/{id}")).await
}
