use reqwest::Method;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{AddToCart, CartItem, QuantityUpdate};

pub async fn fetch_cart(api: &ApiClient) -> Result<Vec<CartItem>, ApiError> {
    api.get_json("/api/cart").await
}

pub async fn fetch_count(api: &ApiClient) -> Result<u32, ApiError> {
    api.get_json("/api/cart/count").await
}

pub async fn add_to_cart(api: &ApiClient, product_id: i64, quantity: u32) -> Result<(), ApiError> {
    let body = AddToCart {
        product_id,
        quantity,
    };
    api.send_json(Method::POST, "/api/cart", &body)
        .await
        .map(|_| ())
}

pub async fn update_quantity(api: &ApiClient, item_id: i64, quantity: u32) -> Result<(), ApiError> {
    api.send_json(
        Method::PUT,
        &format!("/api/cart/{item_id}"),
        &QuantityUpdate { quantity },
    )
    .await
    .map(|_| ())
}

pub async fn remove_item(api: &ApiClient, item_id: i64) -> Result<(), ApiError> {
    api.delete(&format!("/api/cart/{item_id}")).await
}
