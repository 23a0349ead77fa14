use reqwest::Method;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{OrderCreated, OrderRequest};

pub async fn post_order(api: &ApiClient, order: &OrderRequest) -> Result<OrderCreated, ApiError> {
    let response = api.send_json(Method::POST, "/api/orders", order).await?;
    response
        .json::<OrderCreated>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}
