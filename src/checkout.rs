//! Checkout preconditions: a delivery address and a user identity taken from
//! the mini-app host bridge.

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::models::OrderRequest;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Please enter a delivery address")]
    EmptyAddress,
    #[error(
        "Could not identify your account. Open the shop from the Telegram bot to place an order."
    )]
    MissingIdentity,
}

/// Checkout form. The `host_*` fields are filled in by the host bridge script
/// and stay empty outside the mini-app.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct CheckoutForm {
    #[serde(default)]
    pub delivery_address: String,
    #[serde(default)]
    pub host_user_id: String,
    #[serde(default)]
    pub host_username: String,
}

/// User data published by the host bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostUser {
    pub id: i64,
    pub username: Option<String>,
}

impl CheckoutForm {
    pub fn host_user(&self) -> Option<HostUser> {
        let raw_id = self.host_user_id.trim();
        if raw_id.is_empty() {
            return None;
        }
        let id = match raw_id.parse::<i64>() {
            Ok(id) => id,
            Err(e) => {
                warn!(raw_id, error = %e, "host bridge sent a non-numeric user id");
                return None;
            }
        };
        Some(HostUser {
            id,
            username: non_empty(&self.host_username),
        })
    }
}

/// Where the order's user id came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Host(HostUser),
    /// Development-only placeholder, see `STOREFRONT_TEST_USER_ID`.
    TestMode(i64),
}

impl Identity {
    pub fn user_id(&self) -> i64 {
        match self {
            Self::Host(user) => user.id,
            Self::TestMode(id) => *id,
        }
    }

    fn username(&self) -> Option<String> {
        match self {
            Self::Host(user) => user.username.clone(),
            Self::TestMode(_) => None,
        }
    }
}

/// Host identity, else the configured test identity, else fail closed.
pub fn resolve_identity(
    host: Option<HostUser>,
    test_user_id: Option<i64>,
) -> Result<Identity, CheckoutError> {
    match (host, test_user_id) {
        (Some(user), _) => Ok(Identity::Host(user)),
        (None, Some(id)) => {
            warn!(user_id = id, "no host identity, using test-mode placeholder");
            Ok(Identity::TestMode(id))
        }
        (None, None) => Err(CheckoutError::MissingIdentity),
    }
}

/// Build the order body. The address is checked first so an empty address
/// never reaches identity resolution or the network.
pub fn prepare_order(
    form: &CheckoutForm,
    test_user_id: Option<i64>,
) -> Result<(OrderRequest, Identity), CheckoutError> {
    let delivery_address = form.delivery_address.trim();
    if delivery_address.is_empty() {
        return Err(CheckoutError::EmptyAddress);
    }
    let identity = resolve_identity(form.host_user(), test_user_id)?;
    let order = OrderRequest {
        user_id: identity.user_id(),
        delivery_address: delivery_address.to_string(),
        telegram_username: identity.username(),
    };
    Ok((order, identity))
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
