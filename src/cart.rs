//! Cart line quantity changes and the displayed cart summary.
//!
//! A line is shown at quantity `q`. Pressing "+" or "-" starts a
//! [`PendingChange`] from `q` to `q'`; the new quantity is sent to the
//! server and the change settles at `q'` on success or back at `q` on
//! failure. A decrement at 1 never leaves the displayed state.

use serde::{Deserialize, Serialize};

use crate::models::CartItem;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QuantityChange {
    #[serde(alias = "+")]
    Increment,
    #[serde(alias = "-")]
    Decrement,
}

/// Quantity after applying `change`, never below 1.
pub fn next_quantity(current: u32, change: QuantityChange) -> u32 {
    match change {
        QuantityChange::Increment => current.saturating_add(1),
        QuantityChange::Decrement => current.saturating_sub(1).max(1),
    }
}

/// A quantity sent to the server whose outcome is not known yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingChange {
    pub item_id: i64,
    pub from: u32,
    pub to: u32,
}

impl PendingChange {
    /// `None` when the change would not alter the line, so no request is due.
    pub fn begin(item_id: i64, displayed: u32, change: QuantityChange) -> Option<Self> {
        let from = displayed.max(1);
        let to = next_quantity(from, change);
        (to != from).then_some(Self { item_id, from, to })
    }

    /// Quantity the line shows once the server has answered.
    pub fn settle<T, E>(self, outcome: &Result<T, E>) -> u32 {
        if outcome.is_ok() { self.to } else { self.from }
    }
}

/// Sum of price × quantity over a cart snapshot.
pub fn cart_total(items: &[CartItem]) -> f64 {
    items
        .iter()
        .map(|item| item.price * f64::from(item.quantity))
        .fold(0.0, |total, line| total + line)
}

pub fn format_price(amount: f64) -> String {
    format!("{amount:.2}")
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CartLineView {
    pub id: i64,
    pub name: String,
    pub image_url: Option<String>,
    pub quantity: u32,
    pub unit_price: String,
    pub line_price: String,
    pub can_decrement: bool,
}

/// What the cart page renders from one fetched snapshot.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub total: String,
    pub is_empty: bool,
}

impl CartView {
    pub fn from_snapshot(items: &[CartItem]) -> Self {
        Self {
            items: items
                .iter()
                .map(|item| CartLineView {
                    id: item.id,
                    name: item.name.clone(),
                    image_url: item.image_url.clone(),
                    quantity: item.quantity,
                    unit_price: format_price(item.price),
                    line_price: format_price(item.price * f64::from(item.quantity)),
                    can_decrement: item.quantity > 1,
                })
                .collect(),
            total: format_price(cart_total(items)),
            is_empty: items.is_empty(),
        }
    }
}
