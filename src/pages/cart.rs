use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tera::Tera;
use tracing::{info, warn};

use super::{Notice, cart_count, page_context, redirect, render};
use crate::cart::{CartView, PendingChange, QuantityChange};
use crate::checkout::{CheckoutForm, Identity, prepare_order};
use crate::config::Config;
use crate::handlers::{ApiClient, cart, orders};

#[derive(Deserialize, Debug)]
pub struct NoticeQuery {
    pub notice: Option<String>,
    pub level: Option<String>,
}

#[get("/cart")]
pub async fn show_cart(
    tmpl: web::Data<Tera>,
    api: web::Data<ApiClient>,
    query: web::Query<NoticeQuery>,
) -> HttpResponse {
    let (items, count) = tokio::join!(cart::fetch_cart(&api), cart_count(&api));

    let notice = Notice::from_query(query.notice.as_deref(), query.level.as_deref());
    let mut context = page_context(count, notice);

    match items {
        Ok(items) => context.insert("cart", &CartView::from_snapshot(&items)),
        Err(e) => {
            warn!(error = %e, "failed to load cart");
            context.insert("cart", &CartView::from_snapshot(&[]));
            context.insert("error", &e.notice("Failed to load the cart"));
        }
    }

    render(&tmpl, "cart.html", &context)
}

/// `quantity` is the value the line displayed when the button was pressed.
#[derive(Deserialize, Debug)]
pub struct QuantityForm {
    pub quantity: u32,
    pub change: QuantityChange,
}

#[post("/cart/{id}/quantity")]
pub async fn change_quantity(
    api: web::Data<ApiClient>,
    path: web::Path<i64>,
    form: web::Form<QuantityForm>,
) -> HttpResponse {
    let item_id = path.into_inner();
    let Some(change) = PendingChange::begin(item_id, form.quantity, form.change) else {
        return redirect("/cart");
    };

    let outcome = cart::update_quantity(&api, item_id, change.to).await;
    let quantity = change.settle(&outcome);

    match outcome {
        Ok(()) => {
            info!(item_id, quantity, "cart quantity updated");
            redirect("/cart")
        }
        Err(e) => {
            warn!(item_id, quantity, error = %e, "cart quantity change rolled back");
            redirect(Notice::error(e.notice("Could not change the quantity")).attach("/cart"))
        }
    }
}

#[post("/cart/{id}/remove")]
pub async fn remove_item(api: web::Data<ApiClient>, path: web::Path<i64>) -> HttpResponse {
    let item_id = path.into_inner();

    match cart::remove_item(&api, item_id).await {
        Ok(()) => {
            info!(item_id, "cart line removed");
            redirect("/cart")
        }
        Err(e) => {
            warn!(item_id, error = %e, "cart line removal failed");
            redirect(Notice::error(e.notice("Could not remove the item")).attach("/cart"))
        }
    }
}

#[post("/cart/checkout")]
pub async fn checkout(
    api: web::Data<ApiClient>,
    config: web::Data<Config>,
    form: web::Form<CheckoutForm>,
) -> HttpResponse {
    let (order, identity) = match prepare_order(&form, config.test_user_id) {
        Ok(prepared) => prepared,
        Err(e) => {
            info!(reason = %e, "checkout blocked before submission");
            return redirect(Notice::error(e.to_string()).attach("/cart"));
        }
    };
    let test_mode = matches!(identity, Identity::TestMode(_));

    match orders::post_order(&api, &order).await {
        Ok(created) => {
            info!(
                order_id = created.order_id,
                user_id = order.user_id,
                test_mode,
                "order placed"
            );
            let message = format!("Order #{} has been placed", created.order_id);
            redirect(Notice::success(message).attach("/cart"))
        }
        Err(e) => {
            warn!(user_id = order.user_id, error = %e, "order submission failed");
            redirect(Notice::error(e.notice("Could not place the order")).attach("/cart"))
        }
    }
}
