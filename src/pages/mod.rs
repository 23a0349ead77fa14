//! Server-rendered pages. Each page fetches what it shows from the REST API
//! on every request; form posts perform one mutation and redirect back.

pub mod admin;
pub mod cart;
pub mod catalog;
mod notice;

pub use notice::{Level, Notice};

use actix_web::{HttpResponse, http::header, web};
use serde::Serialize;
use tera::{Context, Tera};
use tracing::{debug, error};

use crate::cart::format_price;
use crate::handlers::{self, ApiClient};
use crate::models::{Category, Product};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(catalog::home)
        .service(catalog::product_detail)
        .service(catalog::add_to_cart)
        .service(cart::show_cart)
        .service(cart::change_quantity)
        .service(cart::remove_item)
        .service(cart::checkout)
        .service(admin::show_admin)
        .service(admin::save_product)
        .service(admin::delete_product)
        .service(admin::save_category)
        .service(admin::delete_category);
}

fn render(tmpl: &Tera, name: &str, context: &Context) -> HttpResponse {
    match tmpl.render(name, context) {
        Ok(html) => HttpResponse::Ok().content_type("text/html").body(html),
        Err(err) => {
            error!(template = name, error = ?err, "Tera render error");
            HttpResponse::InternalServerError().body("Template render error")
        }
    }
}

fn redirect(location: impl Into<String>) -> HttpResponse {
    HttpResponse::Found()
        .append_header((header::LOCATION, location.into()))
        .finish()
}

/// Badge count; an unreachable count endpoint just hides the badge.
async fn cart_count(api: &ApiClient) -> u32 {
    match handlers::cart::fetch_count(api).await {
        Ok(count) => count,
        Err(e) => {
            debug!(error = %e, "cart count unavailable");
            0
        }
    }
}

/// Context every page starts from: the cart badge and an optional notice.
fn page_context(cart_count: u32, notice: Option<Notice>) -> Context {
    let mut context = Context::new();
    context.insert("cart_count", &cart_count);
    context.insert("notice", &notice);
    context
}

/// A product as the catalog and admin tables display it.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: i64,
    pub image_url: Option<String>,
    pub category: String,
}

impl ProductRow {
    pub fn new(product: &Product, categories: &[Category]) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            description: product
                .description
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| "-".to_string()),
            price: format_price(product.price),
            stock: product.stock,
            image_url: product.image_url.clone(),
            category: category_name(product.category_id, categories),
        }
    }
}

fn category_name(category_id: Option<i64>, categories: &[Category]) -> String {
    let Some(id) = category_id else {
        return "-".to_string();
    };
    categories
        .iter()
        .find(|category| category.id == id)
        .map_or_else(|| "Unknown".to_string(), |category| category.name.clone())
}
