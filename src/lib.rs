//! Storefront web client: catalog, product page, cart and checkout, plus the
//! product/category admin, rendered server-side over the shop REST API.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod models;
pub mod pages;

use actix_web::web;
use tera::Tera;

use crate::config::Config;
use crate::handlers::ApiClient;

/// Register shared state and every page on an actix `App`.
pub fn configure_app(
    tera: Tera,
    api: ApiClient,
    config: Config,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(tera))
            .app_data(web::Data::new(api))
            .app_data(web::Data::new(config))
            .configure(pages::configure);
    }
}
