use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tera::Tera;
use tracing::{info, warn};

use super::{Notice, ProductRow, cart_count, page_context, redirect, render};
use crate::handlers::{ApiClient, cart, categories, products};
use crate::models::{Category, CategoryFilter, PageQuery};

#[get("/")]
pub async fn home(
    tmpl: web::Data<Tera>,
    api: web::Data<ApiClient>,
    query: web::Query<PageQuery>,
) -> HttpResponse {
    let filter = CategoryFilter::parse(query.category.as_deref());
    let (product_list, category_list, count) = tokio::join!(
        products::fetch_products(&api, filter),
        categories::fetch_categories(&api),
        cart_count(&api),
    );

    let notice = Notice::from_query(query.notice.as_deref(), query.level.as_deref());
    let mut context = page_context(count, notice);
    context.insert("filter", &filter.as_param());

    let category_list = category_list.unwrap_or_else(|e| {
        warn!(error = %e, "failed to load categories");
        Vec::<Category>::new()
    });

    match product_list {
        Ok(list) => {
            let rows: Vec<ProductRow> = list
                .iter()
                .map(|product| ProductRow::new(product, &category_list))
                .collect();
            context.insert("products", &rows);
        }
        Err(e) => {
            warn!(error = %e, "failed to load products");
            context.insert("products", &Vec::<ProductRow>::new());
            context.insert("error", &e.notice("Failed to load products"));
        }
    }
    context.insert("categories", &category_list);

    render(&tmpl, "index.html", &context)
}

#[derive(Deserialize, Debug)]
pub struct DetailQuery {
    pub id: Option<String>,
    pub notice: Option<String>,
    pub level: Option<String>,
}

#[get("/product")]
pub async fn product_detail(
    tmpl: web::Data<Tera>,
    api: web::Data<ApiClient>,
    query: web::Query<DetailQuery>,
) -> HttpResponse {
    let Some(id) = query
        .id
        .as_deref()
        .and_then(|raw| raw.trim().parse::<i64>().ok())
    else {
        return redirect("/");
    };

    let (product, category_list, count) = tokio::join!(
        products::fetch_product(&api, id),
        categories::fetch_categories(&api),
        cart_count(&api),
    );

    let product = match product {
        Ok(product) => product,
        Err(e) => {
            warn!(product_id = id, error = %e, "failed to load product");
            return redirect(Notice::error(e.notice("Product not found")).attach("/"));
        }
    };

    let notice = Notice::from_query(query.notice.as_deref(), query.level.as_deref());
    let mut context = page_context(count, notice);
    let category_list = category_list.unwrap_or_default();
    context.insert("product", &ProductRow::new(&product, &category_list));

    render(&tmpl, "product.html", &context)
}

#[post("/product/{id}/add-to-cart")]
pub async fn add_to_cart(api: web::Data<ApiClient>, path: web::Path<i64>) -> HttpResponse {
    let product_id = path.into_inner();
    let back = format!("/product?id={product_id}");

    match cart::add_to_cart(&api, product_id, 1).await {
        Ok(()) => {
            info!(product_id, "product added to cart");
            redirect(Notice::success("Added to cart").attach(&back))
        }
        Err(e) => {
            warn!(product_id, error = %e, "add to cart failed");
            redirect(Notice::error(e.notice("Could not add the product to the cart")).attach(&back))
        }
    }
}
