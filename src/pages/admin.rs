//! Product and category administration on one tabbed page.

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tera::Tera;
use tracing::{info, warn};

use super::{Notice, ProductRow, cart_count, page_context, redirect, render};
use crate::forms::{CategoryForm, ProductForm};
use crate::handlers::{ApiClient, categories, products};
use crate::models::{Category, CategoryFilter};

const PRODUCTS_TAB: &str = "/admin?tab=products";
const CATEGORIES_TAB: &str = "/admin?tab=categories";

#[derive(Deserialize, Debug, Default)]
pub struct AdminQuery {
    pub tab: Option<String>,
    pub category: Option<String>,
    pub edit_product: Option<String>,
    pub edit_category: Option<String>,
    pub notice: Option<String>,
    pub level: Option<String>,
}

/// Product list filter carried on the query string of admin form posts.
#[derive(Deserialize, Debug, Default)]
pub struct FilterQuery {
    pub category: Option<String>,
}

impl FilterQuery {
    fn filter(&self) -> CategoryFilter {
        CategoryFilter::parse(self.category.as_deref())
    }
}

fn parse_id(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.trim().parse().ok())
}

fn products_tab(filter: CategoryFilter) -> String {
    match filter {
        CategoryFilter::All => PRODUCTS_TAB.to_string(),
        CategoryFilter::Category(id) => format!("{PRODUCTS_TAB}&category={id}"),
    }
}

/// Everything the admin page shows apart from the lists it fetches.
/// A submitted form is shown as typed instead of being loaded by id.
struct AdminView {
    tab: &'static str,
    filter: CategoryFilter,
    edit_product: Option<i64>,
    edit_category: Option<i64>,
    product_form: Option<ProductForm>,
    category_form: Option<CategoryForm>,
    notice: Option<Notice>,
}

impl AdminView {
    fn from_query(query: &AdminQuery) -> Self {
        Self {
            tab: match query.tab.as_deref() {
                Some("categories") => "categories",
                _ => "products",
            },
            filter: CategoryFilter::parse(query.category.as_deref()),
            edit_product: parse_id(query.edit_product.as_deref()),
            edit_category: parse_id(query.edit_category.as_deref()),
            product_form: None,
            category_form: None,
            notice: Notice::from_query(query.notice.as_deref(), query.level.as_deref()),
        }
    }

    fn retry_product(filter: CategoryFilter, form: ProductForm, message: String) -> Self {
        Self {
            tab: "products",
            filter,
            edit_product: None,
            edit_category: None,
            product_form: Some(form),
            category_form: None,
            notice: Some(Notice::error(message)),
        }
    }

    fn retry_category(form: CategoryForm, message: String) -> Self {
        Self {
            tab: "categories",
            filter: CategoryFilter::All,
            edit_product: None,
            edit_category: None,
            product_form: None,
            category_form: Some(form),
            notice: Some(Notice::error(message)),
        }
    }
}

async fn render_admin(tmpl: &Tera, api: &ApiClient, view: AdminView) -> HttpResponse {
    let AdminView {
        tab,
        filter,
        edit_product,
        edit_category,
        product_form,
        category_form,
        notice,
    } = view;

    let (product_list, category_list, count, editing_product, editing_category) = tokio::join!(
        products::fetch_products(api, filter),
        categories::fetch_categories(api),
        cart_count(api),
        async {
            match edit_product {
                Some(id) if product_form.is_none() => Some(products::fetch_product(api, id).await),
                _ => None,
            }
        },
        async {
            match edit_category {
                Some(id) if category_form.is_none() => {
                    Some(categories::fetch_category(api, id).await)
                }
                _ => None,
            }
        },
    );

    let mut context = page_context(count, notice);
    let mut errors: Vec<String> = Vec::new();

    let category_list = category_list.unwrap_or_else(|e| {
        warn!(error = %e, "failed to load categories");
        errors.push(e.notice("Failed to load categories"));
        Vec::<Category>::new()
    });

    let rows: Vec<ProductRow> = match product_list {
        Ok(list) => list
            .iter()
            .map(|product| ProductRow::new(product, &category_list))
            .collect(),
        Err(e) => {
            warn!(error = %e, "failed to load products");
            errors.push(e.notice("Failed to load products"));
            Vec::new()
        }
    };

    let product_form = match (product_form, editing_product) {
        (Some(form), _) => form,
        (None, Some(Ok(product))) => ProductForm::from(&product),
        (None, Some(Err(e))) => {
            warn!(product_id = edit_product, error = %e, "failed to load product for editing");
            errors.push(e.notice("Failed to load product"));
            ProductForm::default()
        }
        (None, None) => ProductForm::default(),
    };

    let category_form = match (category_form, editing_category) {
        (Some(form), _) => form,
        (None, Some(Ok(category))) => CategoryForm::from(&category),
        (None, Some(Err(e))) => {
            warn!(category_id = edit_category, error = %e, "failed to load category for editing");
            errors.push(e.notice("Failed to load category"));
            CategoryForm::default()
        }
        (None, None) => CategoryForm::default(),
    };

    context.insert("tab", tab);
    context.insert("filter", &filter.as_param());
    context.insert("products", &rows);
    context.insert("categories", &category_list);
    context.insert("product_form", &product_form);
    context.insert("category_form", &category_form);
    context.insert("errors", &errors);

    render(tmpl, "admin.html", &context)
}

#[get("/admin")]
pub async fn show_admin(
    tmpl: web::Data<Tera>,
    api: web::Data<ApiClient>,
    query: web::Query<AdminQuery>,
) -> HttpResponse {
    render_admin(&tmpl, &api, AdminView::from_query(&query)).await
}

/// Saves and returns to the filtered list. A rejected form, whether by
/// validation or by the server, is shown again as typed.
#[post("/admin/products")]
pub async fn save_product(
    tmpl: web::Data<Tera>,
    api: web::Data<ApiClient>,
    query: web::Query<FilterQuery>,
    form: web::Form<ProductForm>,
) -> HttpResponse {
    let filter = query.filter();
    let form = form.into_inner();
    let edit_id = form.edit_id();

    let input = match form.validate() {
        Ok(input) => input,
        Err(e) => {
            let view = AdminView::retry_product(filter, form, e.to_string());
            return render_admin(&tmpl, &api, view).await;
        }
    };

    let result = match edit_id {
        Some(id) => products::put_product(&api, id, &input).await,
        None => products::post_product(&api, &input).await,
    };

    match result {
        Ok(()) => {
            info!(product_id = edit_id, name = %input.name, "product saved");
            let message = if edit_id.is_some() { "Product updated" } else { "Product added" };
            redirect(Notice::success(message).attach(&products_tab(filter)))
        }
        Err(e) => {
            warn!(product_id = edit_id, error = %e, "product save failed");
            let view = AdminView::retry_product(filter, form, e.notice("Failed to save product"));
            render_admin(&tmpl, &api, view).await
        }
    }
}

#[post("/admin/products/{id}/delete")]
pub async fn delete_product(
    api: web::Data<ApiClient>,
    path: web::Path<i64>,
    query: web::Query<FilterQuery>,
) -> HttpResponse {
    let id = path.into_inner();
    let back = products_tab(query.filter());

    match products::delete_product(&api, id).await {
        Ok(()) => {
            info!(product_id = id, "product deleted");
            redirect(Notice::success("Product deleted").attach(&back))
        }
        Err(e) => {
            warn!(product_id = id, error = %e, "product delete failed");
            redirect(Notice::error(e.notice("Failed to delete product")).attach(&back))
        }
    }
}

#[post("/admin/categories")]
pub async fn save_category(
    tmpl: web::Data<Tera>,
    api: web::Data<ApiClient>,
    form: web::Form<CategoryForm>,
) -> HttpResponse {
    let form = form.into_inner();
    let edit_id = form.edit_id();

    let input = match form.validate() {
        Ok(input) => input,
        Err(e) => {
            let view = AdminView::retry_category(form, e.to_string());
            return render_admin(&tmpl, &api, view).await;
        }
    };

    let result = match edit_id {
        Some(id) => categories::put_category(&api, id, &input).await,
        None => categories::post_category(&api, &input).await,
    };

    match result {
        Ok(()) => {
            info!(category_id = edit_id, name = %input.name, "category saved");
            let message = if edit_id.is_some() { "Category updated" } else { "Category added" };
            redirect(Notice::success(message).attach(CATEGORIES_TAB))
        }
        Err(e) => {
            warn!(category_id = edit_id, error = %e, "category save failed");
            let view = AdminView::retry_category(form, e.notice("Failed to save category"));
            render_admin(&tmpl, &api, view).await
        }
    }
}

/// A category still referenced by products comes back as a rejection whose
/// reason is shown as-is.
#[post("/admin/categories/{id}/delete")]
pub async fn delete_category(api: web::Data<ApiClient>, path: web::Path<i64>) -> HttpResponse {
    let id = path.into_inner();

    match categories::delete_category(&api, id).await {
        Ok(()) => {
            info!(category_id = id, "category deleted");
            redirect(Notice::success("Category deleted").attach(CATEGORIES_TAB))
        }
        Err(e) => {
            warn!(category_id = id, error = %e, "category delete failed");
            redirect(Notice::error(e.notice("Failed to delete category")).attach(CATEGORIES_TAB))
        }
    }
}
