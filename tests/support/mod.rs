//! In-process fake of the shop REST API, bound to an ephemeral port.

#![allow(dead_code, unused_macros)]

use std::sync::{Mutex, MutexGuard};

use actix_web::{
    App, HttpResponse, HttpServer,
    dev::{ServerHandle, ServiceResponse},
    http::header,
    test, web,
};
use serde_json::json;
use shop_frontend::{
    config::Config,
    handlers::ApiClient,
    models::{
        AddToCart, CartItem, Category, CategoryInput, OrderRequest, Product, ProductInput,
        QuantityUpdate,
    },
};
use tera::Tera;

#[derive(Default)]
pub struct FakeShop {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub cart: Vec<CartItem>,
    pub orders: Vec<OrderRequest>,
    /// Every `PUT /api/cart/{id}` received, as (line id, quantity).
    pub quantity_updates: Vec<(i64, u32)>,
    /// Answer quantity updates with 409 and a JSON `message`.
    pub reject_quantity_updates: bool,
    next_id: i64,
}

impl FakeShop {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn with_category(mut self, name: &str) -> Self {
        let id = self.next_id();
        self.categories.push(Category {
            id,
            name: name.to_string(),
            description: None,
            image_url: None,
        });
        self
    }

    pub fn with_product(mut self, name: &str, price: f64, category_id: Option<i64>) -> Self {
        let id = self.next_id();
        self.products.push(Product {
            id,
            name: name.to_string(),
            description: Some(format!("{name} description")),
            price,
            stock: 10,
            image_url: None,
            category_id,
        });
        self
    }

    pub fn with_cart_line(mut self, id: i64, name: &str, price: f64, quantity: u32) -> Self {
        self.cart.push(CartItem {
            id,
            product_id: None,
            name: name.to_string(),
            price,
            image_url: None,
            quantity,
        });
        self
    }
}

type Shop = web::Data<Mutex<FakeShop>>;

fn lock(shop: &Shop) -> MutexGuard<'_, FakeShop> {
    shop.lock().expect("fake shop poisoned")
}

async fn list_products(shop: Shop) -> HttpResponse {
    HttpResponse::Ok().json(&lock(&shop).products)
}

async fn get_product(shop: Shop, id: web::Path<i64>) -> HttpResponse {
    let shop = lock(&shop);
    match shop.products.iter().find(|p| p.id == *id) {
        Some(product) => HttpResponse::Ok().json(product),
        None => HttpResponse::NotFound().json("Product not found"),
    }
}

fn product_from(id: i64, input: ProductInput) -> Product {
    Product {
        id,
        name: input.name,
        description: Some(input.description),
        price: input.price,
        stock: input.stock,
        image_url: input.image_url,
        category_id: input.category_id,
    }
}

async fn create_product(shop: Shop, input: web::Json<ProductInput>) -> HttpResponse {
    let mut shop = lock(&shop);
    if let Some(category_id) = input.category_id {
        if !shop.categories.iter().any(|c| c.id == category_id) {
            return HttpResponse::BadRequest().json("Category does not exist");
        }
    }
    let id = shop.next_id();
    shop.products.push(product_from(id, input.into_inner()));
    HttpResponse::Created().json("Product created")
}

async fn update_product(
    shop: Shop,
    id: web::Path<i64>,
    input: web::Json<ProductInput>,
) -> HttpResponse {
    let mut shop = lock(&shop);
    let id = id.into_inner();
    match shop.products.iter_mut().find(|p| p.id == id) {
        Some(product) => {
            *product = product_from(id, input.into_inner());
            HttpResponse::Ok().json("Product updated")
        }
        None => HttpResponse::NotFound().json("Product not found"),
    }
}

async fn delete_product(shop: Shop, id: web::Path<i64>) -> HttpResponse {
    lock(&shop).products.retain(|p| p.id != *id);
    HttpResponse::NoContent().finish()
}

async fn list_categories(shop: Shop) -> HttpResponse {
    HttpResponse::Ok().json(&lock(&shop).categories)
}

async fn get_category(shop: Shop, id: web::Path<i64>) -> HttpResponse {
    let shop = lock(&shop);
    match shop.categories.iter().find(|c| c.id == *id) {
        Some(category) => HttpResponse::Ok().json(category),
        None => HttpResponse::NotFound().json("Category not found"),
    }
}

async fn create_category(shop: Shop, input: web::Json<CategoryInput>) -> HttpResponse {
    let mut shop = lock(&shop);
    let id = shop.next_id();
    let input = input.into_inner();
    shop.categories.push(Category {
        id,
        name: input.name,
        description: input.description,
        image_url: input.image_url,
    });
    HttpResponse::Created().json("Category created")
}

async fn update_category(
    shop: Shop,
    id: web::Path<i64>,
    input: web::Json<CategoryInput>,
) -> HttpResponse {
    let mut shop = lock(&shop);
    let input = input.into_inner();
    match shop.categories.iter_mut().find(|c| c.id == *id) {
        Some(category) => {
            category.name = input.name;
            category.description = input.description;
            category.image_url = input.image_url;
            HttpResponse::Ok().json(json!({"message": "Category updated"}))
        }
        None => HttpResponse::NotFound().json("Category not found"),
    }
}

async fn delete_category(shop: Shop, id: web::Path<i64>) -> HttpResponse {
    let mut shop = lock(&shop);
    let id = id.into_inner();
    if shop.products.iter().any(|p| p.category_id == Some(id)) {
        return HttpResponse::BadRequest().json("Cannot delete category with products");
    }
    shop.categories.retain(|c| c.id != id);
    HttpResponse::Ok().json(true)
}

async fn category_products(shop: Shop, id: web::Path<i64>) -> HttpResponse {
    let shop = lock(&shop);
    let products: Vec<&Product> = shop
        .products
        .iter()
        .filter(|p| p.category_id == Some(*id))
        .collect();
    HttpResponse::Ok().json(products)
}

async fn list_cart(shop: Shop) -> HttpResponse {
    HttpResponse::Ok().json(&lock(&shop).cart)
}

async fn cart_count(shop: Shop) -> HttpResponse {
    let count: u32 = lock(&shop).cart.iter().map(|line| line.quantity).sum();
    HttpResponse::Ok().json(count)
}

async fn add_to_cart(shop: Shop, body: web::Json<AddToCart>) -> HttpResponse {
    let mut shop = lock(&shop);
    let Some(product) = shop.products.iter().find(|p| p.id == body.product_id).cloned() else {
        return HttpResponse::NotFound().json(json!({"error": "Product not found"}));
    };
    if let Some(line) = shop
        .cart
        .iter_mut()
        .find(|line| line.product_id == Some(product.id))
    {
        line.quantity += body.quantity;
        return HttpResponse::Ok().json(line.clone());
    }
    let id = shop.next_id();
    let line = CartItem {
        id,
        product_id: Some(product.id),
        name: product.name,
        price: product.price,
        image_url: product.image_url,
        quantity: body.quantity,
    };
    shop.cart.push(line.clone());
    HttpResponse::Created().json(line)
}

async fn update_cart_line(
    shop: Shop,
    id: web::Path<i64>,
    body: web::Json<QuantityUpdate>,
) -> HttpResponse {
    let mut shop = lock(&shop);
    let id = id.into_inner();
    shop.quantity_updates.push((id, body.quantity));
    if shop.reject_quantity_updates {
        return HttpResponse::Conflict().json(json!({"message": "Not enough stock"}));
    }
    if body.quantity < 1 {
        return HttpResponse::BadRequest().json("Quantity must be at least 1");
    }
    match shop.cart.iter_mut().find(|line| line.id == id) {
        Some(line) => {
            line.quantity = body.quantity;
            HttpResponse::Ok().json(line.clone())
        }
        None => HttpResponse::NotFound().json("Cart item not found"),
    }
}

async fn delete_cart_line(shop: Shop, id: web::Path<i64>) -> HttpResponse {
    let mut shop = lock(&shop);
    let before = shop.cart.len();
    shop.cart.retain(|line| line.id != *id);
    if shop.cart.len() == before {
        return HttpResponse::NotFound().json("Cart item not found");
    }
    HttpResponse::NoContent().finish()
}

async fn create_order(shop: Shop, body: web::Json<OrderRequest>) -> HttpResponse {
    let mut shop = lock(&shop);
    if shop.cart.is_empty() {
        return HttpResponse::BadRequest().json("Cart is empty");
    }
    shop.orders.push(body.into_inner());
    shop.cart.clear();
    let order_id = shop.orders.len();
    HttpResponse::Created().json(json!({"order_id": order_id, "status": "new"}))
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/products", web::get().to(list_products))
            .route("/products", web::post().to(create_product))
            .route("/products/{id}", web::get().to(get_product))
            .route("/products/{id}", web::put().to(update_product))
            .route("/products/{id}", web::delete().to(delete_product))
            .route("/categories", web::get().to(list_categories))
            .route("/categories", web::post().to(create_category))
            .route("/categories/{id}/products", web::get().to(category_products))
            .route("/categories/{id}", web::get().to(get_category))
            .route("/categories/{id}", web::put().to(update_category))
            .route("/categories/{id}", web::delete().to(delete_category))
            .route("/cart", web::get().to(list_cart))
            .route("/cart", web::post().to(add_to_cart))
            .route("/cart/count", web::get().to(cart_count))
            .route("/cart/{id}", web::put().to(update_cart_line))
            .route("/cart/{id}", web::delete().to(delete_cart_line))
            .route("/orders", web::post().to(create_order)),
    );
}

pub struct FakeBackend {
    state: Shop,
    url: String,
    handle: ServerHandle,
}

impl FakeBackend {
    pub async fn start(shop: FakeShop) -> Self {
        let state: Shop = web::Data::new(Mutex::new(shop));
        let data = state.clone();
        let server = HttpServer::new(move || App::new().app_data(data.clone()).configure(routes))
            .workers(1)
            .disable_signals()
            .bind(("127.0.0.1", 0))
            .expect("bind fake backend");
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);
        Self {
            state,
            url: format!("http://{addr}"),
            handle,
        }
    }

    pub fn api(&self) -> ApiClient {
        ApiClient::new(self.url.clone())
    }

    pub fn shop(&self) -> MutexGuard<'_, FakeShop> {
        lock(&self.state)
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

/// An API client pointed at a port nothing listens on.
pub fn unreachable_api() -> ApiClient {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe port");
    let addr = listener.local_addr().expect("probe addr");
    drop(listener);
    ApiClient::new(format!("http://{addr}"))
}

pub fn templates() -> Tera {
    Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/public/**/*.html")).expect("load templates")
}

pub fn config() -> Config {
    Config::default()
}

pub fn location(resp: &ServiceResponse) -> String {
    resp.headers()
        .get(header::LOCATION)
        .expect("redirect location")
        .to_str()
        .expect("ascii location")
        .to_string()
}

pub async fn body_text(resp: ServiceResponse) -> String {
    String::from_utf8(test::read_body(resp).await.to_vec()).expect("utf-8 page")
}

macro_rules! app {
    ($backend:expr) => {
        app!($backend, $crate::support::config())
    };
    ($backend:expr, $config:expr) => {
        actix_web::test::init_service(actix_web::App::new().configure(
            shop_frontend::configure_app($crate::support::templates(), $backend.api(), $config),
        ))
        .await
    };
}

macro_rules! page {
    ($app:expr, $uri:expr) => {{
        let resp = actix_web::test::call_service(
            &$app,
            actix_web::test::TestRequest::get().uri($uri).to_request(),
        )
        .await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::OK, "GET {}", $uri);
        String::from_utf8(actix_web::test::read_body(resp).await.to_vec()).expect("utf-8 page")
    }};
}

pub fn post(uri: &str, form: &[(&str, &str)]) -> test::TestRequest {
    test::TestRequest::post().uri(uri).set_form(form)
}
