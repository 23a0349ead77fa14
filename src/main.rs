use actix_files::Files;
use actix_web::{App, HttpServer, middleware::Logger};
use anyhow::Context;
use dotenvy::dotenv;
use tera::Tera;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shop_frontend::{config::Config, configure_app, handlers::ApiClient};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load()?;
    let tera = Tera::new(&config.templates)
        .with_context(|| format!("failed to load templates from {}", config.templates))?;
    let api = ApiClient::new(config.api_url.clone());

    let bind = (config.host.clone(), config.port);
    info!(api = %api.base_url(), host = %bind.0, port = bind.1, "starting storefront");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(configure_app(tera.clone(), api.clone(), config.clone()))
            .service(Files::new("/static", &config.static_dir))
    })
    .bind(bind)?
    .run()
    .await?;

    Ok(())
}
