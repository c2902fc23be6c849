use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::info;

use snaplink::config::Config;
use snaplink::middleware::RequestLogger;
use snaplink::registry::Registry;
use snaplink::services::{RedirectService, ShortenService, StatsService};
use snaplink::system::logging::init_logging;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = Config::from_env();
    let _log_guard = init_logging(&config);

    // One registry for the process lifetime; records are never evicted.
    let registry = Arc::new(Registry::with_policy(
        config.random_code_length,
        config.default_validity_minutes,
    ));

    let bind_address = format!("{}:{}", config.server_host, config.server_port);
    info!("Starting server at http://{}", bind_address);
    info!("Shareable links built on {}", config.public_base_url);

    let app_config = config.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(RequestLogger)
            .wrap(Cors::permissive())
            .app_data(web::Data::new(registry.clone()))
            .app_data(web::Data::new(app_config.clone()))
            .app_data(web::JsonConfig::default().error_handler(snaplink::services::json_error_handler))
            .route(
                "/shorturls",
                web::post().to(ShortenService::create_short_url),
            )
            .route(
                "/shorturls/{shortcode}",
                web::get().to(StatsService::get_url_stats),
            )
            .route("/api/urls", web::get().to(StatsService::get_all_urls))
            .route(
                "/{shortcode}",
                web::get().to(RedirectService::handle_redirect),
            )
            .route(
                "/{shortcode}",
                web::head().to(RedirectService::handle_redirect),
            )
    })
    .bind(bind_address)?
    .run()
    .await
}
