mod config;
mod handlers;
mod response;
mod types;
mod upstream;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};

use crate::config::{AppState, ServerConfig};
use crate::upstream::GeminiClient;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(
        "starting bubble hint api: bind_addr={} model={} upstream_timeout_secs={} max_image_bytes={}",
        config.bind_addr,
        config.model,
        config.upstream_timeout_secs,
        config.max_image_bytes
    );

    let state = AppState {
        upstream: GeminiClient::new(&config),
        config: config.clone(),
    };
    let bind_addr = config.bind_addr.clone();
    let json_limit = config.json_limit_bytes;

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .expose_any_header()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::JsonConfig::default().limit(json_limit))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .route("/health", web::get().to(handlers::health))
            .service(
                web::resource("/api/strategic-hint")
                    .route(web::post().to(handlers::strategic_hint))
                    .route(web::route().to(handlers::method_not_allowed)),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
