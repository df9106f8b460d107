use actix_web::{http, web, App, HttpServer};
use actix_web::dev::Server;
use tracing_actix_web::TracingLogger;
use sqlx::PgPool;
use std::net::TcpListener;
use std::sync::Arc;
use actix_cors::Cors;

pub mod config;
pub mod db;
mod handlers;
pub mod live;
pub mod middleware;
pub mod models;
mod routes;
pub mod services;
pub mod telemetry;
pub mod transport;

use crate::config::jwt::JwtSettings;
use crate::config::settings::LiveSettings;
use crate::routes::init_routes;
use crate::services::LiveMatchService;

/// Start the match command endpoint on `listener`.
pub fn run(
    listener: TcpListener,
    db_pool: PgPool,
    jwt_settings: JwtSettings,
    redis_client: Option<Arc<redis::Client>>,
    live_settings: LiveSettings,
) -> Result<Server, std::io::Error> {
    // Wrap using web::Data, which boils down to an Arc smart pointer
    let jwt_settings = web::Data::new(jwt_settings);
    let live_match_service = web::Data::new(LiveMatchService::new(
        db_pool,
        redis_client,
        live_settings,
    ));

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "DELETE"])
            .allowed_headers(vec![
                http::header::AUTHORIZATION,
                http::header::ACCEPT,
                http::header::CONTENT_TYPE,
            ])
            .max_age(3600);

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(jwt_settings.clone())
            .app_data(live_match_service.clone())
            .configure(init_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
