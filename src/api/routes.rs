// src/api/routes.rs
use actix_web::web;
use super::handlers;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(handlers::health_check))
            .route("/state", web::get().to(handlers::get_state))
            .route("/evaluate", web::post().to(handlers::evaluate))
            .service(
                web::scope("/files")
                    .route("/{slot}", web::put().to(handlers::upload_file))
                    .route("/{slot}", web::delete().to(handlers::remove_file))
            )
    )
    .route("/assets/{path:.*}", web::get().to(handlers::static_asset))
    .route("/", web::get().to(handlers::index));
}
