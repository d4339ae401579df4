use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use pdf_grader::api::{configure_routes, AppState};
use pdf_grader::{banner, config};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    banner::print_banner();

    // A missing .env is fine; the process environment may already be set.
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("ℹ️  No .env file loaded: {}", e);
    }

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let app_config = match config::AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    if app_config.gemini.api_key.is_none() {
        log::warn!("⚠️  GEMINI_API_KEY is not set; evaluations will fail until it is configured");
    }

    let host = app_config.server.host.clone();
    let port = app_config.server.port;
    let state = AppState::new(app_config);

    println!("🚀 Starting server...");
    println!("📊 Grader available at http://{}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
