use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use scoring_api::{config::Config, database, handlers, DecisionDispatcher};
use scoring_engine::{CreditRiskScorer, DecisionRecorder, FraudScorer, NoopRecorder};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .json()
        .init();

    info!("Starting Scoring API...");

    // Load configuration
    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, format!("Configuration error: {}", e))
    })?;
    info!(
        "Configuration loaded (environment: {}, debug: {})",
        config.app.environment, config.app.debug
    );

    // Persistence is optional; scoring works without it
    let pool = if config.database.enabled {
        info!("Connecting to database at {}", config.database.url);
        let pool = database::create_pool(&config.database.url, config.database.max_connections)
            .await
            .map_err(|e| {
                error!("Failed to create database pool: {}", e);
                std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("Database connection failed: {}", e),
                )
            })?;

        if let Err(e) = database::migrate(&pool).await {
            error!("Database migration failed: {}", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                "Database schema could not be created",
            ));
        }
        info!("Database ready");
        Some(pool)
    } else {
        warn!("Database disabled; decisions will not be recorded");
        None
    };

    let recorder: Arc<dyn DecisionRecorder> = match &pool {
        Some(pool) => Arc::new(database::SqliteRecorder::new(pool.clone())),
        None => Arc::new(NoopRecorder),
    };
    let dispatcher = DecisionDispatcher::new(recorder);
    info!("Decision recorder: {}", dispatcher.recorder_name());

    let server_config = config.server.clone();
    let app_config = config.app.clone();
    let cors_config = config.cors.clone();

    info!(
        "Starting HTTP server on {}:{}",
        server_config.host, server_config.port
    );

    HttpServer::new(move || {
        let cors = if cors_config.allows_any_origin() {
            Cors::default().allow_any_origin()
        } else {
            cors_config
                .allowed_origins
                .iter()
                .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        };

        let mut app = App::new()
            .app_data(web::Data::new(app_config.clone()))
            .app_data(web::Data::new(CreditRiskScorer::new()))
            .app_data(web::Data::new(FraudScorer::new()))
            .app_data(web::Data::new(dispatcher.clone()));
        if let Some(pool) = &pool {
            app = app.app_data(web::Data::new(pool.clone()));
        }

        app.wrap(
            cors.allow_any_method()
                .allow_any_header()
                .supports_credentials()
                .max_age(3600),
        )
        .wrap(middleware::Logger::default())
        .configure(handlers::configure_routes)
    })
    .workers(server_config.workers)
    .bind((server_config.host, server_config.port))?
    .run()
    .await
}
