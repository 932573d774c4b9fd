mod api;
mod config;
mod database;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::{Compress, Logger}, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::{AppConfig, StoreBackend};
use crate::database::{InMemoryStore, MongoDB, ProfileStore};

async fn build_store(config: &AppConfig) -> std::io::Result<Arc<dyn ProfileStore>> {
    if config.store_backend == StoreBackend::Memory {
        log::warn!("🧪 Using in-memory store: data is lost on restart");
        return Ok(Arc::new(InMemoryStore::new()));
    }

    log::info!("📊 Database: {} / {}", config.mongodb_uri, config.mongodb_database);
    let db = MongoDB::new(&config.mongodb_uri, &config.mongodb_database)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

    match db.ping().await {
        Ok(()) => {
            log::info!("✅ MongoDB connected successfully");
            if let Err(e) = db.ensure_indexes().await {
                log::warn!("⚠️  Could not create indexes: {}", e);
            }
        }
        Err(e) if config.store_fail_fast => {
            log::error!("❌ Failed to connect to MongoDB: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, e.to_string()));
        }
        Err(e) => {
            // Requests will fail until the server comes back
            log::warn!("⚠️  Failed to connect to MongoDB: {} (STORE_FAIL_FAST=false, starting anyway)", e);
        }
    }

    Ok(Arc::new(db))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();

    log::info!("🚀 Starting Talent Match Service...");

    let store = build_store(&config).await?;

    let store_data: web::Data<dyn ProfileStore> = web::Data::from(store);
    let bind_address = config.bind_address();
    let frontend_origin = config.frontend_origin.clone();

    log::info!("🌐 Server starting on {}", bind_address);
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", bind_address);
    log::info!("📄 OpenAPI spec at: http://{}/api-docs/openapi.json", bind_address);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&frontend_origin)
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .wrap(cors)
            .wrap(Compress::default())
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            .configure(api::configure(store_data.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
