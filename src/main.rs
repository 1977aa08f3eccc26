use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use anyhow::Context;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use kanban_projects::docs::ApiDoc;
use kanban_projects::handlers;
use kanban_projects::services::{KanbanService, ServiceSettings};
use kanban_projects::storage::{MemoryStore, PgStore, ProjectStore};
use kanban_projects::{AppConfig, Database};

async fn build_service(config: &AppConfig) -> anyhow::Result<KanbanService> {
    let settings = ServiceSettings::from(config);

    let Some(database_url) = config.database_url.as_deref() else {
        log::warn!("⚠️  DATABASE_URL not set, using the in-memory store (data is lost on restart)");
        return Ok(KanbanService::in_memory(MemoryStore::new(), settings));
    };

    let db = Database::new(database_url, config.max_connections).await?;
    db.migrate().await?;
    db.health_check().await?;

    let store = PgStore::new(db);
    match store.stats().await {
        Ok(stats) => stats.log_stats(),
        Err(e) => log::warn!("Could not read storage statistics: {}", e),
    }

    let store = Arc::new(store);
    Ok(KanbanService::new(store.clone(), store, settings))
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Loads .env first so RUST_LOG from the file is honoured
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("🚀 Starting Kanban Projects API on port {} ({})", config.port, config.environment);
    log::info!("📋 Allowed frontend URLs: {}", config.frontend_urls.join(","));

    let service = actix_web::web::Data::new(build_service(&config).await?);
    let allowed_origins = config.frontend_urls.clone();
    let openapi = ApiDoc::openapi();

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                "Content-Type",
                "Accept",
                "Origin",
                "X-Requested-With",
            ]);

        // Add allowed origins
        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(service.clone())
            .configure(handlers::configure)
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()))
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await?;

    Ok(())
}
