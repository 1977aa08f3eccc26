use actix_web::{web, HttpResponse, Result};
use serde_json::json;

use crate::models::ApiResponse;
use crate::services::KanbanService;

pub async fn health_check(service: web::Data<KanbanService>) -> Result<HttpResponse> {
    match service.stats().await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            "Kanban Projects API is running",
            json!({
                "status": "ok",
                "storage": "connected",
                "stats": {
                    "projects": stats.projects,
                    "activities": stats.activities
                }
            })
        ))),
        Err(e) => {
            log::error!("Storage health check failed: {}", e);
            Ok(HttpResponse::ServiceUnavailable().json(json!({
                "status": "error",
                "message": "Storage connection failed",
                "kind": e.kind()
            })))
        }
    }
}

pub async fn api_root() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "name": "Kanban Projects API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "REST API for project boards, tasks and members"
    })))
}

pub fn health_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/", web::get().to(api_root));
}
