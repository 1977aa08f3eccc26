use actix_web::{web, HttpResponse, Result};

use crate::models::activity::ActivityQuery;
use crate::models::{Activity, ApiResponse, ErrorResponse};
use crate::services::KanbanService;
use crate::utils::errors::ServiceError;

/// List the most recent activity entries, newest first
#[utoipa::path(
    get,
    path = "/activities",
    tag = "activities",
    params(ActivityQuery),
    responses(
        (status = 200, description = "Activities retrieved successfully", body = ApiResponse<Vec<Activity>>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn recent_activities(
    service: web::Data<KanbanService>,
    query: web::Query<ActivityQuery>,
) -> Result<HttpResponse, ServiceError> {
    log::info!("GET /activities");

    let activities = service.recent_activity(query.limit).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Activities retrieved successfully", activities)))
}

pub fn activity_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/activities", web::get().to(recent_activities));
}
