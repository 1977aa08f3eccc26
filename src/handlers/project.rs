use actix_web::{web, HttpResponse, Result};
use uuid::Uuid;
use validator::Validate;

use crate::models::{ApiResponse, ErrorResponse, Project, ProjectRequest, ProjectSummary};
use crate::services::KanbanService;
use crate::utils::errors::ServiceError;

/// List all projects (tasks and members omitted)
#[utoipa::path(
    get,
    path = "/projects",
    tag = "projects",
    responses(
        (status = 200, description = "Projects retrieved successfully", body = ApiResponse<Vec<ProjectSummary>>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_projects(service: web::Data<KanbanService>) -> Result<HttpResponse, ServiceError> {
    log::info!("GET /projects");

    let projects = service.list_projects().await?;

    log::info!("Retrieved {} projects", projects.len());
    Ok(HttpResponse::Ok().json(ApiResponse::success("Projects retrieved successfully", projects)))
}

/// Get a project with its tasks and members
#[utoipa::path(
    get,
    path = "/projects/{id}",
    tag = "projects",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project retrieved successfully", body = ApiResponse<Project>),
        (status = 404, description = "Project not found", body = ErrorResponse)
    )
)]
pub async fn get_project(
    service: web::Data<KanbanService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let project_id = path.into_inner();
    log::info!("GET /projects/{}", project_id);

    let project = service.get_project(project_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Project retrieved successfully", project)))
}

/// Create a new project
#[utoipa::path(
    post,
    path = "/projects",
    tag = "projects",
    request_body = ProjectRequest,
    responses(
        (status = 201, description = "Project created successfully", body = ApiResponse<Project>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Title already in use", body = ErrorResponse)
    )
)]
pub async fn create_project(
    service: web::Data<KanbanService>,
    project_req: web::Json<ProjectRequest>,
) -> Result<HttpResponse, ServiceError> {
    log::info!("POST /projects - Creating new project: {}", project_req.title);

    project_req.validate()?;
    let project = service.create_project(project_req.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success("Project created successfully", project)))
}

/// Update a project's title and description
#[utoipa::path(
    put,
    path = "/projects/{id}",
    tag = "projects",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    request_body = ProjectRequest,
    responses(
        (status = 200, description = "Project updated successfully", body = ApiResponse<Project>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 409, description = "Title already in use", body = ErrorResponse)
    )
)]
pub async fn update_project(
    service: web::Data<KanbanService>,
    path: web::Path<Uuid>,
    project_req: web::Json<ProjectRequest>,
) -> Result<HttpResponse, ServiceError> {
    let project_id = path.into_inner();
    log::info!("PUT /projects/{}", project_id);

    project_req.validate()?;
    let project = service.update_project(project_id, project_req.into_inner()).await?;

    log::info!("Project updated successfully: {}", project_id);
    Ok(HttpResponse::Ok().json(ApiResponse::success("Project updated successfully", project)))
}

/// Delete a project together with its tasks and members
#[utoipa::path(
    delete,
    path = "/projects/{id}",
    tag = "projects",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project deleted successfully", body = ApiResponse<bool>),
        (status = 404, description = "Project not found", body = ErrorResponse)
    )
)]
pub async fn delete_project(
    service: web::Data<KanbanService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let project_id = path.into_inner();
    log::info!("DELETE /projects/{}", project_id);

    service.delete_project(project_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Project deleted successfully", true)))
}

pub fn project_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/projects")
            .route(web::get().to(list_projects))
            .route(web::post().to(create_project)),
    )
    .service(
        web::resource("/projects/{id}")
            .route(web::get().to(get_project))
            .route(web::put().to(update_project))
            .route(web::delete().to(delete_project)),
    );
}
