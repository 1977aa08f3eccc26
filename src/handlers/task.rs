use actix_web::{web, HttpResponse, Result};
use uuid::Uuid;
use validator::Validate;

use crate::models::{ApiResponse, CreateTaskRequest, ErrorResponse, StageGroups, Task, UpdateTaskRequest};
use crate::services::KanbanService;
use crate::utils::errors::ServiceError;

/// Add a task to a project
#[utoipa::path(
    post,
    path = "/projects/{id}/tasks",
    tag = "tasks",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task added successfully", body = ApiResponse<Task>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse)
    )
)]
pub async fn create_task(
    service: web::Data<KanbanService>,
    path: web::Path<Uuid>,
    task_req: web::Json<CreateTaskRequest>,
) -> Result<HttpResponse, ServiceError> {
    let project_id = path.into_inner();
    log::info!("POST /projects/{}/tasks - Adding task: {}", project_id, task_req.title);

    task_req.validate()?;
    let task = service.add_task(project_id, task_req.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success("Task added successfully", task)))
}

/// Get a project's tasks grouped by stage
#[utoipa::path(
    get,
    path = "/projects/{id}/tasks",
    tag = "tasks",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Tasks retrieved successfully", body = ApiResponse<StageGroups>),
        (status = 404, description = "Project not found", body = ErrorResponse)
    )
)]
pub async fn get_tasks(
    service: web::Data<KanbanService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let project_id = path.into_inner();
    log::info!("GET /projects/{}/tasks", project_id);

    let groups = service.list_tasks_grouped(project_id).await?;

    if groups.is_empty() {
        log::info!("Project {} has no tasks yet", project_id);
    } else {
        log::info!("Retrieved {} tasks", groups.len());
    }
    Ok(HttpResponse::Ok().json(ApiResponse::success("Tasks retrieved successfully", groups)))
}

/// Get a specific task
#[utoipa::path(
    get,
    path = "/projects/{id}/tasks/{task_id}",
    tag = "tasks",
    params(
        ("id" = Uuid, Path, description = "Project ID"),
        ("task_id" = Uuid, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task retrieved successfully", body = ApiResponse<Task>),
        (status = 404, description = "Project or task not found", body = ErrorResponse)
    )
)]
pub async fn get_task(
    service: web::Data<KanbanService>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, ServiceError> {
    let (project_id, task_id) = path.into_inner();
    log::info!("GET /projects/{}/tasks/{}", project_id, task_id);

    let task = service.get_task(project_id, task_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Task retrieved successfully", task)))
}

/// Update a task's title, description, stage or attachments
#[utoipa::path(
    put,
    path = "/projects/{id}/tasks/{task_id}",
    tag = "tasks",
    params(
        ("id" = Uuid, Path, description = "Project ID"),
        ("task_id" = Uuid, Path, description = "Task ID")
    ),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task updated successfully", body = ApiResponse<Task>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Project or task not found", body = ErrorResponse)
    )
)]
pub async fn update_task(
    service: web::Data<KanbanService>,
    path: web::Path<(Uuid, Uuid)>,
    update_req: web::Json<UpdateTaskRequest>,
) -> Result<HttpResponse, ServiceError> {
    let (project_id, task_id) = path.into_inner();
    log::info!("PUT /projects/{}/tasks/{}", project_id, task_id);

    update_req.validate()?;
    let task = service.update_task(project_id, task_id, update_req.into_inner()).await?;

    log::info!("Task updated successfully: {}", task_id);
    Ok(HttpResponse::Ok().json(ApiResponse::success("Task updated successfully", task)))
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/projects/{id}/tasks/{task_id}",
    tag = "tasks",
    params(
        ("id" = Uuid, Path, description = "Project ID"),
        ("task_id" = Uuid, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task deleted successfully", body = ApiResponse<bool>),
        (status = 404, description = "Project not found", body = ErrorResponse)
    )
)]
pub async fn delete_task(
    service: web::Data<KanbanService>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, ServiceError> {
    let (project_id, task_id) = path.into_inner();
    log::info!("DELETE /projects/{}/tasks/{}", project_id, task_id);

    service.delete_task(project_id, task_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Task deleted successfully", true)))
}

pub fn task_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/projects/{id}/tasks")
            .route(web::post().to(create_task))
            .route(web::get().to(get_tasks)),
    )
    .service(
        web::resource("/projects/{id}/tasks/{task_id}")
            .route(web::get().to(get_task))
            .route(web::put().to(update_task))
            .route(web::delete().to(delete_task)),
    );
}
