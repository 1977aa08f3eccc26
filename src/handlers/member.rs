use actix_web::{web, HttpResponse, Result};
use uuid::Uuid;
use validator::Validate;

use crate::models::{AddMemberRequest, ApiResponse, ErrorResponse, Member, MoveMemberRequest};
use crate::services::KanbanService;
use crate::utils::errors::ServiceError;

/// Add a member to a project
#[utoipa::path(
    post,
    path = "/projects/{id}/members",
    tag = "members",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    request_body = AddMemberRequest,
    responses(
        (status = 201, description = "Member added successfully", body = ApiResponse<Member>),
        (status = 400, description = "Member ID, name, and role are required", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 409, description = "Member already in project", body = ErrorResponse)
    )
)]
pub async fn add_member(
    service: web::Data<KanbanService>,
    path: web::Path<Uuid>,
    member_req: web::Json<AddMemberRequest>,
) -> Result<HttpResponse, ServiceError> {
    let project_id = path.into_inner();
    log::info!("POST /projects/{}/members - Adding member: {}", project_id, member_req.id);

    member_req.validate()?;
    let member = service.add_member(project_id, member_req.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success("Member added successfully", member)))
}

/// Move a member to another project
#[utoipa::path(
    put,
    path = "/projects/{id}/members/{member_id}",
    tag = "members",
    params(
        ("id" = Uuid, Path, description = "Source project ID"),
        ("member_id" = String, Path, description = "Member ID")
    ),
    request_body = MoveMemberRequest,
    responses(
        (status = 200, description = "Member moved successfully", body = ApiResponse<Member>),
        (status = 400, description = "Invalid destination project", body = ErrorResponse),
        (status = 404, description = "Project or member not found", body = ErrorResponse),
        (status = 503, description = "Transfer aborted, safe to retry", body = ErrorResponse)
    )
)]
pub async fn move_member(
    service: web::Data<KanbanService>,
    path: web::Path<(Uuid, String)>,
    move_req: web::Json<MoveMemberRequest>,
) -> Result<HttpResponse, ServiceError> {
    let (source_id, member_id) = path.into_inner();
    log::info!(
        "PUT /projects/{}/members/{} - Moving to project {}",
        source_id, member_id, move_req.new_project_id
    );

    let member = service
        .move_member(source_id, &member_id, move_req.new_project_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Member moved successfully", member)))
}

/// List the members of a project
#[utoipa::path(
    get,
    path = "/projects/{id}/members",
    tag = "members",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Members retrieved successfully", body = ApiResponse<Vec<Member>>),
        (status = 404, description = "Project not found", body = ErrorResponse)
    )
)]
pub async fn get_members(
    service: web::Data<KanbanService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let project_id = path.into_inner();
    log::info!("GET /projects/{}/members", project_id);

    let members = service.list_members(project_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Members retrieved successfully", members)))
}

pub fn member_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/projects/{id}/members")
            .route(web::post().to(add_member))
            .route(web::get().to(get_members)),
    )
    .service(
        web::resource("/projects/{id}/members/{member_id}")
            .route(web::put().to(move_member)),
    );
}
