use utoipa::OpenApi;

use crate::handlers;
use crate::models::{
    Activity, AddMemberRequest, Attachment, CreateTaskRequest, ErrorResponse, Member, MemberRole,
    MoveMemberRequest, Project, ProjectRequest, ProjectSummary, StageGroups, Task, TaskStage,
    UpdateTaskRequest,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Kanban Projects API",
        description = "Projects with embedded kanban tasks and members"
    ),
    paths(
        handlers::project::list_projects,
        handlers::project::get_project,
        handlers::project::create_project,
        handlers::project::update_project,
        handlers::project::delete_project,
        handlers::task::create_task,
        handlers::task::get_tasks,
        handlers::task::get_task,
        handlers::task::update_task,
        handlers::task::delete_task,
        handlers::member::add_member,
        handlers::member::move_member,
        handlers::member::get_members,
        handlers::activity::recent_activities,
    ),
    components(schemas(
        Project,
        ProjectSummary,
        ProjectRequest,
        Task,
        TaskStage,
        Attachment,
        StageGroups,
        CreateTaskRequest,
        UpdateTaskRequest,
        Member,
        MemberRole,
        AddMemberRequest,
        MoveMemberRequest,
        Activity,
        ErrorResponse,
    )),
    tags(
        (name = "projects", description = "Project management"),
        (name = "tasks", description = "Kanban tasks within a project"),
        (name = "members", description = "Project membership and transfers"),
        (name = "activities", description = "Recent activity feed")
    )
)]
pub struct ApiDoc;
