use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum MemberRole {
    Developer,
    Designer,
    Manager,
    QA,
}

/// A project member. `id` is supplied by the caller and is unique within
/// the owning project's member set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub role: MemberRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    pub fn new(request: AddMemberRequest) -> Self {
        let now = Utc::now();
        Member {
            id: request.id,
            name: request.name,
            role: request.role,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddMemberRequest {
    #[validate(length(min = 1, message = "Member ID is required"))]
    pub id: String,
    #[validate(length(min = 1, message = "Member name is required"))]
    pub name: String,
    pub role: MemberRole,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MoveMemberRequest {
    #[serde(rename = "newProjectId", alias = "destProjectId")]
    pub new_project_id: Uuid,
}
