pub mod activity;
pub mod member;
pub mod project;
pub mod response;
pub mod task;

pub use activity::Activity;
pub use member::{AddMemberRequest, Member, MemberRole, MoveMemberRequest};
pub use project::{Project, ProjectRequest, ProjectSummary};
pub use response::{ApiResponse, ErrorResponse};
pub use task::{Attachment, CreateTaskRequest, StageGroups, Task, TaskStage, UpdateTaskRequest};
