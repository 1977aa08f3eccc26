use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Kanban column a task sits in. Any stage may follow any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum TaskStage {
    #[default]
    Requested,
    #[serde(rename = "To Do", alias = "ToDo")]
    ToDo,
    #[serde(rename = "In Progress", alias = "InProgress")]
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Attachment {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub stage: TaskStage,
    /// Position in the project's task list when the task was inserted.
    pub order: i64,
    /// Strictly increasing insertion tie-breaker, independent of `order`.
    pub index: i64,
    #[serde(default, alias = "attachment")]
    pub attachments: Vec<Attachment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn new(request: CreateTaskRequest, order: i64, index: i64) -> Self {
        let now = Utc::now();
        Task {
            id: Uuid::new_v4(),
            title: request.title,
            description: request.description,
            stage: TaskStage::Requested,
            order,
            index,
            attachments: request.attachments,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies only the fields present in `changes`.
    pub fn apply(&mut self, changes: UpdateTaskRequest) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(stage) = changes.stage {
            self.stage = stage;
        }
        if let Some(attachments) = changes.attachments {
            self.attachments = attachments;
        }
        self.updated_at = Utc::now();
    }
}

/// Tasks of one project partitioned by stage, each group in board order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StageGroups {
    pub requested: Vec<Task>,
    pub todo: Vec<Task>,
    pub in_progress: Vec<Task>,
    pub completed: Vec<Task>,
}

impl StageGroups {
    pub fn len(&self) -> usize {
        self.requested.len() + self.todo.len() + self.in_progress.len() + self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTaskRequest {
    #[validate(length(min = 3, max = 30, message = "Title must be between 3 and 30 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[serde(default, alias = "attachment")]
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 3, max = 30, message = "Title must be between 3 and 30 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,
    pub stage: Option<TaskStage>,
    #[serde(alias = "attachment")]
    pub attachments: Option<Vec<Attachment>>,
}
