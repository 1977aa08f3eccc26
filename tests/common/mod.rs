#![allow(dead_code)]

use std::time::Duration;

use kanban_projects::models::{
    Activity, AddMemberRequest, CreateTaskRequest, MemberRole, Project, ProjectRequest,
};
use kanban_projects::services::{KanbanService, ServiceSettings};
use kanban_projects::storage::MemoryStore;

pub fn settings() -> ServiceSettings {
    ServiceSettings {
        transaction_timeout: Duration::from_millis(500),
        recent_activity_limit: 10,
    }
}

pub fn service_with_store() -> (KanbanService, MemoryStore) {
    let store = MemoryStore::new();
    (KanbanService::in_memory(store.clone(), settings()), store)
}

pub fn project_request(title: &str) -> ProjectRequest {
    ProjectRequest {
        title: title.to_string(),
        description: format!("{title} board"),
    }
}

pub fn task_request(title: &str) -> CreateTaskRequest {
    CreateTaskRequest {
        title: title.to_string(),
        description: format!("{title} details"),
        attachments: vec![],
    }
}

pub fn member_request(id: &str, name: &str, role: MemberRole) -> AddMemberRequest {
    AddMemberRequest {
        id: id.to_string(),
        name: name.to_string(),
        role,
    }
}

pub async fn create_project(service: &KanbanService, title: &str) -> Project {
    service
        .create_project(project_request(title))
        .await
        .expect("project creation should succeed")
}

/// Activity writes are detached, so poll until `count` entries are visible.
pub async fn wait_for_activity(service: &KanbanService, count: usize) -> Vec<Activity> {
    for _ in 0..100 {
        let recent = service
            .recent_activity(Some(count))
            .await
            .expect("activity query should succeed");
        if recent.len() >= count {
            return recent;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("expected at least {count} activity entries");
}
