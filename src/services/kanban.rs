use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::config::AppConfig;
use crate::models::{
    Activity, AddMemberRequest, CreateTaskRequest, Member, Project, ProjectRequest, ProjectSummary,
    StageGroups, Task, UpdateTaskRequest,
};
use crate::services::activity::ActivityLog;
use crate::services::{ordering, transfer};
use crate::storage::{ActivityStore, MemoryStore, ProjectStore, StorageStats};
use crate::utils::errors::ServiceError;

#[derive(Debug, Clone, Copy)]
pub struct ServiceSettings {
    pub transaction_timeout: Duration,
    pub recent_activity_limit: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        ServiceSettings {
            transaction_timeout: Duration::from_secs(5),
            recent_activity_limit: 10,
        }
    }
}

impl From<&AppConfig> for ServiceSettings {
    fn from(config: &AppConfig) -> Self {
        ServiceSettings {
            transaction_timeout: config.transaction_timeout,
            recent_activity_limit: config.recent_activity_limit,
        }
    }
}

/// Entry point for callers: turns already-validated requests into store
/// operations and hands back plain result payloads.
#[derive(Clone)]
pub struct KanbanService {
    projects: Arc<dyn ProjectStore>,
    activity: ActivityLog,
    settings: ServiceSettings,
}

impl KanbanService {
    pub fn new(
        projects: Arc<dyn ProjectStore>,
        activities: Arc<dyn ActivityStore>,
        settings: ServiceSettings,
    ) -> Self {
        KanbanService {
            projects,
            activity: ActivityLog::new(activities),
            settings,
        }
    }

    pub fn in_memory(store: MemoryStore, settings: ServiceSettings) -> Self {
        Self::new(Arc::new(store.clone()), Arc::new(store), settings)
    }

    pub async fn list_projects(&self) -> Result<Vec<ProjectSummary>, ServiceError> {
        self.projects.list().await
    }

    pub async fn get_project(&self, project_id: Uuid) -> Result<Project, ServiceError> {
        self.projects
            .find(project_id)
            .await?
            .ok_or_else(project_not_found)
    }

    pub async fn create_project(&self, request: ProjectRequest) -> Result<Project, ServiceError> {
        let project = Project::new(request.title, request.description);
        self.projects.insert(&project).await?;

        log::info!("Project created successfully with ID: {}", project.id);
        self.activity.record(format!("Project \"{}\" created", project.title));
        Ok(project)
    }

    pub async fn update_project(
        &self,
        project_id: Uuid,
        request: ProjectRequest,
    ) -> Result<Project, ServiceError> {
        self.mutate_project(project_id, |project| {
            project.title = request.title;
            project.description = request.description;
            Ok(())
        })
        .await
        .map(|(project, ())| project)
    }

    pub async fn delete_project(&self, project_id: Uuid) -> Result<(), ServiceError> {
        if !self.projects.remove(project_id).await? {
            return Err(project_not_found());
        }
        log::info!("Project deleted successfully: {}", project_id);
        Ok(())
    }

    pub async fn add_task(
        &self,
        project_id: Uuid,
        request: CreateTaskRequest,
    ) -> Result<Task, ServiceError> {
        let (project, task) = self
            .mutate_project(project_id, |project| {
                let (order, index) = ordering::next_position(&project.tasks);
                let task = Task::new(request, order, index);
                project.tasks.push(task.clone());
                Ok(task)
            })
            .await?;

        log::info!("Task {} added to project {} (order {}, index {})", task.id, project_id, task.order, task.index);
        self.activity.record(format!("Task \"{}\" added to project \"{}\"", task.title, project.title));
        Ok(task)
    }

    pub async fn get_task(&self, project_id: Uuid, task_id: Uuid) -> Result<Task, ServiceError> {
        let project = self.get_project(project_id).await?;
        project.task(task_id).cloned().ok_or_else(task_not_found)
    }

    pub async fn list_tasks_grouped(&self, project_id: Uuid) -> Result<StageGroups, ServiceError> {
        let project = self.get_project(project_id).await?;
        Ok(ordering::group_by_stage(&project.tasks))
    }

    pub async fn update_task(
        &self,
        project_id: Uuid,
        task_id: Uuid,
        changes: UpdateTaskRequest,
    ) -> Result<Task, ServiceError> {
        self.mutate_project(project_id, |project| {
            let task = project
                .tasks
                .iter_mut()
                .find(|t| t.id == task_id)
                .ok_or_else(task_not_found)?;
            task.apply(changes);
            Ok(task.clone())
        })
        .await
        .map(|(_, task)| task)
    }

    /// Deleting a task that is already gone is not an error and leaves the
    /// project untouched.
    pub async fn delete_task(&self, project_id: Uuid, task_id: Uuid) -> Result<(), ServiceError> {
        let mut tx = self.projects.begin(self.settings.transaction_timeout).await?;
        let mut project = tx
            .load_for_update(project_id)
            .await?
            .ok_or_else(project_not_found)?;

        let before = project.tasks.len();
        project.tasks.retain(|t| t.id != task_id);
        if project.tasks.len() == before {
            // dropping the transaction releases the lock without a write
            log::warn!("Task {} was not present in project {}", task_id, project_id);
            return Ok(());
        }

        project.touch();
        tx.save(&mut project).await?;
        tx.commit().await?;

        log::info!("Task deleted successfully: {}", task_id);
        Ok(())
    }

    pub async fn add_member(
        &self,
        project_id: Uuid,
        request: AddMemberRequest,
    ) -> Result<Member, ServiceError> {
        let (project, member) = self
            .mutate_project(project_id, |project| {
                if project.member(&request.id).is_some() {
                    return Err(ServiceError::Conflict(format!(
                        "Member {} already belongs to this project",
                        request.id
                    )));
                }
                let member = Member::new(request);
                project.members.push(member.clone());
                Ok(member)
            })
            .await?;

        self.activity.record(format!("Member \"{}\" added to project \"{}\"", member.name, project.title));
        Ok(member)
    }

    pub async fn move_member(
        &self,
        source_id: Uuid,
        member_id: &str,
        destination_id: Uuid,
    ) -> Result<Member, ServiceError> {
        let moved = transfer::move_member(
            self.projects.as_ref(),
            self.settings.transaction_timeout,
            source_id,
            member_id,
            destination_id,
        )
        .await?;

        self.activity.record(format!(
            "Member \"{}\" moved from \"{}\" to \"{}\"",
            moved.member.name, moved.source_title, moved.destination_title
        ));
        Ok(moved.member)
    }

    pub async fn list_members(&self, project_id: Uuid) -> Result<Vec<Member>, ServiceError> {
        Ok(self.get_project(project_id).await?.members)
    }

    pub async fn recent_activity(&self, limit: Option<usize>) -> Result<Vec<Activity>, ServiceError> {
        let limit = limit.unwrap_or(self.settings.recent_activity_limit);
        self.activity.recent(limit).await
    }

    pub async fn stats(&self) -> Result<StorageStats, ServiceError> {
        self.projects.stats().await
    }

    /// Read-modify-write of one project under the store's lock for it.
    async fn mutate_project<T, F>(&self, project_id: Uuid, f: F) -> Result<(Project, T), ServiceError>
    where
        F: FnOnce(&mut Project) -> Result<T, ServiceError> + Send,
        T: Send,
    {
        let mut tx = self.projects.begin(self.settings.transaction_timeout).await?;
        let mut project = tx
            .load_for_update(project_id)
            .await?
            .ok_or_else(project_not_found)?;

        let output = f(&mut project)?;
        project.touch();
        tx.save(&mut project).await?;
        tx.commit().await?;

        Ok((project, output))
    }
}

fn project_not_found() -> ServiceError {
    ServiceError::NotFound("Project not found".to_string())
}

fn task_not_found() -> ServiceError {
    ServiceError::NotFound("Task not found".to_string())
}
