//! In-process backend used when no database is configured, and by tests.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::models::{Activity, Project, ProjectSummary};
use crate::storage::{ActivityStore, ProjectStore, ProjectTransaction, StorageStats, StoreResult};
use crate::utils::errors::ServiceError;

/// Whole-store lock: a transaction owns the guard until it commits or drops,
/// so readers only ever see committed state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    projects: HashMap<Uuid, Project>,
    activities: Vec<Activity>,
    failing_saves: HashSet<Uuid>,
    failing_activity: bool,
}

impl MemoryState {
    fn title_taken(&self, title: &str, except: Uuid) -> bool {
        self.projects.values().any(|p| p.id != except && p.title == title)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every transactional save of `project_id` fail with a storage error.
    #[cfg(any(test, feature = "test-support"))]
    pub async fn fail_saves_for(&self, project_id: Uuid) {
        self.state.lock().await.failing_saves.insert(project_id);
    }

    #[cfg(any(test, feature = "test-support"))]
    pub async fn clear_failures(&self) {
        let mut state = self.state.lock().await;
        state.failing_saves.clear();
        state.failing_activity = false;
    }

    /// Makes activity appends fail.
    #[cfg(any(test, feature = "test-support"))]
    pub async fn fail_activity_writes(&self) {
        self.state.lock().await.failing_activity = true;
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn insert(&self, project: &Project) -> StoreResult<()> {
        let mut state = self.state.lock().await;
        if state.title_taken(&project.title, project.id) {
            return Err(ServiceError::Conflict("Title must be unique".to_string()));
        }
        if state.projects.contains_key(&project.id) {
            return Err(ServiceError::Conflict(format!("Project {} already exists", project.id)));
        }
        state.projects.insert(project.id, project.clone());
        Ok(())
    }

    async fn find(&self, id: Uuid) -> StoreResult<Option<Project>> {
        Ok(self.state.lock().await.projects.get(&id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<ProjectSummary>> {
        let state = self.state.lock().await;
        let mut projects: Vec<ProjectSummary> = state.projects.values().map(Project::summary).collect();
        projects.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(projects)
    }

    async fn remove(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.state.lock().await.projects.remove(&id).is_some())
    }

    async fn begin(&self, deadline: Duration) -> StoreResult<Box<dyn ProjectTransaction>> {
        let guard = tokio::time::timeout(deadline, Arc::clone(&self.state).lock_owned())
            .await
            .map_err(|_| {
                ServiceError::TransactionAborted("Timed out waiting to begin a transaction".to_string())
            })?;

        Ok(Box::new(MemoryTransaction {
            guard,
            staged: HashMap::new(),
        }))
    }

    async fn stats(&self) -> StoreResult<StorageStats> {
        let state = self.state.lock().await;
        Ok(StorageStats {
            projects: state.projects.len() as i64,
            activities: state.activities.len() as i64,
        })
    }
}

struct MemoryTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    staged: HashMap<Uuid, Project>,
}

impl MemoryTransaction {
    fn current(&self, id: Uuid) -> Option<&Project> {
        self.staged.get(&id).or_else(|| self.guard.projects.get(&id))
    }
}

#[async_trait]
impl ProjectTransaction for MemoryTransaction {
    async fn load_for_update(&mut self, id: Uuid) -> StoreResult<Option<Project>> {
        Ok(self.current(id).cloned())
    }

    async fn save(&mut self, project: &mut Project) -> StoreResult<()> {
        if self.guard.failing_saves.contains(&project.id) {
            return Err(ServiceError::Storage(format!("injected save failure for project {}", project.id)));
        }

        let revision = self
            .current(project.id)
            .map(|p| p.revision)
            .ok_or_else(|| ServiceError::NotFound("Project not found".to_string()))?;

        let title_taken = self
            .guard
            .projects
            .keys()
            .chain(self.staged.keys())
            .filter(|id| **id != project.id)
            .filter_map(|id| self.current(*id))
            .any(|p| p.title == project.title);
        if title_taken {
            return Err(ServiceError::Conflict("Title must be unique".to_string()));
        }

        project.revision = revision + 1;
        self.staged.insert(project.id, project.clone());
        Ok(())
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        let MemoryTransaction { mut guard, staged } = *self;
        guard.projects.extend(staged);
        Ok(())
    }
}

#[async_trait]
impl ActivityStore for MemoryStore {
    async fn append(&self, activity: &Activity) -> StoreResult<()> {
        let mut state = self.state.lock().await;
        if state.failing_activity {
            return Err(ServiceError::Storage("injected activity write failure".to_string()));
        }
        state.activities.push(activity.clone());
        Ok(())
    }

    async fn recent(&self, limit: usize) -> StoreResult<Vec<Activity>> {
        let state = self.state.lock().await;
        let mut activities: Vec<Activity> = state.activities.iter().rev().cloned().collect();
        // Stable sort keeps later appends first among equal timestamps.
        activities.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        activities.truncate(limit);
        Ok(activities)
    }
}
