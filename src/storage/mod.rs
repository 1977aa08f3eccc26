//! Storage port for project aggregates and the activity log.
//!
//! The store is the only source of mutual exclusion: every mutation of a
//! project runs inside a [`ProjectTransaction`], which holds an exclusive
//! lock on each aggregate it has loaded until it commits or is dropped.

use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Activity, Project, ProjectSummary};
use crate::utils::errors::ServiceError;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

pub type StoreResult<T> = Result<T, ServiceError>;

#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Persists a new project.
    ///
    /// Fails with [`ServiceError::Conflict`] when the title is already taken.
    async fn insert(&self, project: &Project) -> StoreResult<()>;

    async fn find(&self, id: Uuid) -> StoreResult<Option<Project>>;

    async fn list(&self) -> StoreResult<Vec<ProjectSummary>>;

    /// Returns `false` when no project had that id.
    async fn remove(&self, id: Uuid) -> StoreResult<bool>;

    /// Opens a transaction. Fails with [`ServiceError::TransactionAborted`]
    /// if it cannot be started within `deadline`; the same deadline bounds
    /// lock waits inside the transaction.
    async fn begin(&self, deadline: Duration) -> StoreResult<Box<dyn ProjectTransaction>>;

    async fn stats(&self) -> StoreResult<StorageStats>;
}

/// A unit of work over one or more project aggregates.
///
/// Dropping a transaction without calling [`ProjectTransaction::commit`]
/// discards every staged change.
#[async_trait]
pub trait ProjectTransaction: Send {
    /// Loads a project and locks it for the rest of the transaction.
    async fn load_for_update(&mut self, id: Uuid) -> StoreResult<Option<Project>>;

    /// Writes the project back and updates its `revision` to the stored value.
    async fn save(&mut self, project: &mut Project) -> StoreResult<()>;

    async fn commit(self: Box<Self>) -> StoreResult<()>;
}

#[async_trait]
pub trait ActivityStore: Send + Sync {
    async fn append(&self, activity: &Activity) -> StoreResult<()>;

    /// Most recent `limit` entries, newest first.
    async fn recent(&self, limit: usize) -> StoreResult<Vec<Activity>>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorageStats {
    pub projects: i64,
    pub activities: i64,
}

impl StorageStats {
    pub fn log_stats(&self) {
        log::info!("📈 Storage Statistics:");
        log::info!("   📋 Projects: {}", self.projects);
        log::info!("   📝 Activities: {}", self.activities);
    }
}
