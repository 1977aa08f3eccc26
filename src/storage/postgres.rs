//! PostgreSQL backend. One row per project with tasks and members embedded
//! as JSONB; one row per activity entry.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, Postgres, Transaction};
use uuid::Uuid;

use crate::database::Database;
use crate::models::{Activity, Member, Project, ProjectSummary, Task};
use crate::storage::{ActivityStore, ProjectStore, ProjectTransaction, StorageStats, StoreResult};
use crate::utils::errors::ServiceError;

const PROJECT_COLUMNS: &str =
    "id, title, description, tasks, members, revision, created_at, updated_at";

#[derive(Debug, FromRow)]
struct ProjectRow {
    id: Uuid,
    title: String,
    description: String,
    tasks: Json<Vec<Task>>,
    members: Json<Vec<Member>>,
    revision: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            title: row.title,
            description: row.description,
            tasks: row.tasks.0,
            members: row.members.0,
            revision: row.revision,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PgStore {
    db: Database,
}

impl PgStore {
    pub fn new(db: Database) -> Self {
        PgStore { db }
    }
}

#[async_trait]
impl ProjectStore for PgStore {
    async fn insert(&self, project: &Project) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO projects (id, title, description, tasks, members, revision, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"
        )
        .bind(project.id)
        .bind(&project.title)
        .bind(&project.description)
        .bind(Json(&project.tasks))
        .bind(Json(&project.members))
        .bind(project.revision)
        .bind(project.created_at)
        .bind(project.updated_at)
        .execute(&self.db.pool)
        .await
        .map_err(|e| {
            log::error!("Database error creating project: {}", e);
            ServiceError::from(e)
        })?;

        Ok(())
    }

    async fn find(&self, id: Uuid) -> StoreResult<Option<Project>> {
        let query = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1");
        let row = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .fetch_optional(&self.db.pool)
            .await?;

        Ok(row.map(Project::from))
    }

    async fn list(&self) -> StoreResult<Vec<ProjectSummary>> {
        let projects = sqlx::query_as::<_, ProjectSummary>(
            "SELECT id, title, description, created_at, updated_at FROM projects ORDER BY created_at, id"
        )
        .fetch_all(&self.db.pool)
        .await?;

        Ok(projects)
    }

    async fn remove(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.db.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn begin(&self, deadline: Duration) -> StoreResult<Box<dyn ProjectTransaction>> {
        let mut tx = tokio::time::timeout(deadline, self.db.pool.begin())
            .await
            .map_err(|_| {
                ServiceError::TransactionAborted("Timed out waiting to begin a transaction".to_string())
            })??;

        // Bound lock waits and statements by the same deadline; expiry aborts the transaction.
        let millis = deadline.as_millis().max(1);
        let lock_timeout = format!("SET LOCAL lock_timeout = '{millis}ms'");
        let statement_timeout = format!("SET LOCAL statement_timeout = '{millis}ms'");
        sqlx::query(&lock_timeout).execute(&mut *tx).await?;
        sqlx::query(&statement_timeout).execute(&mut *tx).await?;

        Ok(Box::new(PgTransaction { tx }))
    }

    async fn stats(&self) -> StoreResult<StorageStats> {
        self.db.get_stats().await.map_err(|e| {
            log::error!("Failed to collect storage statistics: {:#}", e);
            ServiceError::Storage(e.to_string())
        })
    }
}

struct PgTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl ProjectTransaction for PgTransaction {
    async fn load_for_update(&mut self, id: Uuid) -> StoreResult<Option<Project>> {
        let query = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1 FOR UPDATE");
        let row = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;

        Ok(row.map(Project::from))
    }

    async fn save(&mut self, project: &mut Project) -> StoreResult<()> {
        let revision: Option<i64> = sqlx::query_scalar(
            "UPDATE projects
             SET title = $2, description = $3, tasks = $4, members = $5,
                 revision = revision + 1, updated_at = $6
             WHERE id = $1
             RETURNING revision"
        )
        .bind(project.id)
        .bind(&project.title)
        .bind(&project.description)
        .bind(Json(&project.tasks))
        .bind(Json(&project.members))
        .bind(project.updated_at)
        .fetch_optional(&mut *self.tx)
        .await?;

        project.revision = revision.ok_or_else(|| ServiceError::NotFound("Project not found".to_string()))?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        self.tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl ActivityStore for PgStore {
    async fn append(&self, activity: &Activity) -> StoreResult<()> {
        sqlx::query("INSERT INTO activities (id, message, timestamp) VALUES ($1, $2, $3)")
            .bind(activity.id)
            .bind(&activity.message)
            .bind(activity.timestamp)
            .execute(&self.db.pool)
            .await?;

        Ok(())
    }

    async fn recent(&self, limit: usize) -> StoreResult<Vec<Activity>> {
        let activities = sqlx::query_as::<_, Activity>(
            "SELECT id, message, timestamp FROM activities ORDER BY timestamp DESC LIMIT $1"
        )
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.db.pool)
        .await?;

        Ok(activities)
    }
}
