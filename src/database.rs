use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use anyhow::{Result, Context};

use crate::storage::StorageStats;

#[derive(Debug, Clone)]
pub struct Database {
    pub pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        log::info!("🔗 Connecting to database...");

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to connect to the database")?;

        log::info!("✅ Database connection established");

        Ok(Database { pool })
    }

    pub async fn migrate(&self) -> Result<()> {
        log::info!("📋 Applying database migrations...");

        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to apply database migrations")?;

        log::info!("✅ Database schema is up to date");
        Ok(())
    }

    pub async fn health_check(&self) -> Result<()> {
        log::info!("🔍 Running database health check...");

        let row = sqlx::query("SELECT 1 as health_check")
            .fetch_one(&self.pool)
            .await
            .context("Failed to execute health check query")?;

        let result: i32 = row.get("health_check");

        if result == 1 {
            log::info!("✅ Database health check passed");
            Ok(())
        } else {
            Err(anyhow::anyhow!("Database health check failed"))
        }
    }

    pub async fn get_stats(&self) -> Result<StorageStats> {
        let stats = sqlx::query(
            r#"
            SELECT
                (SELECT COUNT(*) FROM projects) as project_count,
                (SELECT COUNT(*) FROM activities) as activity_count
            "#
        )
        .fetch_one(&self.pool)
        .await
        .context("Failed to get database statistics")?;

        Ok(StorageStats {
            projects: stats.get::<i64, _>("project_count"),
            activities: stats.get::<i64, _>("activity_count"),
        })
    }
}
