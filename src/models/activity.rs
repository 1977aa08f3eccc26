use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use chrono::{DateTime, Utc};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Free-standing, immutable log line. Not linked to any project.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Activity {
    pub id: Uuid,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Activity {
    pub fn new(message: impl Into<String>) -> Self {
        Activity {
            id: Uuid::new_v4(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ActivityQuery {
    /// Number of entries to return, newest first.
    pub limit: Option<usize>,
}
