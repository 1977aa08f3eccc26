use std::sync::Arc;

use crate::models::Activity;
use crate::storage::{ActivityStore, StoreResult};

/// Best-effort activity feed. Writes run detached from the caller and
/// their failures are only logged.
#[derive(Clone)]
pub struct ActivityLog {
    store: Arc<dyn ActivityStore>,
}

impl ActivityLog {
    pub fn new(store: Arc<dyn ActivityStore>) -> Self {
        ActivityLog { store }
    }

    /// Must be called from within a tokio runtime.
    pub fn record(&self, message: impl Into<String>) {
        let activity = Activity::new(message);
        let store = Arc::clone(&self.store);

        tokio::spawn(async move {
            if let Err(e) = store.append(&activity).await {
                log::warn!("Failed to record activity \"{}\": {}", activity.message, e);
            }
        });
    }

    pub async fn recent(&self, limit: usize) -> StoreResult<Vec<Activity>> {
        self.store.recent(limit).await
    }
}
