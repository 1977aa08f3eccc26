//! Moving a member between two project aggregates in one transaction.

use std::time::Duration;

use chrono::Utc;
use uuid::Uuid;

use crate::models::{Member, Project};
use crate::storage::{ProjectStore, ProjectTransaction};
use crate::utils::errors::ServiceError;

/// Result of a committed move.
#[derive(Debug, Clone)]
pub struct MemberTransfer {
    pub member: Member,
    pub source_title: String,
    pub destination_title: String,
}

/// Removes `member_id` from `source_id` and appends it to `destination_id`.
///
/// Both writes commit together or not at all. Any error, including a
/// cancelled future, drops the open transaction and leaves both projects
/// as they were.
pub async fn move_member(
    store: &dyn ProjectStore,
    deadline: Duration,
    source_id: Uuid,
    member_id: &str,
    destination_id: Uuid,
) -> Result<MemberTransfer, ServiceError> {
    if source_id == destination_id {
        return Err(ServiceError::InvalidArgument(
            "Source and destination project must differ".to_string(),
        ));
    }

    let mut tx = store.begin(deadline).await?;

    // Lock in id order so opposing moves cannot deadlock each other.
    let (mut source, mut destination) = if source_id < destination_id {
        let source = load(tx.as_mut(), source_id, "Source project not found").await?;
        let destination = load(tx.as_mut(), destination_id, "Destination project not found").await?;
        (source, destination)
    } else {
        let destination = load(tx.as_mut(), destination_id, "Destination project not found").await?;
        let source = load(tx.as_mut(), source_id, "Source project not found").await?;
        (source, destination)
    };

    let position = source
        .members
        .iter()
        .position(|m| m.id == member_id)
        .ok_or_else(|| ServiceError::NotFound("Member not found in the source project".to_string()))?;

    if destination.member(member_id).is_some() {
        return Err(ServiceError::Conflict(format!(
            "Member {} already belongs to the destination project",
            member_id
        )));
    }

    let now = Utc::now();
    let mut member = source.members.remove(position);
    member.updated_at = now;
    source.updated_at = now;
    tx.save(&mut source).await?;

    destination.members.push(member.clone());
    destination.updated_at = now;
    tx.save(&mut destination).await?;

    tx.commit().await.map_err(|e| match e {
        ServiceError::Storage(msg) => {
            log::error!("Failed to commit member transfer: {}", msg);
            ServiceError::TransactionAborted("Member transfer could not be committed".to_string())
        }
        other => other,
    })?;

    log::info!(
        "Member {} moved from project {} to project {}",
        member.id, source.id, destination.id
    );

    Ok(MemberTransfer {
        member,
        source_title: source.title,
        destination_title: destination.title,
    })
}

async fn load(
    tx: &mut dyn ProjectTransaction,
    id: Uuid,
    missing: &str,
) -> Result<Project, ServiceError> {
    tx.load_for_update(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(missing.to_string()))
}
