//! Exercises the PostgreSQL backend. Needs `DATABASE_URL` pointing at a
//! disposable database; run with `cargo test -- --ignored`.

mod common;

use std::sync::Arc;

use common::{member_request, project_request, settings, task_request};
use kanban_projects::models::MemberRole;
use kanban_projects::services::KanbanService;
use kanban_projects::storage::PgStore;
use kanban_projects::utils::errors::ServiceError;
use kanban_projects::Database;
use uuid::Uuid;

async fn service() -> KanbanService {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for postgres tests");
    let db = Database::new(&url, 5).await.expect("database should be reachable");
    db.migrate().await.expect("migrations should apply");
    let store = Arc::new(PgStore::new(db));
    KanbanService::new(store.clone(), store, settings())
}

fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", &Uuid::new_v4().simple().to_string()[..8])
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn title_uniqueness_is_enforced_by_the_database() {
    let service = service().await;
    let title = unique("dup");

    service.create_project(project_request(&title)).await.unwrap();
    let err = service.create_project(project_request(&title)).await.unwrap_err();

    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn tasks_and_member_moves_round_trip_through_jsonb() {
    let service = service().await;
    let alpha = service.create_project(project_request(&unique("alpha"))).await.unwrap();
    let beta = service.create_project(project_request(&unique("beta"))).await.unwrap();

    let first = service.add_task(alpha.id, task_request("Design mockups")).await.unwrap();
    let second = service.add_task(alpha.id, task_request("Build API")).await.unwrap();
    assert_eq!((first.order, first.index), (0, 0));
    assert_eq!((second.order, second.index), (1, 1));

    service
        .add_member(alpha.id, member_request("m1", "Ana", MemberRole::Developer))
        .await
        .unwrap();
    service.move_member(alpha.id, "m1", beta.id).await.unwrap();

    assert!(service.list_members(alpha.id).await.unwrap().is_empty());
    let members = service.list_members(beta.id).await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, "m1");

    let stored = service.get_project(alpha.id).await.unwrap();
    assert_eq!(stored.tasks.len(), 2);
    assert!(stored.revision >= 3);

    service.delete_project(alpha.id).await.unwrap();
    service.delete_project(beta.id).await.unwrap();
}
