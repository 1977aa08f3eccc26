//! End-to-end HTTP behaviour over the in-memory store.

mod common;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};

use common::service_with_store;
use kanban_projects::handlers;

macro_rules! app {
    () => {{
        let (service, _) = service_with_store();
        test::init_service(
            App::new()
                .app_data(web::Data::new(service))
                .configure(handlers::configure),
        )
        .await
    }};
}

macro_rules! send {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

#[actix_web::test]
async fn project_lifecycle() {
    let app = app!();

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/projects")
            .set_json(json!({"title": "Alpha", "description": "First board"}))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send!(app, test::TestRequest::get().uri("/projects"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert!(body["data"][0].get("tasks").is_none());

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/projects/{id}"))
            .set_json(json!({"title": "Alpha 2", "description": "Renamed"}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Alpha 2");

    let (status, _) = send!(app, test::TestRequest::delete().uri(&format!("/projects/{id}")));
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send!(app, test::TestRequest::get().uri(&format!("/projects/{id}")));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");
}

#[actix_web::test]
async fn invalid_and_duplicate_projects_are_rejected() {
    let app = app!();

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/projects")
            .set_json(json!({"title": "Al", "description": "too short"}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation_error");

    let create = || {
        test::TestRequest::post()
            .uri("/projects")
            .set_json(json!({"title": "Alpha", "description": "First board"}))
    };
    let (status, _) = send!(app, create());
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = send!(app, create());
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Title must be unique");
}

#[actix_web::test]
async fn malformed_project_id_is_a_bad_request() {
    let app = app!();

    let (status, body) = send!(app, test::TestRequest::get().uri("/projects/not-a-uuid"));

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation_error");
}

#[actix_web::test]
async fn tasks_are_grouped_by_stage() {
    let app = app!();
    let (_, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/projects")
            .set_json(json!({"title": "Alpha", "description": "First board"}))
    );
    let project = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/projects/{project}/tasks"))
            .set_json(json!({"title": "Design mockups", "description": "Landing page"}))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["stage"], "Requested");
    assert_eq!(body["data"]["order"], 0);
    assert_eq!(body["data"]["index"], 0);
    let task = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/projects/{project}/tasks/{task}"))
            .set_json(json!({"stage": "In Progress"}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["stage"], "In Progress");

    let (status, _) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/projects/{project}/tasks/{task}"))
            .set_json(json!({"stage": "Blocked"}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send!(app, test::TestRequest::get().uri(&format!("/projects/{project}/tasks")));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["inProgress"].as_array().unwrap().len(), 1);
    assert!(body["data"]["requested"].as_array().unwrap().is_empty());

    let (status, _) = send!(
        app,
        test::TestRequest::delete().uri(&format!("/projects/{project}/tasks/{task}"))
    );
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send!(
        app,
        test::TestRequest::get().uri(&format!("/projects/{project}/tasks/{task}"))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn members_move_between_projects() {
    let app = app!();
    let mut ids = Vec::new();
    for title in ["Alpha", "Beta"] {
        let (_, body) = send!(
            app,
            test::TestRequest::post()
                .uri("/projects")
                .set_json(json!({"title": title, "description": "board"}))
        );
        ids.push(body["data"]["id"].as_str().unwrap().to_string());
    }
    let (alpha, beta) = (&ids[0], &ids[1]);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/projects/{alpha}/members"))
            .set_json(json!({"name": "Ana", "role": "Developer"}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/projects/{alpha}/members"))
            .set_json(json!({"id": "m1", "name": "Ana", "role": "Developer"}))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], "m1");

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/projects/{alpha}/members/m1"))
            .set_json(json!({"newProjectId": alpha}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_argument");

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/projects/{alpha}/members/m1"))
            .set_json(json!({"newProjectId": beta}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Ana");

    let (_, body) = send!(app, test::TestRequest::get().uri(&format!("/projects/{alpha}/members")));
    assert!(body["data"].as_array().unwrap().is_empty());
    let (_, body) = send!(app, test::TestRequest::get().uri(&format!("/projects/{beta}/members")));
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["id"], "m1");

    let (status, _) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/projects/{alpha}/members/m1"))
            .set_json(json!({"newProjectId": "not-a-uuid"}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn member_without_role_is_rejected() {
    let app = app!();
    let (_, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/projects")
            .set_json(json!({"title": "Alpha", "description": "board"}))
    );
    let alpha = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/projects/{alpha}/members"))
            .set_json(json!({"id": "m1", "name": "Ana"}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation_error");

    let (_, body) = send!(app, test::TestRequest::get().uri(&format!("/projects/{alpha}/members")));
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn health_reports_storage_counts() {
    let app = app!();

    let (status, body) = send!(app, test::TestRequest::get().uri("/health"));

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["stats"]["projects"], 0);
}

#[actix_web::test]
async fn activity_feed_accepts_a_limit() {
    let app = app!();
    for title in ["Alpha", "Beta", "Gamma"] {
        send!(
            app,
            test::TestRequest::post()
                .uri("/projects")
                .set_json(json!({"title": title, "description": "board"}))
        );
    }

    let mut entries = Vec::new();
    for _ in 0..100 {
        let (status, body) = send!(app, test::TestRequest::get().uri("/activities?limit=2"));
        assert_eq!(status, StatusCode::OK);
        entries = body["data"].as_array().unwrap().clone();
        if entries.len() == 2 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    assert_eq!(entries.len(), 2);
}
