//! Integration tests for class CRUD and cascade delete.

mod helpers;

use http::StatusCode;
use serde_json::json;

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn create_and_list_classes() {
    let app = helpers::TestApp::new().await;

    app.create_class("Math 101").await;
    app.create_class("Physics 201").await;

    let response = app.request("GET", "/api/classes", None).await;
    assert_eq!(response.status, StatusCode::OK);

    let classes = response.body.as_array().expect("array body");
    assert_eq!(classes.len(), 2);
    // Newest first.
    assert_eq!(classes[0]["name"], "Physics 201");
    assert_eq!(classes[1]["name"], "Math 101");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn create_class_rejects_blank_name() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request("POST", "/api/classes", Some(json!({ "name": "   " })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn get_class_not_found() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "GET",
            "/api/classes/00000000-0000-0000-0000-999999999999",
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn update_class_changes_only_provided_fields() {
    let app = helpers::TestApp::new().await;
    let id = app.create_class("Math 101").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/classes/{id}"),
            Some(json!({ "description": "Linear algebra" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "Math 101");
    assert_eq!(response.body["description"], "Linear algebra");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn delete_class_cascades_to_all_tasks() {
    let app = helpers::TestApp::new().await;
    let class_id = app.create_class("Math 101").await;
    let other_id = app.create_class("Physics 201").await;
    app.create_task(class_id, "Homework 1").await;
    app.create_task(class_id, "Homework 2").await;
    app.create_task(other_id, "Lab report").await;

    let response = app
        .request("DELETE", &format!("/api/classes/{class_id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["tasksDeleted"], 2);
    assert_eq!(response.body["transactional"], true);

    // Only the other class's task survives.
    assert_eq!(app.count("classes").await, 1);
    assert_eq!(app.count("tasks").await, 1);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn class_name_is_sanitized() {
    let app = helpers::TestApp::new().await;
    let id = app.create_class("Algebra {$ne: null}").await;

    let response = app.request("GET", &format!("/api/classes/{id}"), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "Algebra ne: null");
}
