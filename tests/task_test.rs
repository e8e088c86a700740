//! Integration tests for task CRUD and filtered listing.

mod helpers;

use http::StatusCode;
use serde_json::json;

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn create_task_resolves_class_name_on_read() {
    let app = helpers::TestApp::new().await;
    let class_id = app.create_class("Math 101").await;
    let task_id = app.create_task(class_id, "Homework 1").await;

    let response = app.request("GET", &format!("/api/tasks/{task_id}"), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "Homework 1");
    assert_eq!(response.body["className"], "Math 101");
    assert_eq!(response.body["completed"], false);
    assert_eq!(response.body["priority"], "medium");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn create_task_rejects_unknown_class() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/tasks",
            Some(json!({
                "name": "Orphan",
                "classId": "00000000-0000-0000-0000-999999999999",
            })),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn create_task_rejects_negative_estimated_time() {
    let app = helpers::TestApp::new().await;
    let class_id = app.create_class("Math 101").await;

    let response = app
        .request(
            "POST",
            "/api/tasks",
            Some(json!({
                "name": "Homework",
                "classId": class_id.to_string(),
                "estimatedTime": -5,
            })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn list_tasks_filters_by_completed_and_class() {
    let app = helpers::TestApp::new().await;
    let math = app.create_class("Math 101").await;
    let physics = app.create_class("Physics 201").await;
    let done = app.create_task(math, "Done homework").await;
    app.create_task(math, "Open homework").await;
    app.create_task(physics, "Lab report").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/tasks/{done}"),
            Some(json!({ "completed": true })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", &format!("/api/tasks?classId={math}&completed=false"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let tasks = response.body.as_array().expect("array body");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["name"], "Open homework");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn list_tasks_rejects_malformed_completed_filter() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/tasks?completed=maybe", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn reassigning_task_verifies_destination_class() {
    let app = helpers::TestApp::new().await;
    let math = app.create_class("Math 101").await;
    let task = app.create_task(math, "Homework").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/tasks/{task}"),
            Some(json!({ "classId": "00000000-0000-0000-0000-999999999999" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn delete_task_removes_it() {
    let app = helpers::TestApp::new().await;
    let class_id = app.create_class("Math 101").await;
    let task_id = app.create_task(class_id, "Homework").await;

    let response = app
        .request("DELETE", &format!("/api/tasks/{task_id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Task deleted successfully");
    assert_eq!(app.count("tasks").await, 0);
}
