//! Integration test for the health endpoint.

mod helpers;

use http::StatusCode;

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn health_reports_database_and_transaction_capability() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["database"], "connected");
    assert_eq!(response.body["transactionsSupported"], true);
    assert!(response.body["version"].is_string());
}
