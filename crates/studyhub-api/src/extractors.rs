//! Request body extractors.
//!
//! Axum's stock `Json` rejection is a plain-text 422; these wrappers
//! keep malformed or incomplete bodies inside the API's `{message}`
//! error contract, and the bulk variant keeps the atomicity marker in
//! the body as well.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};

use studyhub_core::error::AppError;

use crate::error::{ApiError, BulkError};

/// JSON body whose deserialization failures surface as
/// `400 {message}`.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// JSON body for the transactional endpoints: failures are
/// `400 {message, transactional: true}`.
pub struct BulkJson<T>(pub T);

impl<S, T> FromRequest<S> for BulkJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = BulkError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::dto::request::MoveTasksRequest;

    async fn bulk_endpoint(BulkJson(_req): BulkJson<MoveTasksRequest>) -> StatusCode {
        StatusCode::OK
    }

    async fn plain_endpoint(JsonBody(_req): JsonBody<MoveTasksRequest>) -> StatusCode {
        StatusCode::OK
    }

    fn json_request(path: &str, body: &str) -> Request<Body> {
        Request::post(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn missing_field_is_a_400_with_the_atomicity_marker() {
        let app = Router::new().route("/move", post(bulk_endpoint));

        let response = app.oneshot(json_request("/move", "{}")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["transactional"], true);
        assert!(body["message"].as_str().unwrap().contains("fromClassId"));
    }

    #[tokio::test]
    async fn malformed_json_is_a_400_message_body() {
        let app = Router::new().route("/t", post(plain_endpoint));

        let response = app.oneshot(json_request("/t", "not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["message"].is_string());
    }
}
