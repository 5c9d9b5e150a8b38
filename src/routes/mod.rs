//! Router assembly: entity and common routes behind the shared middleware stack.

pub mod common;
pub mod entity;

pub use common::common_routes;
pub use entity::entity_routes;

use crate::error::AppError;
use crate::extractors::MAX_BODY_BYTES;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    response::{IntoResponse, Response},
    Router,
};
use std::any::Any;
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer, trace::TraceLayer};

async fn not_found() -> AppError {
    AppError::NotFound
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    AppError::Internal(format!("handler panicked: {}", detail)).into_response()
}

/// Full application router with state applied.
pub fn app(state: AppState) -> Router {
    let request_timeout = state.config.request_timeout;
    Router::new()
        .merge(common_routes())
        .merge(entity_routes())
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use sqlx::postgres::PgPoolOptions;
    use std::time::Duration;
    use tower::ServiceExt;

    /// Router over a pool that never connects successfully: every test here must be
    /// answered before the database is touched (or must expect a 500).
    fn test_app() -> Router {
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy("postgres://autocatalog@127.0.0.1:1/autocatalog")
            .expect("lazy pool");
        app(AppState::new(pool, AppConfig::default()))
    }

    async fn send(req: Request<Body>) -> (StatusCode, Value) {
        let response = test_app().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn with_json(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn car_body(cylinders: i64) -> String {
        json!({
            "name": "Ford Mustang",
            "body": "coupe",
            "brake_system": "disc",
            "aspiration": "natural",
            "horsepower": 300,
            "mpg": 25,
            "cylinders": cylinders,
            "acceleration": 5.1,
            "displacement": 3.5,
            "origin": "USA"
        })
        .to_string()
    }

    #[tokio::test]
    async fn healthcheck_reports_environment() {
        let (status, body) = send(get("/v1/healthcheck")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "available");
        assert_eq!(body["system_info"]["environment"], "development");
    }

    #[tokio::test]
    async fn id_below_one_is_not_found() {
        let (status, body) = send(get("/v1/cars/0")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "not_found");

        let request = Request::builder()
            .method("DELETE")
            .uri("/v1/motorbikes/-3")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn non_numeric_id_is_not_found() {
        let (status, _) = send(get("/v1/motorbikes/abc")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn odd_cylinder_car_fails_validation() {
        let (status, body) = send(with_json("POST", "/v1/cars", &car_body(5))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body, json!({"error": {"cylinders": "must be 4, 6, 8, 12 etc..."}}));
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let (status, body) = send(with_json("POST", "/v1/cars", r#"{"name": "Ford""#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "bad_request");

        let (status, body) = send(with_json("POST", "/v1/motorbikes", r#"{"wheels": 2}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "body contains unknown key \"wheels\"");
    }

    #[tokio::test]
    async fn oversized_body_is_bad_request() {
        let big = format!(r#"{{"name": "{}"}}"#, "x".repeat(MAX_BODY_BYTES + 1));
        let (status, body) = send(with_json("POST", "/v1/cars", &big)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"]["message"],
            format!("body must not be larger than {} bytes", MAX_BODY_BYTES)
        );
    }

    #[tokio::test]
    async fn list_rejects_bad_filters() {
        let (status, body) = send(get("/v1/cars?page=0&page_size=500&sort=origin")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let errors = &body["error"];
        assert_eq!(errors["page"], "must be greater than zero");
        assert_eq!(errors["page_size"], "must be a maximum of 100");
        assert_eq!(errors["sort"], "invalid sort value");
    }

    #[tokio::test]
    async fn list_rejects_non_integer_page() {
        let (status, body) = send(get("/v1/motorbikes?page=two&sort=-type")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body, json!({"error": {"page": "must be an integer value"}}));
    }

    #[tokio::test]
    async fn motorbike_sort_safelist_differs_from_cars() {
        let (status, body) = send(get("/v1/motorbikes?sort=body")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["sort"], "invalid sort value");
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let (status, body) = send(get("/v1/trucks")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "the requested resource could not be found");
    }

    #[tokio::test]
    async fn store_failure_is_generic_internal_error() {
        let (status, body) = send(get("/v1/cars/1")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "internal_error");
        let message = body["error"]["message"].as_str().unwrap();
        assert!(!message.contains("127.0.0.1"));
    }
}
