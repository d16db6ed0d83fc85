mod common;

use axum::http::header::CACHE_CONTROL;
use axum::http::StatusCode;

use common::{body_json, get, send, test_router};

#[tokio::test]
async fn health_returns_ok_payload() {
    let (router, _readiness) = test_router();

    let response = send(&router, get("/health")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CACHE_CONTROL], "no-store");
    assert_eq!(body_json(response).await, serde_json::json!({"status": "ok"}));
}

#[tokio::test]
async fn health_does_not_depend_on_readiness() {
    let (router, readiness) = test_router();
    assert!(!readiness.is_ready());

    let response = send(&router, get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn ready_follows_readiness_flag() {
    let (router, readiness) = test_router();

    let response = send(&router, get("/ready")).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"error": "service not ready"})
    );

    readiness.mark_ready();
    let response = send(&router, get("/ready")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CACHE_CONTROL], "no-store");
    assert_eq!(body_json(response).await, serde_json::json!({"status": "ready"}));

    readiness.mark_not_ready();
    let response = send(&router, get("/ready")).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (router, _readiness) = test_router();

    let response = send(&router, get("/nope")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
