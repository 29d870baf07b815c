mod common;

use axum::{Router, http::StatusCode, routing::get};
use axum_test::TestServer;
use snaplink::api::handlers::health_handler;
use sqlx::PgPool;

fn make_server(pool: PgPool) -> TestServer {
    let state = common::create_test_state(pool);
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_health_endpoint_success(pool: PgPool) {
    let server = make_server(pool);

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["store"]["status"], "ok");
}

#[sqlx::test]
async fn test_health_endpoint_structure(pool: PgPool) {
    let server = make_server(pool);

    let response = server.get("/health").await;

    let json = response.json::<serde_json::Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json["checks"].get("store").is_some());
}

#[sqlx::test]
async fn test_health_endpoint_database_down(pool: PgPool) {
    let state = common::create_test_state(pool.clone());
    pool.close().await;

    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["store"]["status"], "error");
}
