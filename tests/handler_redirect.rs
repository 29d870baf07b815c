mod common;

use axum::{Router, http::StatusCode, routing::get};
use axum_test::TestServer;
use snaplink::api::handlers::redirect_handler;
use sqlx::PgPool;

fn make_server(pool: PgPool) -> TestServer {
    let state = common::create_test_state(pool);
    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_redirect_success(pool: PgPool) {
    common::create_test_link(&pool, "redir001", "https://example.com/target").await;

    let server = make_server(pool);
    let response = server.get("/redir001").await;

    assert_eq!(response.status_code(), StatusCode::MOVED_PERMANENTLY);

    let location = response.header("location");
    assert_eq!(location, "https://example.com/target");
}

#[sqlx::test]
async fn test_redirect_records_visit(pool: PgPool) {
    common::create_test_link(&pool, "redir002", "https://example.com").await;

    let server = make_server(pool.clone());

    for _ in 0..3 {
        server.get("/redir002").await;
    }

    assert_eq!(common::visit_count(&pool, "redir002").await, 3);

    let timestamps: Vec<chrono::DateTime<chrono::Utc>> =
        sqlx::query_scalar("SELECT visit_timestamps FROM links WHERE short_code = 'redir002'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(timestamps.len(), 3);
    assert!(timestamps.windows(2).all(|w| w[0] <= w[1]));
}

#[sqlx::test]
async fn test_redirect_not_found(pool: PgPool) {
    let server = make_server(pool);

    let response = server.get("/zzzzzzzz").await;

    response.assert_status_not_found();
}

#[sqlx::test]
async fn test_redirect_deleted_link(pool: PgPool) {
    common::create_deleted_link(&pool, "gone0001", "https://example.com").await;

    let server = make_server(pool);

    server.get("/gone0001").await.assert_status_not_found();
}

#[sqlx::test]
async fn test_redirect_malformed_code(pool: PgPool) {
    let server = make_server(pool);

    server.get("/abc").await.assert_status_bad_request();
    server.get("/abc%24defg").await.assert_status_bad_request();
}
