mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;
use snaplink::domain::entities::Role;

#[sqlx::test]
async fn test_get_about_empty(pool: PgPool) {
    let (server, _rx) = common::make_server(pool);

    server.get("/api/about").await.assert_status_not_found();
}

#[sqlx::test]
async fn test_admin_updates_about(pool: PgPool) {
    let admin = common::create_test_user(&pool, "root", Role::Admin).await;
    let (server, _rx) = common::make_server(pool);

    server
        .put("/api/about")
        .authorization_bearer(common::token_for(&admin))
        .json(&json!({ "content": "Shortens links." }))
        .await
        .assert_status_ok();

    // Readable without a token.
    let response = server.get("/api/about").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["content"], "Shortens links.");
    assert_eq!(json["modified_by"], "root");
}

#[sqlx::test]
async fn test_user_cannot_update_about(pool: PgPool) {
    let user = common::create_test_user(&pool, "alice", Role::User).await;
    let (server, _rx) = common::make_server(pool);

    server
        .put("/api/about")
        .authorization_bearer(common::token_for(&user))
        .json(&json!({ "content": "defaced" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    server.get("/api/about").await.assert_status_not_found();
}

#[sqlx::test]
async fn test_update_about_requires_token(pool: PgPool) {
    let (server, _rx) = common::make_server(pool);

    server
        .put("/api/about")
        .json(&json!({ "content": "anon" }))
        .await
        .assert_status_unauthorized();
}

#[sqlx::test]
async fn test_update_about_with_token_of_deleted_admin(pool: PgPool) {
    let admin = common::create_test_user(&pool, "gone", Role::Admin).await;
    let token = common::token_for(&admin);
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(admin.id)
        .execute(&pool)
        .await
        .unwrap();

    let (server, _rx) = common::make_server(pool);

    server
        .put("/api/about")
        .authorization_bearer(token)
        .json(&json!({ "content": "ghost edit" }))
        .await
        .assert_status_unauthorized();

    server.get("/api/about").await.assert_status_not_found();
}
