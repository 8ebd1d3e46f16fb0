mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;
use snaplink::domain::entities::Role;
use snaplink::utils::code_generator::is_valid_code;

// ─── LIST ────────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_list_is_public(pool: PgPool) {
    let user = common::create_test_user(&pool, "alice", Role::User).await;
    common::create_test_mapping(&pool, "aaa111", "https://a.example.com", user.id).await;
    common::create_test_mapping(&pool, "bbb222", "https://b.example.com", user.id).await;

    let (server, _rx) = common::make_server(pool);

    let response = server.get("/api/urls").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["total"], 2);
    assert_eq!(json["items"].as_array().unwrap().len(), 2);
    assert_eq!(json["items"][0]["created_by"], "alice");
    assert!(
        json["items"][0]["short_url"]
            .as_str()
            .unwrap()
            .starts_with(common::BASE_URL)
    );
}

#[sqlx::test]
async fn test_list_pagination(pool: PgPool) {
    let user = common::create_test_user(&pool, "alice", Role::User).await;
    for i in 0..3 {
        common::create_test_mapping(
            &pool,
            &format!("page0{i}"),
            &format!("https://example.com/{i}"),
            user.id,
        )
        .await;
    }

    let (server, _rx) = common::make_server(pool);

    let json = server
        .get("/api/urls")
        .add_query_param("page", 2)
        .add_query_param("page_size", 2)
        .await
        .json::<serde_json::Value>();

    assert_eq!(json["total"], 3);
    assert_eq!(json["page"], 2);
    assert_eq!(json["items"].as_array().unwrap().len(), 1);
}

#[sqlx::test]
async fn test_list_rejects_bad_page_size(pool: PgPool) {
    let (server, _rx) = common::make_server(pool);

    server
        .get("/api/urls")
        .add_query_param("page_size", 1000)
        .await
        .assert_status_bad_request();
}

// ─── CREATE ──────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_create_requires_token(pool: PgPool) {
    let (server, _rx) = common::make_server(pool);

    let response = server
        .post("/api/urls")
        .json(&json!({ "original_url": "https://example.com" }))
        .await;

    response.assert_status_unauthorized();
}

#[sqlx::test]
async fn test_create_rejects_bad_token(pool: PgPool) {
    let (server, _rx) = common::make_server(pool);

    server
        .post("/api/urls")
        .authorization_bearer("not-a-token")
        .json(&json!({ "original_url": "https://example.com" }))
        .await
        .assert_status_unauthorized();
}

#[sqlx::test]
async fn test_create_success(pool: PgPool) {
    let user = common::create_test_user(&pool, "alice", Role::User).await;
    let (server, _rx) = common::make_server(pool.clone());

    let response = server
        .post("/api/urls")
        .authorization_bearer(common::token_for(&user))
        .json(&json!({ "original_url": "https://example.com/long/path" }))
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    let code = json["short_code"].as_str().unwrap();
    assert!(is_valid_code(code));
    assert_eq!(json["short_url"], format!("{}/{}", common::BASE_URL, code));
    assert_eq!(json["original_url"], "https://example.com/long/path");

    let owner: i64 =
        sqlx::query_scalar("SELECT created_by FROM url_mappings WHERE short_code = $1")
            .bind(code)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(owner, user.id);
}

#[sqlx::test]
async fn test_create_duplicate_url_conflicts(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice", Role::User).await;
    let bob = common::create_test_user(&pool, "bob", Role::User).await;
    let (server, _rx) = common::make_server(pool);

    server
        .post("/api/urls")
        .authorization_bearer(common::token_for(&alice))
        .json(&json!({ "original_url": "https://dup.example.com" }))
        .await
        .assert_status_ok();

    // Uniqueness is global, not per user.
    server
        .post("/api/urls")
        .authorization_bearer(common::token_for(&bob))
        .json(&json!({ "original_url": "https://dup.example.com" }))
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[sqlx::test]
async fn test_create_invalid_url(pool: PgPool) {
    let user = common::create_test_user(&pool, "alice", Role::User).await;
    let (server, _rx) = common::make_server(pool);
    let token = common::token_for(&user);

    for bad in ["", "not a url", "ftp://example.com/file", "example.com"] {
        server
            .post("/api/urls")
            .authorization_bearer(token.clone())
            .json(&json!({ "original_url": bad }))
            .await
            .assert_status_bad_request();
    }
}

#[sqlx::test]
async fn test_create_with_token_of_deleted_user(pool: PgPool) {
    let user = common::create_test_user(&pool, "ghost", Role::User).await;
    let token = common::token_for(&user);
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();

    let (server, _rx) = common::make_server(pool);

    server
        .post("/api/urls")
        .authorization_bearer(token)
        .json(&json!({ "original_url": "https://example.com" }))
        .await
        .assert_status_unauthorized();
}

// ─── GET ─────────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_get_details(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice", Role::User).await;
    let bob = common::create_test_user(&pool, "bob", Role::User).await;
    let id = common::create_test_mapping(&pool, "det001", "https://example.com", alice.id).await;

    let (server, _rx) = common::make_server(pool);

    // Any signed-in user may view details, not just the owner.
    let response = server
        .get(&format!("/api/urls/{id}"))
        .authorization_bearer(common::token_for(&bob))
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["id"], id);
    assert_eq!(json["click_count"], 0);
    assert!(json["last_accessed"].is_null());
    assert_eq!(json["created_by"], "alice");
}

#[sqlx::test]
async fn test_get_details_requires_token(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice", Role::User).await;
    let id = common::create_test_mapping(&pool, "det002", "https://example.com", alice.id).await;

    let (server, _rx) = common::make_server(pool);

    server
        .get(&format!("/api/urls/{id}"))
        .await
        .assert_status_unauthorized();
}

#[sqlx::test]
async fn test_get_details_not_found(pool: PgPool) {
    let user = common::create_test_user(&pool, "alice", Role::User).await;
    let (server, _rx) = common::make_server(pool);

    server
        .get("/api/urls/999999")
        .authorization_bearer(common::token_for(&user))
        .await
        .assert_status_not_found();
}

// ─── DELETE ──────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_delete_by_owner(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice", Role::User).await;
    let id = common::create_test_mapping(&pool, "del001", "https://example.com", alice.id).await;

    let (server, _rx) = common::make_server(pool);

    server
        .delete(&format!("/api/urls/{id}"))
        .authorization_bearer(common::token_for(&alice))
        .await
        .assert_status_ok();

    server.get("/del001").await.assert_status_not_found();
}

#[sqlx::test]
async fn test_delete_by_other_user_forbidden(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice", Role::User).await;
    let bob = common::create_test_user(&pool, "bob", Role::User).await;
    let id = common::create_test_mapping(&pool, "del002", "https://example.com", alice.id).await;

    let (server, _rx) = common::make_server(pool);

    server
        .delete(&format!("/api/urls/{id}"))
        .authorization_bearer(common::token_for(&bob))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    // Still resolvable.
    server
        .get("/del002")
        .await
        .assert_status(StatusCode::TEMPORARY_REDIRECT);
}

#[sqlx::test]
async fn test_delete_denial_can_look_like_not_found(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice", Role::User).await;
    let bob = common::create_test_user(&pool, "bob", Role::User).await;
    let id = common::create_test_mapping(&pool, "del003", "https://example.com", alice.id).await;

    let (mut state, _rx) = common::create_test_state(pool);
    state.conflate_delete_denial = true;
    let server = common::server_for(state);

    server
        .delete(&format!("/api/urls/{id}"))
        .authorization_bearer(common::token_for(&bob))
        .await
        .assert_status_not_found();
}

#[sqlx::test]
async fn test_delete_by_admin(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice", Role::User).await;
    let admin = common::create_test_user(&pool, "root", Role::Admin).await;
    let id = common::create_test_mapping(&pool, "del004", "https://example.com", alice.id).await;

    let (server, _rx) = common::make_server(pool);

    server
        .delete(&format!("/api/urls/{id}"))
        .authorization_bearer(common::token_for(&admin))
        .await
        .assert_status_ok();
}

#[sqlx::test]
async fn test_delete_missing(pool: PgPool) {
    let admin = common::create_test_user(&pool, "root", Role::Admin).await;
    let (server, _rx) = common::make_server(pool);

    server
        .delete("/api/urls/999999")
        .authorization_bearer(common::token_for(&admin))
        .await
        .assert_status_not_found();
}
