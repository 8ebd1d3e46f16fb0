#![allow(dead_code)]

use axum_test::TestServer;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;
use snaplink::application::services::{AboutService, AuthService, ShorteningService};
use snaplink::domain::click_event::ClickEvent;
use snaplink::domain::entities::{Role, User};
use snaplink::infrastructure::auth::{Authenticator, JwtAuthenticator};
use snaplink::infrastructure::persistence::{
    PgAboutRepository, PgMappingRepository, PgUserRepository,
};
use snaplink::state::AppState;
use snaplink::utils::code_generator::RandomCodeGenerator;
use snaplink::utils::password::hash_password;

pub const BASE_URL: &str = "http://sn.test";
pub const JWT_SECRET: &str = "integration-test-signing-secret";
pub const PASSWORD: &str = "secret123";

pub async fn create_test_user(pool: &PgPool, username: &str, role: Role) -> User {
    let hash = hash_password(PASSWORD).unwrap();

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO users (username, password_hash, role) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(username)
    .bind(&hash)
    .bind(role.as_str())
    .fetch_one(pool)
    .await
    .unwrap();

    User {
        id,
        username: username.to_string(),
        password_hash: hash,
        role,
        created_at: chrono::Utc::now(),
    }
}

pub async fn create_test_mapping(pool: &PgPool, code: &str, url: &str, created_by: i64) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO url_mappings (original_url, short_code, created_by) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(url)
    .bind(code)
    .bind(created_by)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn click_count(pool: &PgPool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT click_count FROM url_mappings WHERE short_code = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Issues a token the test state will accept for `user`.
pub fn token_for(user: &User) -> String {
    JwtAuthenticator::new(JWT_SECRET, 1).issue(user).unwrap()
}

pub fn create_test_state(pool: PgPool) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let pool = Arc::new(pool);
    let (tx, rx) = mpsc::channel(100);

    let shortening_service = Arc::new(ShorteningService::new(
        Arc::new(PgMappingRepository::new(pool.clone())),
        Arc::new(RandomCodeGenerator::new()),
        BASE_URL,
    ));
    let auth_service = Arc::new(AuthService::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(JwtAuthenticator::new(JWT_SECRET, 1)),
    ));
    let about_service = Arc::new(AboutService::new(Arc::new(PgAboutRepository::new(pool))));

    let state = AppState {
        shortening_service,
        auth_service,
        about_service,
        click_sender: tx,
        conflate_delete_denial: false,
    };

    (state, rx)
}

/// Full router over a fresh state; the click receiver is returned so the
/// queue stays open for the duration of the test.
pub fn make_server(pool: PgPool) -> (TestServer, mpsc::Receiver<ClickEvent>) {
    let (state, rx) = create_test_state(pool);
    (server_for(state), rx)
}

pub fn server_for(state: AppState) -> TestServer {
    TestServer::new(snaplink::routes::router(state)).unwrap()
}
