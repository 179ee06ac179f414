use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use backend::{AppState, config::Config, router::create_router};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

// 认证边界测试：连接惰性建立，请求在认证层被拒绝时不会触达数据库和缓存
fn test_state() -> AppState {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_lazy("postgres://postgres@localhost/cms_test")
        .expect("lazy pool");
    let redis = redis::Client::open("redis://127.0.0.1/").expect("redis client");

    let config = Config {
        database_url: "postgres://postgres@localhost/cms_test".into(),
        redis_url: "redis://127.0.0.1/".into(),
        jwt_secret: "integration-test-secret".into(),
        admin_password_hash: bcrypt::hash("letmein", 4).expect("hash"),
        admin_token_expiration_secs: 3600,
        server_host: "127.0.0.1".into(),
        server_port: 3000,
        upload_dir: "uploads".into(),
    };

    AppState {
        pool,
        config,
        redis: Arc::new(redis),
    }
}

#[tokio::test]
async fn upload_without_token_is_rejected() {
    let app = create_router(test_state());

    let request = Request::builder()
        .method("POST")
        .uri("/add-blog")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn adminpanel_with_bad_token_is_rejected() {
    let app = create_router(test_state());

    let request = Request::builder()
        .method("GET")
        .uri("/adminpanel")
        .header(header::AUTHORIZATION, "Bearer not-a-token")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_with_wrong_password_fails() {
    let app = create_router(test_state());

    let request = Request::builder()
        .method("POST")
        .uri("/admin/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"password":"guess"}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = to_bytes(response.into_body(), 1024).await.unwrap();
    let envelope: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(envelope["code"], 1002);
}

#[tokio::test]
async fn login_token_opens_adminpanel() {
    let state = test_state();

    let request = Request::builder()
        .method("POST")
        .uri("/admin/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"password":"letmein"}"#))
        .unwrap();
    let response = create_router(state.clone()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
    let envelope: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(envelope["code"], 0);
    let token = envelope["resp_data"]["token"].as_str().expect("token");

    let request = Request::builder()
        .method("GET")
        .uri("/adminpanel")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = create_router(state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
