mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};

#[tokio::test]
async fn test_health_check_without_auth() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = common::send(
        &app,
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = common::body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], "ok");
    assert!(json["git_version"].as_str().is_some_and(|v| !v.is_empty()));
}

#[tokio::test]
async fn test_suggestions_unavailable_without_endpoint() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    let user = common::create_test_user(&pool, "alice").await;
    let cookie = common::create_session_cookie(&pool, &user).await;

    let response = common::send(
        &app,
        common::post_json("/api/suggestions", &cookie, serde_json::json!({"focus": "legs"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
