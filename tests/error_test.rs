use axum::{http::StatusCode, response::IntoResponse};
use http_body_util::BodyExt;
use ironlog::error::AppError;
use rstest::rstest;

async fn error_message(error: AppError) -> (StatusCode, String) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, json["error"].as_str().unwrap().to_string())
}

#[rstest]
#[case(AppError::NotFound("Workout not found".to_string()), StatusCode::NOT_FOUND)]
#[case(AppError::Forbidden("Access denied".to_string()), StatusCode::FORBIDDEN)]
#[case(AppError::BadRequest("Invalid input".to_string()), StatusCode::BAD_REQUEST)]
#[case(AppError::Validation("Invalid field".to_string()), StatusCode::BAD_REQUEST)]
#[case(AppError::Unauthorized, StatusCode::UNAUTHORIZED)]
#[case(AppError::Internal("boom".to_string()), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(AppError::Upstream("timeout".to_string()), StatusCode::BAD_GATEWAY)]
#[case(AppError::Unavailable("off".to_string()), StatusCode::SERVICE_UNAVAILABLE)]
fn test_error_status(#[case] error: AppError, #[case] expected: StatusCode) {
    assert_eq!(error.into_response().status(), expected);
}

#[tokio::test]
async fn test_client_errors_expose_message() {
    let (status, message) =
        error_message(AppError::Validation("Sets and reps must be at least 1".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message, "Sets and reps must be at least 1");
}

#[tokio::test]
async fn test_internal_errors_hide_details() {
    let (status, message) =
        error_message(AppError::Internal("connection refused at 10.0.0.1".to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!message.contains("10.0.0.1"));
}

#[tokio::test]
async fn test_upstream_errors_hide_details() {
    let (_, message) =
        error_message(AppError::Upstream("401 from api.example.com".to_string())).await;
    assert!(!message.contains("api.example.com"));
}

#[tokio::test]
async fn test_database_error_returns_500() {
    let error = AppError::from(rusqlite::Error::QueryReturnedNoRows);
    let (status, _) = error_message(error).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
