//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server needed.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use filegate_api::error::AppError;
use filegate_core::error::{CoreError, FieldError};
use filegate_core::store::StoreError;
use http_body_util::BodyExt;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn validation_error_returns_422() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Validation(vec![
            FieldError::new("id", "id is required"),
            FieldError::new("password", "password is required"),
        ])))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Validation failed");
    assert_eq!(
        json["details"],
        serde_json::json!([
            { "field": "id", "message": "id is required" },
            { "field": "password", "message": "password is required" },
        ])
    );
}

#[tokio::test]
async fn user_exists_returns_409() {
    let (status, json) = error_to_response(AppError::Core(CoreError::UserExists)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "USER_EXISTS");
}

#[tokio::test]
async fn invalid_credentials_returns_401() {
    let (status, json) = error_to_response(AppError::Core(CoreError::InvalidCredentials)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "INVALID_CREDENTIALS");
    assert_eq!(json["error"], "Invalid id or password");
}

#[tokio::test]
async fn unauthorized_and_expired_are_distinguishable() {
    let (status, unauthorized) =
        error_to_response(AppError::Core(CoreError::Unauthorized("nope".into()))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(unauthorized["code"], "UNAUTHORIZED");

    let (status, expired) =
        error_to_response(AppError::Core(CoreError::TokenExpired("old".into()))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(expired["code"], "TOKEN_EXPIRED");
    assert_eq!(expired["error"], "old");
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let (status, json) = error_to_response(AppError::BadRequest("invalid field value".into())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "invalid field value");
}

#[tokio::test]
async fn internal_errors_are_sanitized() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Internal(
            "secret database credentials leaked".into(),
        )))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_SERVER_ERROR");
    assert!(!json["error"].as_str().unwrap().contains("secret"));

    let store_failure: CoreError = StoreError::Backend("connection refused at 10.0.0.5".into()).into();
    let (status, json) = error_to_response(AppError::Core(store_failure)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!json["error"].as_str().unwrap().contains("10.0.0.5"));
}
