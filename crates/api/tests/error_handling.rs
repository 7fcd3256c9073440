//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no router is
//! involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use contacto_api::error::AppError;
use contacto_core::error::CoreError;
use contacto_core::validation::rules::{Constraint, FieldViolation};
use http_body_util::BodyExt;
use serde_json::json;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

fn violation(field: &str, constraint: Constraint, message: &str) -> FieldViolation {
    FieldViolation {
        field: field.to_string(),
        constraint,
        message: message.to_string(),
        value: None,
    }
}

// ---------------------------------------------------------------------------
// Test: CoreError::Validation maps to 400 with the full error list
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_error_returns_400_with_errors() {
    let err = AppError::Core(CoreError::Validation(vec![
        violation("name", Constraint::NotEmpty, "El nombre es requerido"),
        violation("email", Constraint::IsEmail, "Invalid value"),
        violation("email", Constraint::IsString, "Invalid value"),
    ]));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Validation failed for 2 field(s)");
    assert_eq!(json["errors"].as_array().unwrap().len(), 3);
    assert_eq!(
        json["errors"][0],
        json!({
            "field": "name",
            "constraint": "not_empty",
            "message": "El nombre es requerido",
        })
    );
}

// ---------------------------------------------------------------------------
// Test: CoreError::UnknownRuleSet maps to 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_rule_set_returns_404() {
    let err = AppError::Core(CoreError::UnknownRuleSet("delete".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert!(json.get("errors").is_none());
}

// ---------------------------------------------------------------------------
// Test: AppError::BadRequest maps to 400 with BAD_REQUEST code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("invalid field value".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "invalid field value");
}

// ---------------------------------------------------------------------------
// Test: configuration errors map to 500 and sanitize the message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn config_error_returns_500_and_sanitizes_message() {
    let err = AppError::Core(CoreError::InvalidConfig("secret token leaked".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(
        !json.to_string().contains("secret"),
        "Internal error response must not leak sensitive details"
    );
    assert_eq!(json["error"], "An internal error occurred");
}
