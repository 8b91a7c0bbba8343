//! Router-level tests for the accounts API surface.
//!
//! These exercise routing, validation, auth gates, and link parsing
//! through the real application router. None of them reach the
//! database, so they run without Postgres.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use common::{assert_status, get_request, json_request, response_json, test_app};

#[tokio::test]
async fn test_health_check() {
    let app = test_app().await;

    let response = app.oneshot(get_request("/health")).await.unwrap();
    assert_status(&response, StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = test_app().await;

    let response = app.oneshot(get_request("/no_such_route/")).await.unwrap();
    assert_status(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let app = test_app().await;

    let request = json_request(
        "POST",
        "/register/",
        json!({"email": "not-an-email", "password": "secret123"}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_status(&response, StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert!(body["errors"]["email"].is_array(), "body: {}", body);
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let app = test_app().await;

    let request = json_request(
        "POST",
        "/register/",
        json!({"email": "new@example.com", "password": "short"}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_status(&response, StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(
        body["errors"]["password"][0],
        "Password must be at least 6 characters"
    );
}

#[tokio::test]
async fn test_register_rejects_malformed_json() {
    let app = test_app().await;

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/register/")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_status(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_rejects_invalid_payload() {
    let app = test_app().await;

    let request = json_request("POST", "/login/", json!({"email": "nope", "password": "x"}));
    let response = app.oneshot(request).await.unwrap();
    assert_status(&response, StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert!(body["errors"]["email"].is_array());
    assert!(body["errors"]["password"].is_array());
}

#[tokio::test]
async fn test_confirm_link_with_garbage_uid_is_invalid_user() {
    let app = test_app().await;

    let response = app
        .oneshot(get_request("/!!!not-base64!!!/sometoken/confirm/"))
        .await
        .unwrap();
    assert_status(&response, StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["error"], "Invalid user");
}

#[tokio::test]
async fn test_forgot_password_accept_with_garbage_uid_is_invalid_user() {
    let app = test_app().await;

    let response = app
        .oneshot(get_request("/%20/sometoken/forgot_password_accept/"))
        .await
        .unwrap();
    assert_status(&response, StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["error"], "Invalid user");
}

#[tokio::test]
async fn test_logout_requires_authentication() {
    let app = test_app().await;

    let response = app.oneshot(get_request("/logout/")).await.unwrap();
    assert_status(&response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_team_requires_authentication() {
    let app = test_app().await;

    let request = json_request("POST", "/create_team/", json!({"name": "Crew"}));
    let response = app.oneshot(request).await.unwrap();
    assert_status(&response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invite_requires_authentication() {
    let app = test_app().await;

    let request = json_request("POST", "/invite/", json!({"email": "x@example.com"}));
    let response = app.oneshot(request).await.unwrap();
    assert_status(&response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_set_password_requires_authentication() {
    let app = test_app().await;

    let request = json_request(
        "PUT",
        "/set_password/",
        json!({"old_password": "a", "new_password": "longenough"}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_status(&response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invite_rejects_non_bearer_authorization() {
    let app = test_app().await;

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/invite/")
        .header("content-type", "application/json")
        .header("authorization", "Basic dXNlcjpwYXNz")
        .body(axum::body::Body::from(
            json!({"email": "x@example.com"}).to_string(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_status(&response, StatusCode::UNAUTHORIZED);
}
