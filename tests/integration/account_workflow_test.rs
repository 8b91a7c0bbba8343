//! End-to-end account workflow against a live Postgres instance.
//!
//! Run with a database available at TEST_DATABASE_URL:
//!   cargo test -p huddle-integration-tests -- --ignored

mod common;

use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use huddle_accounts::{AccountsRepositories, AccountsState, TokenGenerator, TokenPurpose};
use huddle_auth::AuthBackend;
use huddle_email::mock::MockEmailService;

use common::{assert_status, get_request, json_request, response_json, test_database_url};

struct TestHarness {
    app: Router,
    email: MockEmailService,
    pool: sqlx::PgPool,
}

impl TestHarness {
    async fn user_count(&self) -> i64 {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .expect("count query");
        count.0
    }
}

async fn harness() -> TestHarness {
    let pool = sqlx::PgPool::connect(&test_database_url())
        .await
        .expect("postgres reachable");
    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .expect("migrations apply");

    let email = MockEmailService::new();
    let state = AccountsState {
        repos: AccountsRepositories::new(pool.clone()),
        auth: AuthBackend::new(pool.clone(), 3600),
        email: Arc::new(email.clone()),
        registration_tokens: TokenGenerator::new("workflow-secret", TokenPurpose::Registration),
        reset_tokens: TokenGenerator::new("workflow-secret", TokenPurpose::PasswordReset),
    };

    TestHarness {
        app: huddle_accounts::routes().with_state(state),
        email,
        pool,
    }
}

/// Pull `(uidb64, token)` out of the first emailed link containing `action`.
fn link_parts(body: &str, action: &str) -> (String, String) {
    let url = body
        .split_whitespace()
        .find(|word| word.contains(action))
        .unwrap_or_else(|| panic!("no {} link in email body: {}", action, body));
    let segments: Vec<&str> = url.trim_end_matches('/').rsplit('/').collect();
    // .../{uidb64}/{token}/{action}
    (segments[2].to_string(), segments[1].to_string())
}

fn session_cookie_from(response: &axum::http::Response<axum::body::Body>) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("set-cookie header")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

#[tokio::test]
#[ignore] // Requires live Postgres at TEST_DATABASE_URL
async fn test_full_account_workflow() {
    let t = harness().await;
    let run = Uuid::new_v4().simple().to_string();

    let founder = format!("founder-{}@example.com", run);
    let teammate = format!("teammate-{}@example.com", run);
    let team_name = format!("Crew {}", run);

    // Register: inactive account, confirmation email
    let response = t
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            "/register/",
            json!({"email": founder, "password": "secret123", "first_name": "Ada"}),
        ))
        .await
        .unwrap();
    assert_status(&response, StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["data"], "Check your email");

    // Registering the same email again is a field error; no new row
    let count_before = t.user_count().await;
    let response = t
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            "/register/",
            json!({"email": founder, "password": "different1"}),
        ))
        .await
        .unwrap();
    assert_status(&response, StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["errors"]["email"][0], "Email already exists");
    assert_eq!(t.user_count().await, count_before);
    assert_eq!(t.email.get_emails_for_recipient(&founder).len(), 1);

    // Login before confirmation fails
    let response = t
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            "/login/",
            json!({"email": founder, "password": "secret123"}),
        ))
        .await
        .unwrap();
    assert_status(&response, StatusCode::BAD_REQUEST);

    // Confirm via the emailed link; logs in
    let emails = t.email.get_emails_for_recipient(&founder);
    assert_eq!(emails.len(), 1);
    let (uidb64, token) = link_parts(&emails[0].message.body_text, "/confirm/");

    let response = t
        .app
        .clone()
        .oneshot(get_request(&format!("/{}/{}/confirm/", uidb64, token)))
        .await
        .unwrap();
    assert_status(&response, StatusCode::OK);
    let founder_cookie = session_cookie_from(&response);
    let body = response_json(response).await;
    assert_eq!(body["url"], "/create_team/");

    // Confirmation links are single-use
    let response = t
        .app
        .clone()
        .oneshot(get_request(&format!("/{}/{}/confirm/", uidb64, token)))
        .await
        .unwrap();
    assert_status(&response, StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Invalid user");

    // Create a team
    let mut request = json_request("POST", "/create_team/", json!({"name": team_name}));
    request
        .headers_mut()
        .insert(header::COOKIE, founder_cookie.parse().unwrap());
    let response = t.app.clone().oneshot(request).await.unwrap();
    assert_status(&response, StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["name"], json!(team_name));

    // Invite a teammate
    let mut request = json_request("POST", "/invite/", json!({"email": teammate}));
    request
        .headers_mut()
        .insert(header::COOKIE, founder_cookie.parse().unwrap());
    let response = t.app.clone().oneshot(request).await.unwrap();
    assert_status(&response, StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"], "Email is sent");
    assert_eq!(t.email.get_emails_for_recipient(&teammate).len(), 1);

    // Invite-driven registration: active immediately, joined, logged in
    let response = t
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/register/?team={}", team_name.replace(' ', "%20")),
            json!({"email": teammate, "password": "secret456"}),
        ))
        .await
        .unwrap();
    assert_status(&response, StatusCode::CREATED);
    let teammate_cookie = session_cookie_from(&response);

    // Teammate already has a team, so team creation is forbidden
    let mut request = json_request("POST", "/create_team/", json!({"name": "Another"}));
    request
        .headers_mut()
        .insert(header::COOKIE, teammate_cookie.parse().unwrap());
    let response = t.app.clone().oneshot(request).await.unwrap();
    assert_status(&response, StatusCode::FORBIDDEN);

    // Forgot password issues a reset link, visiting it emails a new password
    let response = t
        .app
        .clone()
        .oneshot(get_request("/logout/"))
        .await
        .unwrap();
    assert_status(&response, StatusCode::UNAUTHORIZED);

    // Forgot-password for an address with no account: field error, no send
    let ghost = format!("ghost-{}@example.com", run);
    let response = t
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            "/forgot_password/",
            json!({"email": ghost}),
        ))
        .await
        .unwrap();
    assert_status(&response, StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["errors"]["email"][0], "Email does not exist");
    assert!(t.email.get_emails_for_recipient(&ghost).is_empty());

    let response = t
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            "/forgot_password/",
            json!({"email": founder}),
        ))
        .await
        .unwrap();
    assert_status(&response, StatusCode::OK);

    let emails = t.email.get_emails_for_recipient(&founder);
    let reset = emails
        .iter()
        .find(|e| e.message.subject == "Forgot password")
        .expect("reset email");
    let (uidb64, token) = link_parts(&reset.message.body_text, "/forgot_password_accept/");

    let response = t
        .app
        .clone()
        .oneshot(get_request(&format!(
            "/{}/{}/forgot_password_accept/",
            uidb64, token
        )))
        .await
        .unwrap();
    assert_status(&response, StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["url"], "/login/");

    let emails = t.email.get_emails_for_recipient(&founder);
    let delivered = emails
        .iter()
        .find(|e| e.message.subject == "New password")
        .expect("new password email");
    let new_password = delivered
        .message
        .body_text
        .rsplit(' ')
        .next()
        .unwrap()
        .to_string();

    // Old password no longer works, the generated one does
    let response = t
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            "/login/",
            json!({"email": founder, "password": "secret123"}),
        ))
        .await
        .unwrap();
    assert_status(&response, StatusCode::BAD_REQUEST);

    let response = t
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            "/login/",
            json!({"email": founder, "password": new_password}),
        ))
        .await
        .unwrap();
    assert_status(&response, StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["url"], "/register/");
}
