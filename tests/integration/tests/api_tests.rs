//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance (users table migrated)
//! - A reachable media bucket with ambient AWS credentials
//! - Environment variables: DATABASE_URL, MEDIA_BUCKET,
//!   ACCESS_TOKEN_SECRET, REFRESH_TOKEN_SECRET, API_PORT
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, ChangePasswordRequest, Envelope, ErrorResponse,
    LoginRequest, RefreshTokenRequest, RegisterFixture, TestServer, TokenPairResponse,
    UpdateAccountRequest, UserResponse,
};
use reqwest::StatusCode;

type AuthResponse = integration_tests::AuthResponse;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Registration Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let fixture = RegisterFixture::unique();

    let response = server
        .post_multipart("/api/v1/auth/register", fixture.form())
        .await
        .unwrap();
    let envelope: Envelope<UserResponse> =
        assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(envelope.status, 201);
    assert_eq!(envelope.data.username, fixture.username.to_lowercase());
    assert_eq!(envelope.data.email, fixture.email);
    assert!(!envelope.data.avatar.is_empty());
    assert!(envelope.data.watch_history.is_empty());
}

#[tokio::test]
async fn test_register_response_is_sanitized() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let fixture = RegisterFixture::unique();

    let response = server
        .post_multipart("/api/v1/auth/register", fixture.form())
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::CREATED).await.unwrap();

    let data = body["data"].as_object().unwrap();
    assert!(!data.contains_key("password"));
    assert!(!data.contains_key("passwordHash"));
    assert!(!data.contains_key("refreshToken"));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let fixture = RegisterFixture::unique();

    // First registration
    let response = server
        .post_multipart("/api/v1/auth/register", fixture.form())
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    // Second registration with the same email but a different username
    let mut duplicate = RegisterFixture::unique();
    duplicate.email = fixture.email.clone();

    let response = server
        .post_multipart("/api/v1/auth/register", duplicate.form())
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.status, 409);
}

#[tokio::test]
async fn test_register_without_avatar_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let fixture = RegisterFixture::unique();

    let response = server
        .post_multipart("/api/v1/auth/register", fixture.form_without_avatar())
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_register_with_cover_image() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let fixture = RegisterFixture::unique();

    let response = server
        .post_multipart("/api/v1/auth/register", fixture.form_with_cover())
        .await
        .unwrap();
    let envelope: Envelope<UserResponse> =
        assert_json(response, StatusCode::CREATED).await.unwrap();

    assert!(envelope.data.cover_image.is_some());
}

// ============================================================================
// Login / Session Tests
// ============================================================================

async fn register_and_login(server: &TestServer) -> (RegisterFixture, AuthResponse) {
    let fixture = RegisterFixture::unique();
    let response = server
        .post_multipart("/api/v1/auth/register", fixture.form())
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post("/api/v1/auth/login", &LoginRequest::from_register(&fixture))
        .await
        .unwrap();
    let envelope: Envelope<AuthResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    (fixture, envelope.data)
}

#[tokio::test]
async fn test_login_issues_tokens_and_cookies() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let fixture = RegisterFixture::unique();
    let response = server
        .post_multipart("/api/v1/auth/register", fixture.form())
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post("/api/v1/auth/login", &LoginRequest::from_register(&fixture))
        .await
        .unwrap();

    let cookies: Vec<String> = response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok().map(String::from))
        .collect();
    assert!(cookies.iter().any(|c| c.starts_with("accessToken=")));
    assert!(cookies.iter().any(|c| c.starts_with("refreshToken=")));

    let envelope: Envelope<AuthResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!envelope.data.access_token.is_empty());
    assert!(!envelope.data.refresh_token.is_empty());
    assert_eq!(envelope.data.token_type, "Bearer");
    assert_eq!(envelope.data.user.username, fixture.username.to_lowercase());
}

#[tokio::test]
async fn test_login_wrong_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let fixture = RegisterFixture::unique();
    let response = server
        .post_multipart("/api/v1/auth/register", fixture.form())
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post(
            "/api/v1/auth/login",
            &LoginRequest {
                email: fixture.email.clone(),
                password: "WrongPass123!".to_string(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_get_current_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (fixture, auth) = register_and_login(&server).await;

    let response = server
        .get_auth("/api/v1/users/me", &auth.access_token)
        .await
        .unwrap();
    let envelope: Envelope<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(envelope.data.username, fixture.username.to_lowercase());
}

#[tokio::test]
async fn test_get_current_user_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/users/me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_rotates_and_rejects_replay() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_and_login(&server).await;

    // Token timestamps have second resolution; wait so the rotated pair
    // provably differs from the original.
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;

    let response = server
        .post(
            "/api/v1/auth/refresh",
            &RefreshTokenRequest {
                refresh_token: auth.refresh_token.clone(),
            },
        )
        .await
        .unwrap();
    let envelope: Envelope<TokenPairResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_ne!(envelope.data.refresh_token, auth.refresh_token);

    // Replaying the pre-rotation token must fail even though its
    // signature is still valid.
    let response = server
        .post(
            "/api/v1/auth/refresh",
            &RefreshTokenRequest {
                refresh_token: auth.refresh_token,
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_without_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.post_empty("/api/v1/auth/refresh").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_logout_invalidates_refresh_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_and_login(&server).await;

    let response = server
        .post_auth(
            "/api/v1/auth/logout",
            &auth.access_token,
            &serde_json::json!({}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .post(
            "/api/v1/auth/refresh",
            &RefreshTokenRequest {
                refresh_token: auth.refresh_token,
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Profile Tests
// ============================================================================

#[tokio::test]
async fn test_change_password_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (fixture, auth) = register_and_login(&server).await;

    // Wrong old password is rejected
    let response = server
        .post_auth(
            "/api/v1/users/me/password",
            &auth.access_token,
            &ChangePasswordRequest {
                old_password: "WrongPass123!".to_string(),
                new_password: "NewPass123!".to_string(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // Correct old password succeeds
    let response = server
        .post_auth(
            "/api/v1/users/me/password",
            &auth.access_token,
            &ChangePasswordRequest {
                old_password: fixture.password.clone(),
                new_password: "NewPass123!".to_string(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // The new password logs in
    let response = server
        .post(
            "/api/v1/auth/login",
            &LoginRequest {
                email: fixture.email.clone(),
                password: "NewPass123!".to_string(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_update_account_details() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (fixture, auth) = register_and_login(&server).await;

    let new_email = format!("updated-{}", fixture.email);
    let response = server
        .patch_auth(
            "/api/v1/users/me",
            &auth.access_token,
            &UpdateAccountRequest {
                full_name: "Updated Name".to_string(),
                email: new_email.clone(),
            },
        )
        .await
        .unwrap();
    let envelope: Envelope<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(envelope.data.full_name, "Updated Name");
    assert_eq!(envelope.data.email, new_email);
}

#[tokio::test]
async fn test_update_avatar() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_and_login(&server).await;
    let previous_avatar = auth.user.avatar.clone();

    let form = reqwest::multipart::Form::new().part(
        "avatar",
        reqwest::multipart::Part::bytes(integration_tests::TINY_PNG)
            .file_name("new-avatar.png")
            .mime_str("image/png")
            .unwrap(),
    );

    let response = server
        .patch_multipart_auth("/api/v1/users/me/avatar", &auth.access_token, form)
        .await
        .unwrap();
    let envelope: Envelope<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_ne!(envelope.data.avatar, previous_avatar);
}
