//! Integration tests for the backend client using wiremock mock server

use lexa_client::{AuthOutcome, BackendClient, ClientError, Readiness, Timeouts};
use lexa_core::{AccessibilityProfile, ProfileRecord};

use std::time::Duration;

use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, method, path},
};

fn client_for(server: &MockServer) -> BackendClient {
    BackendClient::new(&server.uri(), Timeouts::default())
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_both_services_up_is_fully_ready() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "gemini_enabled": true,
            "mongodb_enabled": true
        })))
        .mount(&mock_server)
        .await;

    let report = client_for(&mock_server).health().await.unwrap();

    assert_eq!(report.readiness, Readiness::FullyReady);
    assert!(report.gemini_enabled);
    assert!(report.mongodb_enabled);
}

#[tokio::test]
async fn test_health_error_status_is_degraded_regardless_of_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "gemini_enabled": true,
            "mongodb_enabled": true
        })))
        .mount(&mock_server)
        .await;

    let report = client_for(&mock_server).health().await.unwrap();

    assert_eq!(report.readiness, Readiness::Degraded);
    assert_eq!(report.status, 500);
}

#[tokio::test]
async fn test_health_timeout_is_timeout_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"gemini_enabled": true, "mongodb_enabled": true}))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&mock_server)
        .await;

    let client = BackendClient::new(
        &mock_server.uri(),
        Timeouts {
            health: Duration::from_millis(50),
            ..Default::default()
        },
    );

    let err = client.health().await.unwrap_err();
    assert!(matches!(err, ClientError::Timeout { .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_health_unreachable_backend_is_network_error() {
    // Port from the reserved TEST-NET range; nothing listens there.
    let client = BackendClient::new("http://127.0.0.1:1", Timeouts::default());

    let err = client.health().await.unwrap_err();
    assert!(matches!(err, ClientError::Network { .. }));
}

// =============================================================================
// Auth
// =============================================================================

#[tokio::test]
async fn test_login_success_returns_granted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_string_contains("reader@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "userId": "u-100"
        })))
        .mount(&mock_server)
        .await;

    let outcome = client_for(&mock_server)
        .login("reader@example.com", "hunter2")
        .await
        .unwrap();

    assert_eq!(
        outcome,
        AuthOutcome::Granted {
            user_id: "u-100".into()
        }
    );
}

#[tokio::test]
async fn test_login_rejection_is_denied_not_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "wrong password"
        })))
        .mount(&mock_server)
        .await;

    let outcome = client_for(&mock_server)
        .login("reader@example.com", "nope")
        .await
        .unwrap();

    assert_eq!(
        outcome,
        AuthOutcome::Denied {
            reason: "wrong password".into()
        }
    );
}

#[tokio::test]
async fn test_register_empty_email_is_validation_error_without_request() {
    let mock_server = MockServer::start().await;
    // No mock mounted: a request would 404 and fail differently.

    let err = client_for(&mock_server)
        .register("", "secret")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Validation { field: "email", .. }));
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 0);
}

#[tokio::test]
async fn test_login_empty_password_is_validation_error() {
    let mock_server = MockServer::start().await;

    let err = client_for(&mock_server)
        .login("reader@example.com", "")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ClientError::Validation {
            field: "password",
            ..
        }
    ));
}

// =============================================================================
// Profile
// =============================================================================

#[tokio::test]
async fn test_save_profile_posts_user_and_mode() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/accessibility/profile/save"))
        .and(body_string_contains("u-100"))
        .and(body_string_contains("dyslexia"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let record = ProfileRecord::new(AccessibilityProfile::Dyslexia);
    client_for(&mock_server)
        .save_profile("u-100", &record)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_get_profile_returns_stored_mode() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/accessibility/profile/get/u-100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "profile": {"mode": "visual_impairment"}
        })))
        .mount(&mock_server)
        .await;

    let profile = client_for(&mock_server).get_profile("u-100").await.unwrap();
    assert_eq!(profile, Some(AccessibilityProfile::VisualImpairment));
}

#[tokio::test]
async fn test_get_profile_absent_returns_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/accessibility/profile/get/u-100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false
        })))
        .mount(&mock_server)
        .await;

    let profile = client_for(&mock_server).get_profile("u-100").await.unwrap();
    assert_eq!(profile, None);
}

#[tokio::test]
async fn test_get_profile_unknown_mode_is_tolerated_as_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/accessibility/profile/get/u-100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "profile": {"mode": "hyperfocus_v2"}
        })))
        .mount(&mock_server)
        .await;

    let profile = client_for(&mock_server).get_profile("u-100").await.unwrap();
    assert_eq!(profile, None);
}

// =============================================================================
// Insights
// =============================================================================

#[tokio::test]
async fn test_insights_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/analytics/insights/u-100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "insights": {"most_used": "simplify"},
            "session_count": 17
        })))
        .mount(&mock_server)
        .await;

    let insights = client_for(&mock_server).insights("u-100").await.unwrap();

    assert_eq!(insights.session_count, 17);
    assert_eq!(insights.insights["most_used"], "simplify");
}

#[tokio::test]
async fn test_insights_http_error_is_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/analytics/insights/u-100"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).insights("u-100").await.unwrap_err();

    assert!(matches!(err, ClientError::Api { status: 500, .. }));
    assert!(!err.is_retryable());
}
