use super::*;
use crate::state::test_helpers;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::util::ServiceExt;

fn app() -> Router {
    build_router(test_helpers::test_app_state(), &test_helpers::test_config())
}

async fn body_string(res: axum::response::Response) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn landing_page_renders_with_health_link() {
    let res = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let content_type = res
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();
    assert!(content_type.starts_with("text/html"));

    let body = body_string(res).await;
    assert!(body.contains("Sport Performance Analysis"));
    assert!(body.contains("Welcome to the application"));
    assert!(body.contains(r#"<a href="/health">"#));
}

#[tokio::test]
async fn health_page_is_static_ok() {
    let res = app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_string(res).await;
    assert!(body.contains("Status:"));
    assert!(body.contains("OK"));
    assert!(body.contains("Web application is running successfully"));
}

#[tokio::test]
async fn api_health_reports_service_and_status() {
    let res = app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-correlation-id"));
    assert_eq!(res.headers().get("x-frame-options").unwrap(), "DENY");

    let json: Value = serde_json::from_str(&body_string(res).await).unwrap();
    assert_eq!(json["service"], "sport-performance-api");
    assert_eq!(json["status"], "ok");
    assert!(json["time"].is_string());
}

#[tokio::test]
async fn protected_route_without_token_returns_error_body() {
    let res = app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let json: Value = serde_json::from_str(&body_string(res).await).unwrap();
    assert_eq!(json["error"], "UNAUTHORIZED");
    assert_eq!(json["path"], "/api/v1/me");
    assert!(json["message"].is_string());
    assert!(json["correlationId"].is_string());
}

#[tokio::test]
async fn protected_route_with_garbage_token_is_rejected() {
    let res = app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/me")
                .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn otp_request_with_invalid_email_is_a_validation_error() {
    let res = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/otp/request")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"email":"not-an-email","purpose":"login"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_str(&body_string(res).await).unwrap();
    assert_eq!(json["error"], "VALIDATION_ERROR");
    assert_eq!(json["path"], "/api/v1/auth/otp/request");
}

#[tokio::test]
async fn client_correlation_id_is_echoed_back() {
    let res = app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/me")
                .header("x-correlation-id", "test-correlation-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let json: Value = serde_json::from_str(&body_string(res).await).unwrap();
    assert_eq!(json["correlationId"], "test-correlation-123");
}

#[tokio::test]
async fn valid_signature_without_reachable_session_store_fails_closed() {
    use crate::repos::user_repo::UserRow;
    use chrono::Utc;

    let user = UserRow {
        id: 1,
        user_number: 12345,
        email: "test@example.com".to_string(),
        role: "PLAYER".to_string(),
        is_active: true,
        academy_number: None,
        created_at: Utc::now(),
    };
    let issued = test_helpers::test_jwt_issuer().issue(&user).unwrap();

    // The signature verifies, but the session gate cannot confirm the jti
    // against the (unreachable) test database; the middleware fails closed.
    let res = app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/me")
                .header(header::AUTHORIZATION, format!("Bearer {}", issued.token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let res = app()
        .oneshot(
            Request::builder()
                .uri("/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
