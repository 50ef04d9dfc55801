//! Integration tests for the HTTP surface
//!
//! These drive the axum router directly and assert the status codes and
//! response shapes of the public API.

mod support;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use api::avatars::AvatarStore;
use api::jwt::{JwtConfig, JwtService};
use api::membership::MembershipCoordinator;
use api::middleware::AUTH_TOKEN_HEADER;
use api::repositories::{event::EventRepository, user::UserRepository};
use api::routes::create_router;
use api::state::AppState;

use support::{register_user, setup_pool, upcoming_event};

async fn test_app() -> (Router, AppState) {
    let pool = setup_pool().await;
    let jwt_service = JwtService::new(JwtConfig {
        secret: "integration-test-secret".to_string(),
        token_expiry: 900,
    });
    let avatar_store = AvatarStore::from_env().await;
    let user_repository = UserRepository::new(pool.clone());
    let event_repository = EventRepository::new(pool.clone());
    let membership = MembershipCoordinator::new(
        pool.clone(),
        user_repository.clone(),
        event_repository.clone(),
    );

    let state = AppState {
        db_pool: pool,
        jwt_service,
        avatar_store,
        user_repository,
        event_repository,
        membership,
    };

    (create_router(state.clone()), state)
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}

#[tokio::test]
async fn test_health_check() {
    let (app, _state) = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let (app, _state) = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/event/addevent")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_get_event_with_malformed_id_is_bad_request() {
    let (app, _state) = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/event/getallevents/not-a-uuid")
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Invalid event ID");
}

#[tokio::test]
async fn test_get_missing_event_is_not_found() {
    let (app, _state) = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/event/getallevents/{}", Uuid::new_v4()))
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_user_with_invalid_fields_reports_each_error() {
    let (app, _state) = test_app().await;

    let payload = json!({
        "name": "",
        "email": "not-an-email",
        "password": "1234"
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/createuser")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["success"], false);
    let errors = body["errors"].as_array().expect("Expected an error array");
    assert_eq!(errors.len(), 3);
}

#[tokio::test]
async fn test_event_lifecycle_over_http() {
    let (app, state) = test_app().await;

    let host = register_user(&state.user_repository, "http-host").await;
    let guest = register_user(&state.user_repository, "http-guest").await;
    let host_token = state
        .jwt_service
        .issue(host.id)
        .expect("Failed to issue host token");
    let guest_token = state
        .jwt_service
        .issue(guest.id)
        .expect("Failed to issue guest token");

    // Create an event as the host.
    let fields = upcoming_event("HTTP lifecycle");
    let payload = json!({
        "title": fields.title,
        "description": fields.description,
        "location": fields.location,
        "start_at": fields.start_at.to_rfc3339(),
        "end_at": fields.end_at.to_rfc3339(),
    });

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/event/addevent")
                .header(CONTENT_TYPE, "application/json")
                .header(AUTH_TOKEN_HEADER, &host_token)
                .body(Body::from(payload.to_string()))
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);
    let event = response_json(response).await;
    let event_id = event["id"].as_str().expect("Event id missing").to_string();
    assert_eq!(event["created_by"].as_str(), Some(host.id.to_string().as_str()));

    // Attend it as the guest; both sides of the relationship come back.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/event/attendevent/{}", event_id))
                .header(AUTH_TOKEN_HEADER, &guest_token)
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(
        body["event"]["attendees"]
            .as_array()
            .expect("Attendees missing")
            .iter()
            .filter(|v| v.as_str() == Some(guest.id.to_string().as_str()))
            .count(),
        1
    );
    assert!(body["user"].get("password_hash").is_none());

    // A second attend is rejected.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/event/attendevent/{}", event_id))
                .header(AUTH_TOKEN_HEADER, &guest_token)
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Only the creator may delete.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/event/deleteevent/{}", event_id))
                .header(AUTH_TOKEN_HEADER, &guest_token)
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/event/deleteevent/{}", event_id))
                .header(AUTH_TOKEN_HEADER, &host_token)
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["success"], true);

    // The event is gone.
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/event/getallevents/{}", event_id))
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
