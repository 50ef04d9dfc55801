//! API service routes

use axum::{
    Json, Router,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde_json::json;

use crate::{middleware::auth_middleware, state::AppState};

pub mod auth;
pub mod events;

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/api/auth/updateuser", put(auth::update_user))
        .route("/api/auth/deleteuser", delete(auth::delete_user))
        .route("/api/event/eventsvisiting", get(events::events_visiting))
        .route("/api/event/eventshosting", get(events::events_hosting))
        .route("/api/event/addevent", post(events::add_event))
        .route("/api/event/attendevent/:id", post(events::attend_event))
        .route("/api/event/unattendevent/:id", delete(events::unattend_event))
        .route("/api/event/updateevent/:id", put(events::update_event))
        .route("/api/event/deleteevent/:id", delete(events::delete_event))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/auth/createuser", post(auth::create_user))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/getuser/:id", get(auth::get_user))
        .route("/api/event/getallevents", get(events::get_all_events))
        .route("/api/event/getallevents/:id", get(events::get_event))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "rsvp-api"
    }))
}
