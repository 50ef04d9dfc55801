//! Event routes: listing, creation, attendance, update, deletion

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::event::{
        AttendanceResponse, CreateEventRequest, DeleteEventResponse, EventChanges, NewEvent,
        UpdateEventRequest, UpdateEventResponse,
    },
    models::user::PublicUser,
    state::AppState,
    validation,
};

fn parse_event_id(id: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| ApiError::BadRequest("Invalid event ID".to_string()))
}

/// List events that have not yet ended, soonest first
pub async fn get_all_events(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let events = state.event_repository.list_all(false).await?;
    Ok(Json(events))
}

/// Get a single event by ID
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let event_id = parse_event_id(&id)?;

    let event = state
        .event_repository
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    Ok(Json(event))
}

/// List the events the caller has marked to attend
pub async fn events_visiting(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let events = state.event_repository.list_by_attendee(auth.id).await?;
    Ok(Json(events))
}

/// List the events the caller is hosting
pub async fn events_hosting(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let events = state.event_repository.list_by_creator(auth.id).await?;
    Ok(Json(events))
}

/// Create a new event hosted by the caller
pub async fn add_event(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CreateEventRequest>,
) -> ApiResult<impl IntoResponse> {
    let mut errors = Vec::new();
    if let Err(e) = validation::validate_title(&payload.title) {
        errors.push(e);
    }
    if let Err(e) = validation::validate_description(&payload.description) {
        errors.push(e);
    }
    if let Err(e) = validation::validate_location(&payload.location) {
        errors.push(e);
    }

    let start_at = match validation::parse_datetime(&payload.start_at, "start date and time") {
        Ok(dt) => Some(dt),
        Err(e) => {
            errors.push(e);
            None
        }
    };
    let end_at = match validation::parse_datetime(&payload.end_at, "end date and time") {
        Ok(dt) => Some(dt),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    match (start_at, end_at) {
        (Some(start_at), Some(end_at)) if errors.is_empty() => {
            let fields = NewEvent {
                title: payload.title,
                description: payload.description,
                location: payload.location,
                start_at,
                end_at,
            };

            let event = state.membership.create_event(auth.id, fields).await?;
            Ok(Json(event))
        }
        _ => Err(ApiError::Validation(errors)),
    }
}

/// Mark the caller as attending an event
pub async fn attend_event(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let event_id = parse_event_id(&id)?;

    let (event, user) = state.membership.attend_event(auth.id, event_id).await?;

    Ok(Json(AttendanceResponse {
        event,
        user: PublicUser::from(user),
    }))
}

/// Remove the caller from an event's attendee set
pub async fn unattend_event(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let event_id = parse_event_id(&id)?;

    let (event, user) = state.membership.unattend_event(auth.id, event_id).await?;

    Ok(Json(AttendanceResponse {
        event,
        user: PublicUser::from(user),
    }))
}

/// Update an event; creator only, omitted fields are left unchanged
pub async fn update_event(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateEventRequest>,
) -> ApiResult<impl IntoResponse> {
    let event_id = parse_event_id(&id)?;

    let mut errors = Vec::new();
    if let Some(title) = &payload.title {
        if let Err(e) = validation::validate_title(title) {
            errors.push(e);
        }
    }
    if let Some(description) = &payload.description {
        if let Err(e) = validation::validate_description(description) {
            errors.push(e);
        }
    }
    if let Some(location) = &payload.location {
        if let Err(e) = validation::validate_location(location) {
            errors.push(e);
        }
    }

    let start_at = match &payload.start_at {
        Some(value) => match validation::parse_datetime(value, "start date and time") {
            Ok(dt) => Some(dt),
            Err(e) => {
                errors.push(e);
                None
            }
        },
        None => None,
    };
    let end_at = match &payload.end_at {
        Some(value) => match validation::parse_datetime(value, "end date and time") {
            Ok(dt) => Some(dt),
            Err(e) => {
                errors.push(e);
                None
            }
        },
        None => None,
    };

    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let changes = EventChanges {
        title: payload.title,
        description: payload.description,
        location: payload.location,
        start_at,
        end_at,
    };

    let event = state
        .membership
        .update_event(auth.id, event_id, changes)
        .await?;

    Ok(Json(UpdateEventResponse {
        success: true,
        event,
    }))
}

/// Delete an event; creator only
pub async fn delete_event(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let event_id = parse_event_id(&id)?;

    let event = state.membership.delete_event(auth.id, event_id).await?;

    Ok(Json(DeleteEventResponse {
        success: true,
        event,
    }))
}
