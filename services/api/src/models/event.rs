//! Event model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::user::PublicUser;

/// Event entity
///
/// `created_by` is unset when the creator account has been deleted; such
/// events are preserved as orphans. `attendees` is a duplicate-free set of
/// user ids mirrored by each user's `events_attending` list.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub attendees: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Validated fields for event creation
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
}

/// Validated partial update for an event
///
/// Fields left as `None` are not touched by the update.
#[derive(Debug, Clone, Default)]
pub struct EventChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
}

/// Request for event creation
///
/// The timestamps arrive as ISO 8601 strings and are parsed during
/// validation so a malformed value yields a field-level error.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_at: String,
    pub end_at: String,
}

/// Partial event update request; omitted fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_at: Option<String>,
    pub end_at: Option<String>,
}

/// Response for attend/unattend: both sides of the updated relationship
#[derive(Debug, Serialize)]
pub struct AttendanceResponse {
    pub event: Event,
    pub user: PublicUser,
}

/// Response for event updates
#[derive(Debug, Serialize)]
pub struct UpdateEventResponse {
    pub success: bool,
    pub event: Event,
}

/// Response for event deletion
#[derive(Debug, Serialize)]
pub struct DeleteEventResponse {
    pub success: bool,
    pub event: Event,
}
