//! Event repository for database operations
//!
//! Single-record reads and writes only. Mutations that must stay in step
//! with user records (creation, attendance, deletion) are owned by the
//! membership coordinator.

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::event::{Event, EventChanges};

/// Event repository
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Create a new event repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an event by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, title, description, location, start_at, end_at,
                   created_by, attendees, created_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// List events for the public view
    ///
    /// Unless `include_ended` is set, events whose end time has passed are
    /// excluded; results are ordered by ascending start time.
    pub async fn list_all(&self, include_ended: bool) -> Result<Vec<Event>> {
        let events = if include_ended {
            sqlx::query_as::<_, Event>(
                r#"
                SELECT id, title, description, location, start_at, end_at,
                       created_by, attendees, created_at
                FROM events
                ORDER BY start_at ASC
                "#,
            )
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, Event>(
                r#"
                SELECT id, title, description, location, start_at, end_at,
                       created_by, attendees, created_at
                FROM events
                WHERE end_at > NOW()
                ORDER BY start_at ASC
                "#,
            )
            .fetch_all(&self.pool)
            .await?
        };

        Ok(events)
    }

    /// List the events a user is attending
    pub async fn list_by_attendee(&self, user_id: Uuid) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, title, description, location, start_at, end_at,
                   created_by, attendees, created_at
            FROM events
            WHERE $1 = ANY(attendees)
            ORDER BY start_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// List the events a user created
    pub async fn list_by_creator(&self, user_id: Uuid) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, title, description, location, start_at, end_at,
                   created_by, attendees, created_at
            FROM events
            WHERE created_by = $1
            ORDER BY start_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Apply a partial update; only supplied fields change
    ///
    /// Returns `None` when the event no longer exists. Range and
    /// authorization checks are the caller's responsibility.
    pub async fn update(&self, id: Uuid, changes: &EventChanges) -> Result<Option<Event>> {
        info!("Updating event: {}", id);

        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                location = COALESCE($4, location),
                start_at = COALESCE($5, start_at),
                end_at = COALESCE($6, end_at)
            WHERE id = $1
            RETURNING id, title, description, location, start_at, end_at,
                      created_by, attendees, created_at
            "#,
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(&changes.location)
        .bind(changes.start_at)
        .bind(changes.end_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }
}
