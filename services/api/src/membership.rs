//! Membership coordinator: paired mutations across users and events
//!
//! Users and events reference each other: a user row carries the ids of the
//! events it hosts and attends, an event row carries its creator and its
//! attendee set. Every operation that touches both sides runs here, inside a
//! single database transaction, so no success path can leave the two
//! collections disagreeing. Precondition checks (already attending, wrong
//! creator) stay read-check-write and are advisory under concurrency; the
//! transaction bounds the damage to "operation failed", never "references
//! dangle".

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::event::{Event, EventChanges, NewEvent};
use crate::models::user::User;
use crate::repositories::{event::EventRepository, user::UserRepository};

/// Coordinator for mutations spanning the user and event stores
#[derive(Clone)]
pub struct MembershipCoordinator {
    pool: PgPool,
    users: UserRepository,
    events: EventRepository,
}

impl MembershipCoordinator {
    /// Create a new membership coordinator
    pub fn new(pool: PgPool, users: UserRepository, events: EventRepository) -> Self {
        Self {
            pool,
            users,
            events,
        }
    }

    /// Create an event and record it in the creator's hosting list
    ///
    /// The insert and the hosting-list append commit together; if the
    /// creator row is gone by the time of the append, the whole operation
    /// rolls back and the event from the first write does not survive.
    pub async fn create_event(&self, creator_id: Uuid, fields: NewEvent) -> ApiResult<Event> {
        if fields.end_at <= fields.start_at {
            return Err(ApiError::InvalidRange(
                "End date and time must be after start date and time".to_string(),
            ));
        }

        info!("Creating event '{}' for user {}", fields.title, creator_id);

        let mut tx = self.pool.begin().await?;

        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (id, title, description, location, start_at, end_at, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, description, location, start_at, end_at,
                      created_by, attendees, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(&fields.location)
        .bind(fields.start_at)
        .bind(fields.end_at)
        .bind(creator_id)
        .fetch_one(&mut *tx)
        .await?;

        let appended = sqlx::query(
            r#"
            UPDATE users
            SET events_hosting = array_append(events_hosting, $2)
            WHERE id = $1
            "#,
        )
        .bind(creator_id)
        .bind(event.id)
        .execute(&mut *tx)
        .await?;

        if appended.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(ApiError::NotFound("User not found".to_string()));
        }

        tx.commit().await?;
        Ok(event)
    }

    /// Add a user to an event's attendee set and mirror it on the user
    ///
    /// A second call for the same pair fails with a conflict rather than
    /// silently succeeding.
    pub async fn attend_event(&self, user_id: Uuid, event_id: Uuid) -> ApiResult<(Event, User)> {
        info!("User {} attending event {}", user_id, event_id);

        let mut tx = self.pool.begin().await?;

        let event = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, title, description, location, start_at, end_at,
                   created_by, attendees, created_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(event_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

        if event.attendees.contains(&user_id) {
            return Err(ApiError::Conflict(
                "User is already attending this event".to_string(),
            ));
        }

        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET attendees = array_append(attendees, $2)
            WHERE id = $1
            RETURNING id, title, description, location, start_at, end_at,
                      created_by, attendees, created_at
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET events_attending = array_append(events_attending, $2)
            WHERE id = $1
            RETURNING id, name, email, password_hash, display_picture,
                      events_hosting, events_attending, created_at
            "#,
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(user) = user else {
            tx.rollback().await?;
            return Err(ApiError::NotFound("User not found".to_string()));
        };

        tx.commit().await?;
        Ok((event, user))
    }

    /// Remove a user from an event's attendee set and mirror it on the user
    pub async fn unattend_event(&self, user_id: Uuid, event_id: Uuid) -> ApiResult<(Event, User)> {
        info!("User {} leaving event {}", user_id, event_id);

        let mut tx = self.pool.begin().await?;

        let event = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, title, description, location, start_at, end_at,
                   created_by, attendees, created_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(event_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

        if !event.attendees.contains(&user_id) {
            return Err(ApiError::Conflict(
                "User is not attending this event".to_string(),
            ));
        }

        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET attendees = array_remove(attendees, $2)
            WHERE id = $1
            RETURNING id, title, description, location, start_at, end_at,
                      created_by, attendees, created_at
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET events_attending = array_remove(events_attending, $2)
            WHERE id = $1
            RETURNING id, name, email, password_hash, display_picture,
                      events_hosting, events_attending, created_at
            "#,
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(user) = user else {
            tx.rollback().await?;
            return Err(ApiError::NotFound("User not found".to_string()));
        };

        tx.commit().await?;
        Ok((event, user))
    }

    /// Update an event's fields; creator only
    ///
    /// References don't change here, so this is a single-record write. A
    /// supplied start or end is validated against the supplied counterpart,
    /// or against the stored one when only one side changes. Orphaned events
    /// (creator deleted) are not updatable by anyone.
    pub async fn update_event(
        &self,
        requester_id: Uuid,
        event_id: Uuid,
        changes: EventChanges,
    ) -> ApiResult<Event> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

        if event.created_by != Some(requester_id) {
            return Err(ApiError::Unauthorized(
                "Only the event creator can update this event".to_string(),
            ));
        }

        let start_at = changes.start_at.unwrap_or(event.start_at);
        let end_at = changes.end_at.unwrap_or(event.end_at);
        if end_at <= start_at {
            return Err(ApiError::InvalidRange(
                "End date and time must be after start date and time".to_string(),
            ));
        }

        let updated = self
            .events
            .update(event_id, &changes)
            .await?
            .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

        Ok(updated)
    }

    /// Delete an event and every reference to it; creator only
    ///
    /// Removes the event id from the creator's hosting list and from the
    /// attending list of every user in the attendee set, all in one
    /// transaction with the delete itself.
    pub async fn delete_event(&self, requester_id: Uuid, event_id: Uuid) -> ApiResult<Event> {
        let mut tx = self.pool.begin().await?;

        let event = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, title, description, location, start_at, end_at,
                   created_by, attendees, created_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(event_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

        if event.created_by != Some(requester_id) {
            return Err(ApiError::Unauthorized(
                "Only the event creator can delete this event".to_string(),
            ));
        }

        info!("Deleting event {} with {} attendees", event_id, event.attendees.len());

        sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(event_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            UPDATE users
            SET events_hosting = array_remove(events_hosting, $2)
            WHERE id = $1
            "#,
        )
        .bind(requester_id)
        .bind(event_id)
        .execute(&mut *tx)
        .await?;

        if !event.attendees.is_empty() {
            sqlx::query(
                r#"
                UPDATE users
                SET events_attending = array_remove(events_attending, $2)
                WHERE id = ANY($1)
                "#,
            )
            .bind(&event.attendees)
            .bind(event_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(event)
    }

    /// Delete a user account after confirming the password
    ///
    /// The user is pulled out of every attendee set it appears in; events it
    /// created are preserved with their creator unset, orphaned rather than
    /// cascade-deleted. Returns the deleted record so the caller can clean
    /// up the display-picture blob.
    pub async fn delete_user(&self, user_id: Uuid, password: &str) -> ApiResult<User> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        if !self.users.verify_password(&user, password).await? {
            return Err(ApiError::BadRequest("Incorrect password".to_string()));
        }

        info!("Deleting user account {}", user_id);

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE events
            SET attendees = array_remove(attendees, $1)
            WHERE $1 = ANY(attendees)
            "#,
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE events
            SET created_by = NULL
            WHERE created_by = $1
            "#,
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(user)
    }
}
