//! User model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User entity
///
/// `events_hosting` holds the ids of events this user created and
/// `events_attending` the ids of events this user joined. Both lists mirror
/// the corresponding event rows and are maintained by the membership
/// coordinator.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub display_picture: String,
    pub events_hosting: Vec<Uuid>,
    pub events_attending: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// User representation safe to return to callers (no credential)
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub display_picture: String,
    pub events_hosting: Vec<Uuid>,
    pub events_attending: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        PublicUser {
            id: user.id,
            name: user.name,
            email: user.email,
            display_picture: user.display_picture,
            events_hosting: user.events_hosting,
            events_attending: user.events_attending,
            created_at: user.created_at,
        }
    }
}

/// Request for user registration
///
/// `display_picture` is an opaque object reference produced by a separate
/// upload flow; the default picture is used when it is omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub display_picture: Option<String>,
}

/// Request for user login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Partial profile update
///
/// Every field is presence-indicating: an omitted field is left unchanged.
/// No profile field is clearable, so a single `Option` level is enough to
/// distinguish "omitted" from "supplied".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub display_picture: Option<String>,
}

/// Request for password-confirmed account deletion
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteUserRequest {
    pub password: String,
}

/// Response for registration and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub auth_token: String,
    pub user_id: Uuid,
}

/// Response for profile updates
#[derive(Debug, Serialize)]
pub struct UpdateUserResponse {
    pub success: bool,
    pub user: PublicUser,
}

/// Response for account deletion
#[derive(Debug, Serialize)]
pub struct DeleteUserResponse {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_omitted_fields_are_none() {
        let request: UpdateUserRequest =
            serde_json::from_str(r#"{"name": "New Name"}"#).expect("Failed to parse payload");

        assert_eq!(request.name.as_deref(), Some("New Name"));
        assert!(request.email.is_none());
        assert!(request.password.is_none());
        assert!(request.display_picture.is_none());
    }

    #[test]
    fn test_public_user_drops_credential() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "secret-hash".to_string(),
            display_picture: "avatars/ada.png".to_string(),
            events_hosting: vec![],
            events_attending: vec![],
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(PublicUser::from(user)).expect("Failed to serialize");
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "ada@example.com");
    }
}
