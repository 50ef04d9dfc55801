//! Shared helpers for the API integration tests
//!
//! Tests run against the database named by `DATABASE_URL` and create their
//! own uniquely-keyed rows, so they are safe to run in parallel.

#![allow(dead_code)]

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use api::models::event::NewEvent;
use api::models::user::{CreateUserRequest, User};
use api::repositories::user::UserRepository;

/// Default password used for users created by the tests
pub const TEST_PASSWORD: &str = "correct horse battery";

/// Connect to the test database and apply migrations
pub async fn setup_pool() -> PgPool {
    let config = common::database::DatabaseConfig::from_env()
        .expect("Failed to load database configuration");
    let pool = common::database::init_pool(&config)
        .await
        .expect("Failed to connect to the test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Produce an email address no other test run will collide with
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, Uuid::new_v4())
}

/// Register a user with a unique email and the default test password
pub async fn register_user(users: &UserRepository, name: &str) -> User {
    users
        .create(&CreateUserRequest {
            name: name.to_string(),
            email: unique_email(name),
            password: TEST_PASSWORD.to_string(),
            display_picture: None,
        })
        .await
        .expect("Failed to create test user")
}

/// Event fields for an event starting tomorrow and ending the day after
pub fn upcoming_event(title: &str) -> NewEvent {
    let start_at = Utc::now() + Duration::days(1);

    NewEvent {
        title: title.to_string(),
        description: "An event created by the integration tests".to_string(),
        location: "Test Hall".to_string(),
        start_at,
        end_at: start_at + Duration::hours(2),
    }
}

/// Event fields for an event that has already ended
pub fn ended_event(title: &str) -> NewEvent {
    let start_at = Utc::now() - Duration::days(2);

    NewEvent {
        title: title.to_string(),
        description: "An already-ended event created by the integration tests".to_string(),
        location: "Test Hall".to_string(),
        start_at,
        end_at: start_at + Duration::hours(2),
    }
}
