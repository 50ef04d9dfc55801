//! Application state shared across handlers

use sqlx::PgPool;

use crate::avatars::AvatarStore;
use crate::jwt::JwtService;
use crate::membership::MembershipCoordinator;
use crate::repositories::{event::EventRepository, user::UserRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_service: JwtService,
    pub avatar_store: AvatarStore,
    pub user_repository: UserRepository,
    pub event_repository: EventRepository,
    pub membership: MembershipCoordinator,
}
