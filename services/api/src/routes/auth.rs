//! Account routes: registration, login, profile, deletion

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::warn;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::user::{
        AuthResponse, CreateUserRequest, DeleteUserRequest, DeleteUserResponse, LoginRequest,
        PublicUser, UpdateUserRequest, UpdateUserResponse,
    },
    state::AppState,
    validation,
};

/// Register a new user and issue an auth token
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<impl IntoResponse> {
    let mut errors = Vec::new();
    if let Err(e) = validation::validate_name(&payload.name) {
        errors.push(e);
    }
    if let Err(e) = validation::validate_email(&payload.email) {
        errors.push(e);
    }
    if let Err(e) = validation::validate_password(&payload.password) {
        errors.push(e);
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    if state
        .user_repository
        .find_by_email(&payload.email)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "A user with this email already exists".to_string(),
        ));
    }

    let user = state.user_repository.create(&payload).await?;
    let auth_token = state.jwt_service.issue(user.id)?;

    Ok(Json(AuthResponse {
        success: true,
        auth_token,
        user_id: user.id,
    }))
}

/// Authenticate a user and issue an auth token
///
/// Lookup and credential failures share one message so the response does not
/// reveal which of the two was wrong.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let mut errors = Vec::new();
    if let Err(e) = validation::validate_email(&payload.email) {
        errors.push(e);
    }
    if payload.password.is_empty() {
        errors.push("Password cannot be blank".to_string());
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let user = state
        .user_repository
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| {
            ApiError::BadRequest("Try logging in with correct credentials".to_string())
        })?;

    if !state
        .user_repository
        .verify_password(&user, &payload.password)
        .await?
    {
        return Err(ApiError::BadRequest(
            "Try logging in with correct credentials".to_string(),
        ));
    }

    let auth_token = state.jwt_service.issue(user.id)?;

    Ok(Json(AuthResponse {
        success: true,
        auth_token,
        user_id: user.id,
    }))
}

/// Get a user's public details by ID
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let user_id = Uuid::parse_str(&id)
        .map_err(|_| ApiError::BadRequest("Invalid user ID".to_string()))?;

    let user = state
        .user_repository
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(PublicUser::from(user)))
}

/// Update the authenticated user's profile; only supplied fields change
pub async fn update_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<UpdateUserRequest>,
) -> ApiResult<impl IntoResponse> {
    let mut errors = Vec::new();
    if let Some(name) = &payload.name {
        if let Err(e) = validation::validate_name(name) {
            errors.push(e);
        }
    }
    if let Some(email) = &payload.email {
        if let Err(e) = validation::validate_email(email) {
            errors.push(e);
        }
    }
    if let Some(password) = &payload.password {
        if let Err(e) = validation::validate_password(password) {
            errors.push(e);
        }
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    if let Some(email) = &payload.email {
        if let Some(existing) = state.user_repository.find_by_email(email).await? {
            if existing.id != auth.id {
                return Err(ApiError::Conflict(
                    "A user with this email already exists".to_string(),
                ));
            }
        }
    }

    // Replacing the display picture drops the previous object, unless it is
    // the shared default.
    if payload.display_picture.is_some() {
        if let Some(current) = state.user_repository.find_by_id(auth.id).await? {
            if let Err(e) = state.avatar_store.delete(&current.display_picture).await {
                warn!(
                    "Failed to delete display picture for user {}: {}",
                    auth.id, e
                );
            }
        }
    }

    let user = state
        .user_repository
        .update(auth.id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(UpdateUserResponse {
        success: true,
        user: PublicUser::from(user),
    }))
}

/// Delete the authenticated user's account after confirming the password
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<DeleteUserRequest>,
) -> ApiResult<impl IntoResponse> {
    if payload.password.is_empty() {
        return Err(ApiError::Validation(vec![
            "Password is required".to_string(),
        ]));
    }

    let user = state.membership.delete_user(auth.id, &payload.password).await?;

    if let Err(e) = state.avatar_store.delete(&user.display_picture).await {
        warn!(
            "Failed to delete display picture for user {}: {}",
            user.id, e
        );
    }

    Ok(Json(DeleteUserResponse {
        success: true,
        message: "Account deleted successfully".to_string(),
    }))
}
