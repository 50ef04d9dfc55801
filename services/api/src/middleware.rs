//! Authentication middleware for token validation

use axum::{
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

/// Custom request header carrying the auth token
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Authenticated caller, inserted into request extensions by the middleware
///
/// Handlers receive this as an explicit `Extension` rather than reading any
/// ambient global state.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
}

/// Authentication middleware
///
/// Validates the token in the `x-auth-token` header and makes the caller's
/// identity available to the protected handlers.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(AUTH_TOKEN_HEADER)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| {
            ApiError::Unauthorized("You can't access this page!! Authentication failed.".to_string())
        })?;

    let claims = state.jwt_service.validate(token).map_err(|_| {
        ApiError::Unauthorized("You can't access this page!! Authentication failed.".to_string())
    })?;

    req.extensions_mut().insert(AuthUser { id: claims.sub });

    Ok(next.run(req).await)
}
