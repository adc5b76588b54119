//! Authentication handlers.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use tracing::info;

use crate::web::dto::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::auth::extract_token;

/// POST /register - Create a new user account.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let user = state.auth.register(&req.login, &req.password).await?;

    info!(login = %user.login, "User registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user.id,
            login: user.login,
        }),
    ))
}

/// POST /login - Exchange credentials for a session token.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let token = state.auth.login(&req.login, &req.password).await?;

    Ok(Json(LoginResponse { auth_token: token }))
}

/// POST /logout - Revoke the presented session token.
///
/// An unknown or missing token is rejected with 401; logout is not
/// idempotent from the client's point of view.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let token = extract_token(&headers)
        .ok_or_else(|| ApiError::unauthorized("missing auth-token header"))?;

    if state.auth.logout(token) {
        Ok(StatusCode::OK)
    } else {
        Err(ApiError::unauthorized("invalid or expired token"))
    }
}
