//! Auth HTTP Routes
//!
//! Registration, login, logout and password change for the current user.

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{ApiError, ApiResult};
use super::state::{bearer_token, user_agent, AppState};
use crate::auth::user::{LoginRequest, RegisterRequest};
use crate::auth::{Role, User};

/// Auth routes with shared state
pub fn auth_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/logout", post(logout_handler))
        .route("/user", get(get_user_handler))
        .route("/password", post(change_password_handler))
        .with_state(state)
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}

/// Public view of an account (no password hash, profile or plans)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub forename: String,
    pub surname: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            forename: user.forename.clone(),
            surname: user.surname.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

// ==================
// Handlers
// ==================

async fn register_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let (user, token) = state.auth.register(request, user_agent(&headers))?;
    let response = AuthResponse {
        user: UserResponse::from(&user),
        token,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

async fn login_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let (user, token) = state.auth.login(request, user_agent(&headers))?;
    Ok(Json(AuthResponse {
        user: UserResponse::from(&user),
        token,
    }))
}

async fn logout_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let token = bearer_token(&headers).ok_or(ApiError::MissingToken)?;
    state.auth.logout(token)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_user_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<UserResponse>> {
    let user = state.current_user(&headers)?;
    Ok(Json(UserResponse::from(&user)))
}

async fn change_password_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<ChangePasswordRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let user = state.current_user(&headers)?;
    let token =
        state
            .auth
            .change_password(user.id, &request.current_password, &request.new_password)?;
    Ok(Json(TokenResponse { token }))
}
