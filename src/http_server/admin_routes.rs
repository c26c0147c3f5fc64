//! Admin Routes
//!
//! User management and plan management. Every handler requires a session
//! belonging to an `Admin` account.

use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, put},
    Router,
};
use uuid::Uuid;

use super::auth_routes::UserResponse;
use super::error::ApiResult;
use super::state::AppState;
use crate::auth::user::{CreateUserRequest, UpdateUserRequest};
use crate::store::{PlanEdit, PlanEditRequest, PlanHistoryEntry, UserPlans};

/// Admin routes, nested under `/admin`
pub fn admin_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route("/users/:id", put(update_user_handler).delete(delete_user_handler))
        .route("/userplans", get(list_user_plans_handler))
        .route(
            "/userplans/:user_id/:index",
            put(update_plan_handler).delete(delete_plan_handler),
        )
        .with_state(state)
}

// ==================
// User management
// ==================

async fn list_users_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<UserResponse>>> {
    state.current_admin(&headers)?;
    let users = state.auth.list_users()?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

async fn create_user_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    state.current_admin(&headers)?;
    let user = state.auth.create_user(request)?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

async fn update_user_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    state.current_admin(&headers)?;
    let user = state.auth.update_user(id, request)?;
    Ok(Json(UserResponse::from(&user)))
}

async fn delete_user_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.current_admin(&headers)?;
    state.auth.delete_user(id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ==================
// Plan management
// ==================

async fn list_user_plans_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<UserPlans>>> {
    state.current_admin(&headers)?;
    Ok(Json(state.store.all_user_plans()?))
}

async fn update_plan_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path((user_id, index)): Path<(Uuid, usize)>,
    Json(request): Json<PlanEditRequest>,
) -> ApiResult<Json<PlanHistoryEntry>> {
    state.current_admin(&headers)?;
    let entry = state
        .store
        .update_plan(user_id, index, PlanEdit::from(request))?;
    Ok(Json(entry))
}

async fn delete_plan_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path((user_id, index)): Path<(Uuid, usize)>,
) -> ApiResult<StatusCode> {
    state.current_admin(&headers)?;
    state.store.delete_plan(user_id, index)?;
    Ok(StatusCode::NO_CONTENT)
}
