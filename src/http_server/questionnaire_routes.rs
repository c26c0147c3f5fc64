//! Questionnaire and Plan Routes
//!
//! The three wizard steps for the signed-in user and read access to the
//! plans generated for them.

use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Router,
};

use super::error::ApiResult;
use super::state::AppState;
use crate::plan::Profile;
use crate::store::{
    FinancialInformation, PersonalInformation, PlanHistoryEntry, SavingsInformation,
};

/// Wizard routes, nested under `/questionnaire`
pub fn questionnaire_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(profile_handler))
        .route("/personal-information", post(personal_information_handler))
        .route("/financial-information", post(financial_information_handler))
        .route("/savings", post(savings_handler))
        .with_state(state)
}

/// Plan views for the current user
pub fn plan_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/plan/summary", get(latest_plan_handler))
        .route("/plans", get(history_handler))
        .route("/plans/:index", get(plan_at_handler))
        .with_state(state)
}

async fn profile_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<Profile>> {
    let user = state.current_user(&headers)?;
    Ok(Json(state.store.profile(user.id)?))
}

async fn personal_information_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(step): Json<PersonalInformation>,
) -> ApiResult<Json<Profile>> {
    let user = state.current_user(&headers)?;
    Ok(Json(state.store.save_step(user.id, step)?))
}

async fn financial_information_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(step): Json<FinancialInformation>,
) -> ApiResult<Json<Profile>> {
    let user = state.current_user(&headers)?;
    Ok(Json(state.store.save_step(user.id, step)?))
}

async fn savings_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(step): Json<SavingsInformation>,
) -> ApiResult<(StatusCode, Json<PlanHistoryEntry>)> {
    let user = state.current_user(&headers)?;
    let entry = state.store.complete_questionnaire(user.id, step)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn latest_plan_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<PlanHistoryEntry>> {
    let user = state.current_user(&headers)?;
    Ok(Json(state.store.latest_plan(user.id)?))
}

async fn history_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<PlanHistoryEntry>>> {
    let user = state.current_user(&headers)?;
    Ok(Json(state.store.history(user.id)?))
}

async fn plan_at_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(index): Path<usize>,
) -> ApiResult<Json<PlanHistoryEntry>> {
    let user = state.current_user(&headers)?;
    Ok(Json(state.store.plan_at(user.id, index)?))
}
