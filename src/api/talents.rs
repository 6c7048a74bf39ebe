use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::api::error_response;
use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::models::talent;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TalentPayload {
    pub name: String,
    pub niche: String,
    pub status: String,
    pub join_date: String,
}

fn validate(payload: &TalentPayload) -> Result<(), DomainError> {
    if payload.name.trim().is_empty() {
        return Err(DomainError::Validation("name is required".to_owned()));
    }
    if !talent::STATUSES.contains(&payload.status.as_str()) {
        return Err(DomainError::Validation(format!(
            "invalid status '{}'",
            payload.status
        )));
    }
    if NaiveDate::parse_from_str(&payload.join_date, "%Y-%m-%d").is_err() {
        return Err(DomainError::Validation(format!(
            "invalid join date '{}'",
            payload.join_date
        )));
    }
    Ok(())
}

fn to_model(payload: TalentPayload) -> talent::Model {
    talent::Model {
        id: String::new(),
        name: payload.name,
        niche: payload.niche,
        status: payload.status,
        join_date: payload.join_date,
    }
}

/// GET /api/talents - full collection, no pagination
pub async fn list_talents(State(state): State<AppState>) -> impl IntoResponse {
    match state.talents.list().await {
        Ok(talents) => {
            Json(json!({ "talents": talents, "total": talents.len() })).into_response()
        }
        Err(e) => {
            tracing::error!("failed to list talents: {}", e);
            error_response(e)
        }
    }
}

/// POST /api/talents
pub async fn create_talent(
    State(state): State<AppState>,
    Json(payload): Json<TalentPayload>,
) -> impl IntoResponse {
    if let Err(e) = validate(&payload) {
        return error_response(e);
    }
    match state.talents.create(to_model(payload)).await {
        Ok(id) => (StatusCode::CREATED, Json(json!({ "id": id }))).into_response(),
        Err(e) => {
            tracing::error!("failed to create talent: {}", e);
            error_response(e)
        }
    }
}

/// PUT /api/talents/:id - full replace
pub async fn update_talent(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<TalentPayload>,
) -> impl IntoResponse {
    if let Err(e) = validate(&payload) {
        return error_response(e);
    }
    match state.talents.update(&id, to_model(payload)).await {
        Ok(()) => Json(json!({ "message": "Talent updated successfully" })).into_response(),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/talents/:id - no cascade: accounts, posts and sales keep
/// their snapshotted references
pub async fn delete_talent(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.talents.remove(&id).await {
        Ok(()) => Json(json!({ "message": "Talent deleted successfully" })).into_response(),
        Err(e) => error_response(e),
    }
}
