use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::api::error_response;
use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::models::{account, talent};
use crate::services::filter;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAccountsQuery {
    pub talent_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPayload {
    pub talent_id: String,
    pub platform: String,
    pub username: String,
    pub followers: i64,
}

fn validate(payload: &AccountPayload) -> Result<(), DomainError> {
    if payload.username.trim().is_empty() {
        return Err(DomainError::Validation("username is required".to_owned()));
    }
    if !account::PLATFORMS.contains(&payload.platform.as_str()) {
        return Err(DomainError::Validation(format!(
            "invalid platform '{}'",
            payload.platform
        )));
    }
    if payload.followers < 0 {
        return Err(DomainError::Validation(
            "followers cannot be negative".to_owned(),
        ));
    }
    Ok(())
}

/// Snapshots the talent name at write time; a missing talent degrades to
/// the "Unknown" label the way the entry form does.
fn to_model(payload: AccountPayload, talents: &[talent::Model]) -> account::Model {
    let talent_name = talents
        .iter()
        .find(|t| t.id == payload.talent_id)
        .map(|t| t.name.clone())
        .unwrap_or_else(|| "Unknown".to_owned());
    account::Model {
        id: String::new(),
        talent_id: payload.talent_id,
        talent_name,
        platform: payload.platform,
        username: payload.username,
        followers: payload.followers,
    }
}

/// GET /api/accounts - optionally narrowed to one talent's accounts, for
/// the dependent account choice in the entry forms
pub async fn list_accounts(
    State(state): State<AppState>,
    Query(query): Query<ListAccountsQuery>,
) -> impl IntoResponse {
    match state.accounts.list().await {
        Ok(accounts) => match query.talent_id.as_deref() {
            Some(talent_id) if !talent_id.is_empty() => {
                let available = filter::available_accounts(&accounts, talent_id);
                Json(json!({ "accounts": available, "total": available.len() })).into_response()
            }
            _ => Json(json!({ "accounts": accounts, "total": accounts.len() })).into_response(),
        },
        Err(e) => {
            tracing::error!("failed to list accounts: {}", e);
            error_response(e)
        }
    }
}

/// POST /api/accounts
pub async fn create_account(
    State(state): State<AppState>,
    Json(payload): Json<AccountPayload>,
) -> impl IntoResponse {
    if let Err(e) = validate(&payload) {
        return error_response(e);
    }
    let talents = match state.talents.list().await {
        Ok(talents) => talents,
        Err(e) => return error_response(e),
    };
    match state.accounts.create(to_model(payload, &talents)).await {
        Ok(id) => (StatusCode::CREATED, Json(json!({ "id": id }))).into_response(),
        Err(e) => {
            tracing::error!("failed to create account: {}", e);
            error_response(e)
        }
    }
}

/// PUT /api/accounts/:id - full replace, names re-snapshotted
pub async fn update_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<AccountPayload>,
) -> impl IntoResponse {
    if let Err(e) = validate(&payload) {
        return error_response(e);
    }
    let talents = match state.talents.list().await {
        Ok(talents) => talents,
        Err(e) => return error_response(e),
    };
    match state.accounts.update(&id, to_model(payload, &talents)).await {
        Ok(()) => Json(json!({ "message": "Account updated successfully" })).into_response(),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/accounts/:id - dependent products, posts and sales are left
/// in place with their snapshotted names
pub async fn delete_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.accounts.remove(&id).await {
        Ok(()) => Json(json!({ "message": "Account deleted successfully" })).into_response(),
        Err(e) => error_response(e),
    }
}
