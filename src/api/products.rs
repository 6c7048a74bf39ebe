use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::api::error_response;
use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::models::{account, product};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub link: String,
    pub account_id: String,
}

fn validate(payload: &ProductPayload) -> Result<(), DomainError> {
    if payload.name.trim().is_empty() {
        return Err(DomainError::Validation("name is required".to_owned()));
    }
    if Url::parse(&payload.link).is_err() {
        return Err(DomainError::Validation(format!(
            "invalid product link '{}'",
            payload.link
        )));
    }
    Ok(())
}

fn to_model(payload: ProductPayload, accounts: &[account::Model]) -> product::Model {
    let account_name = accounts
        .iter()
        .find(|a| a.id == payload.account_id)
        .map(|a| a.username.clone())
        .unwrap_or_else(|| "Unknown".to_owned());
    product::Model {
        id: String::new(),
        name: payload.name,
        link: payload.link,
        account_id: payload.account_id,
        account_name,
    }
}

/// GET /api/products
pub async fn list_products(State(state): State<AppState>) -> impl IntoResponse {
    match state.products.list().await {
        Ok(products) => {
            Json(json!({ "products": products, "total": products.len() })).into_response()
        }
        Err(e) => {
            tracing::error!("failed to list products: {}", e);
            error_response(e)
        }
    }
}

/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> impl IntoResponse {
    if let Err(e) = validate(&payload) {
        return error_response(e);
    }
    let accounts = match state.accounts.list().await {
        Ok(accounts) => accounts,
        Err(e) => return error_response(e),
    };
    match state.products.create(to_model(payload, &accounts)).await {
        Ok(id) => (StatusCode::CREATED, Json(json!({ "id": id }))).into_response(),
        Err(e) => {
            tracing::error!("failed to create product: {}", e);
            error_response(e)
        }
    }
}

/// PUT /api/products/:id - full replace, account name re-snapshotted
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductPayload>,
) -> impl IntoResponse {
    if let Err(e) = validate(&payload) {
        return error_response(e);
    }
    let accounts = match state.accounts.list().await {
        Ok(accounts) => accounts,
        Err(e) => return error_response(e),
    };
    match state.products.update(&id, to_model(payload, &accounts)).await {
        Ok(()) => Json(json!({ "message": "Product updated successfully" })).into_response(),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/products/:id
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.products.remove(&id).await {
        Ok(()) => Json(json!({ "message": "Product deleted successfully" })).into_response(),
        Err(e) => error_response(e),
    }
}
