use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::api::error_response;
use crate::infrastructure::AppState;
use crate::services::{filter, sale_service};

/// Query parameters for listing sales: type tab, inclusive date range,
/// talent and account selections. All optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSalesQuery {
    pub r#type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub talent_id: Option<String>,
    pub account_id: Option<String>,
}

/// A sale entry. Which optional fields matter depends on `type`: traffic
/// metrics for Overall rows, a product reference for Product rows.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalePayload {
    pub r#type: String,
    pub date: String,
    pub talent_id: String,
    pub account_id: String,
    pub product_id: Option<String>,
    pub revenue: Option<f64>,
    pub commission: Option<f64>,
    pub quantity: Option<i64>,
    pub views: Option<i64>,
    pub clicks: Option<i64>,
    pub status: String,
}

impl From<SalePayload> for sale_service::SaleInput {
    fn from(payload: SalePayload) -> Self {
        Self {
            r#type: payload.r#type,
            date: payload.date,
            talent_id: payload.talent_id,
            account_id: payload.account_id,
            product_id: payload.product_id,
            revenue: payload.revenue,
            commission: payload.commission,
            quantity: payload.quantity,
            views: payload.views,
            clicks: payload.clicks,
            status: payload.status,
        }
    }
}

/// GET /api/sales - newest first, optionally narrowed in memory
pub async fn list_sales(
    State(state): State<AppState>,
    Query(query): Query<ListSalesQuery>,
) -> impl IntoResponse {
    let mut sales = match state.sales.list().await {
        Ok(sales) => sales,
        Err(e) => {
            tracing::error!("failed to list sales: {}", e);
            return error_response(e);
        }
    };
    sales.sort_by(|a, b| b.date.cmp(&a.date));

    let filtered = filter::filter_sales(
        &sales,
        query.r#type.as_deref(),
        query.start_date.as_deref(),
        query.end_date.as_deref(),
        query.talent_id.as_deref(),
        query.account_id.as_deref(),
    );
    Json(json!({ "sales": filtered, "total": filtered.len() })).into_response()
}

/// POST /api/sales
pub async fn create_sale(
    State(state): State<AppState>,
    Json(payload): Json<SalePayload>,
) -> impl IntoResponse {
    let loaded = tokio::try_join!(
        state.talents.list(),
        state.accounts.list(),
        state.products.list()
    );
    let (talents, accounts, products) = match loaded {
        Ok(collections) => collections,
        Err(e) => {
            tracing::error!("failed to load reference collections: {}", e);
            return error_response(e);
        }
    };

    let sale = match sale_service::build_sale(payload.into(), &talents, &accounts, &products) {
        Ok(sale) => sale,
        Err(e) => return error_response(e),
    };

    match state.sales.create(sale).await {
        Ok(id) => (StatusCode::CREATED, Json(json!({ "id": id }))).into_response(),
        Err(e) => {
            tracing::error!("failed to create sale: {}", e);
            error_response(e)
        }
    }
}

/// PUT /api/sales/:id - full replace, names re-snapshotted
pub async fn update_sale(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<SalePayload>,
) -> impl IntoResponse {
    let loaded = tokio::try_join!(
        state.talents.list(),
        state.accounts.list(),
        state.products.list()
    );
    let (talents, accounts, products) = match loaded {
        Ok(collections) => collections,
        Err(e) => {
            tracing::error!("failed to load reference collections: {}", e);
            return error_response(e);
        }
    };

    let sale = match sale_service::build_sale(payload.into(), &talents, &accounts, &products) {
        Ok(sale) => sale,
        Err(e) => return error_response(e),
    };

    match state.sales.update(&id, sale).await {
        Ok(()) => Json(json!({ "message": "Sale updated successfully" })).into_response(),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/sales/:id
pub async fn delete_sale(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.sales.remove(&id).await {
        Ok(()) => Json(json!({ "message": "Sale deleted successfully" })).into_response(),
        Err(e) => error_response(e),
    }
}
