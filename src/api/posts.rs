use axum::{
    extract::{Path, Query, State},
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
use crate::services::{filter, post_service};

/// Query parameters for the post listing. Month is zero-indexed; the text
/// lookups match the snapshotted display names.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPostsQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub talent: Option<String>,
    pub product: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemPayload {
    pub product_id: String,
    pub quantity: u32,
}

/// Bulk entry: shared context plus the cart's (product, quantity) pairs.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostsPayload {
    pub date: String,
    pub talent_id: String,
    pub account_id: String,
    pub items: Vec<CartItemPayload>,
}

/// Edit mode: replaces one post's context and product in a single call.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostPayload {
    pub date: String,
    pub talent_id: String,
    pub account_id: String,
    pub product_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCountQuery {
    pub talent_id: String,
    pub date: String,
}

/// GET /api/posts - newest first, optionally narrowed by period and
/// free-text lookups
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> impl IntoResponse {
    let mut posts = match state.posts.list().await {
        Ok(posts) => posts,
        Err(e) => {
            tracing::error!("failed to list posts: {}", e);
            return error_response(e);
        }
    };
    posts.sort_by(|a, b| b.date.cmp(&a.date));

    match (query.month, query.year) {
        (Some(month), Some(year)) => {
            let filtered = filter::filter_posts(
                &posts,
                month,
                year,
                query.talent.as_deref().unwrap_or(""),
                query.product.as_deref().unwrap_or(""),
            );
            Json(json!({ "posts": filtered, "total": filtered.len() })).into_response()
        }
        _ => Json(json!({ "posts": posts, "total": posts.len() })).into_response(),
    }
}

/// POST /api/posts - expands the cart into one create call per unit of
/// quantity; a partial failure leaves the successful creates persisted
pub async fn create_posts(
    State(state): State<AppState>,
    Json(payload): Json<CreatePostsPayload>,
) -> impl IntoResponse {
    if payload.items.is_empty() {
        return error_response(DomainError::Validation("the cart is empty".to_owned()));
    }
    if NaiveDate::parse_from_str(&payload.date, "%Y-%m-%d").is_err() {
        return error_response(DomainError::Validation(format!(
            "invalid date '{}'",
            payload.date
        )));
    }

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

    let ctx = match post_service::resolve_context(
        &payload.date,
        &payload.talent_id,
        &payload.account_id,
        &talents,
        &accounts,
    ) {
        Ok(ctx) => ctx,
        Err(e) => return error_response(e),
    };

    let items: Vec<(String, u32)> = payload
        .items
        .into_iter()
        .map(|item| (item.product_id, item.quantity))
        .collect();
    let cart = match post_service::build_cart(&items, &ctx.account_id, &products) {
        Ok(cart) => cart,
        Err(e) => return error_response(e),
    };

    match post_service::create_posts(state.posts.as_ref(), &cart, &ctx).await {
        Ok(created) => (StatusCode::CREATED, Json(json!({ "created": created }))).into_response(),
        Err(e) => {
            tracing::error!("bulk post entry failed: {}", e);
            error_response(e)
        }
    }
}

/// PUT /api/posts/:id - single update; engagement counters are preserved
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdatePostPayload>,
) -> impl IntoResponse {
    if NaiveDate::parse_from_str(&payload.date, "%Y-%m-%d").is_err() {
        return error_response(DomainError::Validation(format!(
            "invalid date '{}'",
            payload.date
        )));
    }

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

    let ctx = match post_service::resolve_context(
        &payload.date,
        &payload.talent_id,
        &payload.account_id,
        &talents,
        &accounts,
    ) {
        Ok(ctx) => ctx,
        Err(e) => return error_response(e),
    };

    match post_service::update_post(
        state.posts.as_ref(),
        &id,
        &ctx,
        &payload.product_id,
        &products,
    )
    .await
    {
        Ok(()) => Json(json!({ "message": "Post updated successfully" })).into_response(),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/posts/:id
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.posts.remove(&id).await {
        Ok(()) => Json(json!({ "message": "Post deleted successfully" })).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/posts/daily-count - live feedback for the entry form: how many
/// posts the talent already has on that date
pub async fn daily_count(
    State(state): State<AppState>,
    Query(query): Query<DailyCountQuery>,
) -> impl IntoResponse {
    match state.posts.list().await {
        Ok(posts) => {
            let count = filter::posts_on_day(&posts, &query.talent_id, &query.date);
            Json(json!({ "count": count })).into_response()
        }
        Err(e) => {
            tracing::error!("failed to list posts: {}", e);
            error_response(e)
        }
    }
}
