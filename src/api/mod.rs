pub mod accounts;
pub mod auth;
pub mod dashboard;
pub mod export;
pub mod health;
pub mod posts;
pub mod products;
pub mod sales;
pub mod talents;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;

use crate::domain::DomainError;
use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Auth
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::get_me))
        .route(
            "/auth/password-reset/request",
            post(auth::request_password_reset),
        )
        .route(
            "/auth/password-reset/confirm",
            post(auth::confirm_password_reset),
        )
        // Talents
        .route(
            "/talents",
            get(talents::list_talents).post(talents::create_talent),
        )
        .route(
            "/talents/:id",
            put(talents::update_talent).delete(talents::delete_talent),
        )
        // Accounts
        .route(
            "/accounts",
            get(accounts::list_accounts).post(accounts::create_account),
        )
        .route(
            "/accounts/:id",
            put(accounts::update_account).delete(accounts::delete_account),
        )
        // Products
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/:id",
            put(products::update_product).delete(products::delete_product),
        )
        // Posts
        .route("/posts", get(posts::list_posts).post(posts::create_posts))
        .route("/posts/daily-count", get(posts::daily_count))
        .route(
            "/posts/:id",
            put(posts::update_post).delete(posts::delete_post),
        )
        // Sales
        .route("/sales", get(sales::list_sales).post(sales::create_sale))
        .route(
            "/sales/:id",
            put(sales::update_sale).delete(sales::delete_sale),
        )
        // Dashboard
        .route("/dashboard", get(dashboard::summary))
        // Export
        .route("/export/:collection", get(export::export_collection))
        .with_state(state)
}

/// Maps a domain failure onto the HTTP surface.
pub(crate) fn error_response(err: DomainError) -> Response {
    let status = match &err {
        DomainError::NotFound => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Database(_) | DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let message = match err {
        DomainError::NotFound => "Resource not found".to_owned(),
        DomainError::Validation(msg) => msg,
        DomainError::Database(msg) => format!("Database error: {}", msg),
        DomainError::Internal(msg) => format!("Internal error: {}", msg),
    };
    (status, Json(json!({ "error": message }))).into_response()
}
