use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Duration, Utc};
use rand::{distributions::Alphanumeric, Rng};
use sea_orm::*;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::auth::{create_jwt, hash_password, verify_password, Claims};
use crate::models::user;

#[derive(Deserialize)]
pub struct RegisterRequest {
    email: String,
    password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Deserialize)]
pub struct ResetRequest {
    email: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetConfirmRequest {
    token: String,
    new_password: String,
}

/// POST /api/auth/register
pub async fn register(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    if payload.email.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Email is required" })),
        )
            .into_response();
    }
    if payload.password.len() < 6 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Password must be at least 6 characters" })),
        )
            .into_response();
    }

    match user::Entity::find()
        .filter(user::Column::Email.eq(&payload.email))
        .one(&db)
        .await
    {
        Ok(Some(_)) => (
            StatusCode::CONFLICT,
            Json(json!({ "error": "Email already in use" })),
        )
            .into_response(),
        Ok(None) => {
            let password_hash = match hash_password(&payload.password) {
                Ok(hash) => hash,
                Err(e) => {
                    tracing::error!("failed to hash password: {}", e);
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "error": "Sign up failed. Please try again." })),
                    )
                        .into_response();
                }
            };
            let now = Utc::now().to_rfc3339();
            let new_user = user::ActiveModel {
                id: Set(Uuid::new_v4().to_string()),
                email: Set(payload.email.clone()),
                password_hash: Set(password_hash),
                reset_token: Set(None),
                reset_token_expires: Set(None),
                created_at: Set(now.clone()),
                updated_at: Set(now),
            };
            match new_user.insert(&db).await {
                Ok(_) => {
                    tracing::info!("registered user {}", payload.email);
                    match create_jwt(&payload.email) {
                        Ok(token) => {
                            (StatusCode::CREATED, Json(json!({ "token": token }))).into_response()
                        }
                        Err(e) => {
                            tracing::error!("failed to issue token: {}", e);
                            (
                                StatusCode::INTERNAL_SERVER_ERROR,
                                Json(json!({ "error": "Sign up failed. Please try again." })),
                            )
                                .into_response()
                        }
                    }
                }
                Err(e) => {
                    tracing::error!("failed to create user: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "error": "Sign up failed. Please try again." })),
                    )
                        .into_response()
                }
            }
        }
        Err(e) => {
            tracing::error!("user lookup failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Sign up failed. Please try again." })),
            )
                .into_response()
        }
    }
}

/// POST /api/auth/login
///
/// An unknown email and a wrong password produce the same message.
pub async fn login(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    tracing::info!("Login attempt for {}", payload.email);

    let user = match user::Entity::find()
        .filter(user::Column::Email.eq(&payload.email))
        .one(&db)
        .await
    {
        Ok(Some(u)) => u,
        _ => {
            tracing::warn!("User not found: {}", payload.email);
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid email or password" })),
            )
                .into_response();
        }
    };

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => match create_jwt(&user.email) {
            Ok(token) => (StatusCode::OK, Json(json!({ "token": token }))).into_response(),
            Err(e) => {
                tracing::error!("failed to issue token: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Sign in failed. Please try again." })),
                )
                    .into_response()
            }
        },
        _ => {
            tracing::warn!("Password verification failed for {}", user.email);
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid email or password" })),
            )
                .into_response()
        }
    }
}

/// GET /api/auth/me - the "is a session active" signal
pub async fn get_me(claims: Claims) -> impl IntoResponse {
    Json(json!({ "email": claims.sub }))
}

/// POST /api/auth/password-reset/request
///
/// Issues a one-hour reset token. Delivery is out of scope; the token is
/// written to the server log.
pub async fn request_password_reset(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<ResetRequest>,
) -> impl IntoResponse {
    match user::Entity::find()
        .filter(user::Column::Email.eq(&payload.email))
        .one(&db)
        .await
    {
        Ok(Some(found)) => {
            let token: String = rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(48)
                .map(char::from)
                .collect();
            let expires = (Utc::now() + Duration::hours(1)).to_rfc3339();

            let mut active: user::ActiveModel = found.into();
            active.reset_token = Set(Some(token.clone()));
            active.reset_token_expires = Set(Some(expires));
            active.updated_at = Set(Utc::now().to_rfc3339());

            match active.update(&db).await {
                Ok(_) => {
                    tracing::info!("password reset token for {}: {}", payload.email, token);
                    Json(json!({ "message": "Password reset requested" })).into_response()
                }
                Err(e) => {
                    tracing::error!("failed to store reset token: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "error": "Could not send the reset email. Please try again." })),
                    )
                        .into_response()
                }
            }
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Email not found" })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("user lookup failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Could not send the reset email. Please try again." })),
            )
                .into_response()
        }
    }
}

fn token_still_valid(expires: Option<&str>) -> bool {
    expires
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|t| t.with_timezone(&Utc) > Utc::now())
        .unwrap_or(false)
}

/// POST /api/auth/password-reset/confirm
pub async fn confirm_password_reset(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<ResetConfirmRequest>,
) -> impl IntoResponse {
    if payload.new_password.len() < 6 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Password must be at least 6 characters" })),
        )
            .into_response();
    }

    let found = match user::Entity::find()
        .filter(user::Column::ResetToken.eq(&payload.token))
        .one(&db)
        .await
    {
        Ok(found) => found,
        Err(e) => {
            tracing::error!("user lookup failed: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Password reset failed. Please try again." })),
            )
                .into_response();
        }
    };

    let user = match found {
        Some(user) if token_still_valid(user.reset_token_expires.as_deref()) => user,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Reset link is invalid or expired" })),
            )
                .into_response();
        }
    };

    let password_hash = match hash_password(&payload.new_password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("failed to hash password: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Password reset failed. Please try again." })),
            )
                .into_response();
        }
    };

    let email = user.email.clone();
    let mut active: user::ActiveModel = user.into();
    active.password_hash = Set(password_hash);
    active.reset_token = Set(None);
    active.reset_token_expires = Set(None);
    active.updated_at = Set(Utc::now().to_rfc3339());

    match active.update(&db).await {
        Ok(_) => {
            tracing::info!("password reset completed for {}", email);
            Json(json!({ "message": "Password updated" })).into_response()
        }
        Err(e) => {
            tracing::error!("failed to update password: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Password reset failed. Please try again." })),
            )
                .into_response()
        }
    }
}
