use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};

use crate::api::error_response;
use crate::domain::{DomainError, ReportContext};
use crate::infrastructure::AppState;
use crate::services::report;

/// GET /api/dashboard?month=&year=&talentId=&accountId=
///
/// Loads all five collections concurrently and aggregates them in memory.
/// If any load fails the whole request fails; there is no partial summary.
pub async fn summary(
    State(state): State<AppState>,
    Query(ctx): Query<ReportContext>,
) -> impl IntoResponse {
    if ctx.month > 11 {
        return error_response(DomainError::Validation(
            "month must be between 0 and 11".to_owned(),
        ));
    }

    let loaded = tokio::try_join!(
        state.talents.list(),
        state.accounts.list(),
        state.products.list(),
        state.posts.list(),
        state.sales.list(),
    );

    match loaded {
        Ok((talents, accounts, products, posts, sales)) => {
            let ctx = ctx.normalized(&accounts);
            let summary = report::build_summary(&ctx, &talents, &accounts, &products, &posts, &sales);
            Json(summary).into_response()
        }
        Err(e) => {
            tracing::error!("failed to load dashboard collections: {}", e);
            error_response(e)
        }
    }
}
