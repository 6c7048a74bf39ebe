use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::Serialize;

use crate::api::error_response;
use crate::domain::{DomainError, Record};
use crate::infrastructure::AppState;
use crate::models::{account, post, product, sale, talent};

/// Serializes records as CSV; the header row is the records' own field
/// names, absent optionals become empty cells.
fn csv_bytes<T: Serialize>(rows: &[T]) -> Result<Vec<u8>, DomainError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|e| DomainError::Internal(e.to_string()))
}

async fn collection_csv(state: &AppState, collection: &str) -> Result<Vec<u8>, DomainError> {
    if collection == talent::Model::COLLECTION {
        csv_bytes(&state.talents.list().await?)
    } else if collection == account::Model::COLLECTION {
        csv_bytes(&state.accounts.list().await?)
    } else if collection == product::Model::COLLECTION {
        csv_bytes(&state.products.list().await?)
    } else if collection == post::Model::COLLECTION {
        csv_bytes(&state.posts.list().await?)
    } else if collection == sale::Model::COLLECTION {
        csv_bytes(&state.sales.list().await?)
    } else {
        Err(DomainError::NotFound)
    }
}

/// GET /api/export/:collection - the full collection as a CSV attachment
pub async fn export_collection(
    State(state): State<AppState>,
    Path(collection): Path<String>,
) -> impl IntoResponse {
    match collection_csv(&state, &collection).await {
        Ok(bytes) => {
            let filename = format!(
                "{}-export-{}.csv",
                collection,
                chrono::Utc::now().format("%Y-%m-%d")
            );

            let mut headers = HeaderMap::new();
            headers.insert(
                header::CONTENT_TYPE,
                "text/csv; charset=utf-8".parse().unwrap(),
            );
            headers.insert(
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename)
                    .parse()
                    .unwrap(),
            );

            (StatusCode::OK, headers, bytes).into_response()
        }
        Err(e) => {
            tracing::error!("failed to export {}: {}", collection, e);
            error_response(e)
        }
    }
}
